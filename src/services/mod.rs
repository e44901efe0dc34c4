pub mod relay;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PineScriptResponse;

pub use relay::{build_prompt, RelayService};

/// Turns a trading-logic description into a generated Pine Script.
#[async_trait]
pub trait PineScriptGenerator: Send + Sync {
    async fn generate_pine_script(&self, logic: &str) -> Result<PineScriptResponse>;
}
