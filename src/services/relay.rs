use async_trait::async_trait;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use super::PineScriptGenerator;
use crate::config::GeminiConfig;
use crate::constants::prompt;
use crate::error::Result;
use crate::llm::GeminiClient;
use crate::models::PineScriptResponse;

/// Fixed instruction template with the logic text embedded verbatim.
pub fn build_prompt(logic: &str) -> String {
    let mut out = String::with_capacity(prompt::PREFIX.len() + logic.len() + prompt::SUFFIX.len());
    out.push_str(prompt::PREFIX);
    out.push_str(logic);
    out.push_str(prompt::SUFFIX);
    out
}

/// Relays trading logic to Gemini and reshapes the first candidate.
#[derive(Clone, Debug)]
pub struct RelayService {
    gemini: GeminiClient,
}

impl RelayService {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if !config.has_api_key() {
            warn!("⚠️ [RELAY] GEMINI_API_KEY is not set - generation requests will fail");
        }
        Ok(Self {
            gemini: GeminiClient::new(config)?,
        })
    }

    async fn relay(&self, logic: &str) -> Result<PineScriptResponse> {
        info!("📝 [RELAY] Generating Pine Script ({} chars of logic)", logic.chars().count());

        let prompt = build_prompt(logic);
        let response = self
            .gemini
            .generate_content(&prompt)
            .await?
            .into_pine_script_response()?;

        info!(
            "✅ [RELAY] Generated script: finish_reason={}, tokens={}",
            response.finish_reason, response.token_count
        );
        Ok(response)
    }
}

#[async_trait]
impl PineScriptGenerator for RelayService {
    async fn generate_pine_script(&self, logic: &str) -> Result<PineScriptResponse> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("generate_pine_script", %request_id);
        self.relay(logic).instrument(span).await
    }
}
