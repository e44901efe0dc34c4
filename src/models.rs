use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /generate-pine-script`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotLogicRequest {
    pub logic: String,
}

/// Normalized summary of the first Gemini candidate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PineScriptResponse {
    pub pine_script: String,
    pub token_count: u64,
    pub finish_reason: String,
    /// category -> probability label
    pub safety_ratings: HashMap<String, String>,
}
