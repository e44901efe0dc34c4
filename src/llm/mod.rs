pub mod types;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::GeminiConfig;
use crate::constants::gemini::{API_KEY_PARAM, CONNECT_TIMEOUT};
use crate::error::{RelayError, Result};

pub use types::{GenerateContentRequest, GenerateContentResponse};

/// Thin client over the Gemini `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                RelayError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// One POST per call. Non-2xx statuses are returned without reading the body.
    pub async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse> {
        // Checked before any network activity
        let api_key = self.config.api_key()?;
        let mut url = self.config.endpoint()?;
        url.query_pairs_mut().append_pair(API_KEY_PARAM, api_key);

        info!(
            "🤖 [GEMINI] Sending generateContent request ({} prompt chars)...",
            prompt.chars().count()
        );

        let response = self
            .client
            .post(url)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("⚠️ [GEMINI] Upstream returned {}", status);
            return Err(RelayError::upstream_status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        debug!("[GEMINI] Response received ({} bytes)", body.len());

        let parsed: GenerateContentResponse = serde_json::from_slice(&body)?;
        info!("🤖 [GEMINI] Response received.");
        Ok(parsed)
    }
}

// reqwest errors carry the request URL, which holds the key.
fn transport_error(err: reqwest::Error) -> RelayError {
    let err = err.without_url();
    warn!("⚠️ [GEMINI] Transport error: {}", err);
    RelayError::from(err)
}
