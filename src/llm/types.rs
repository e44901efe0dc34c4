//! Gemini `generateContent` wire types.
//!
//! Response fields are optional on purpose: a 2xx body missing any of the
//! fields we need must become a `MalformedUpstreamResponse`, never a panic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{RelayError, Result};
use crate::models::PineScriptResponse;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    /// The prompt as the sole content part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
    pub safety_ratings: Option<Vec<SafetyRating>>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    pub parts: Option<Vec<Part>>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u64>,
    pub candidates_token_count: Option<u64>,
    pub total_token_count: Option<u64>,
}

fn missing(field: &str) -> RelayError {
    RelayError::MalformedUpstreamResponse(format!("missing {}", field))
}

impl GenerateContentResponse {
    /// Reshape the first candidate into the relay's response contract.
    pub fn into_pine_script_response(self) -> Result<PineScriptResponse> {
        let token_count = self
            .usage_metadata
            .and_then(|u| u.total_token_count)
            .ok_or_else(|| missing("usageMetadata.totalTokenCount"))?;

        let candidate = self
            .candidates
            .ok_or_else(|| missing("candidates"))?
            .into_iter()
            .next()
            .ok_or_else(|| missing("candidates[0]"))?;

        let pine_script = candidate
            .content
            .and_then(|c| c.parts)
            .and_then(|parts| parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| missing("candidates[0].content.parts[0].text"))?;

        let finish_reason = candidate
            .finish_reason
            .ok_or_else(|| missing("candidates[0].finishReason"))?;

        // Later duplicates win
        let safety_ratings: HashMap<String, String> = candidate
            .safety_ratings
            .ok_or_else(|| missing("candidates[0].safetyRatings"))?
            .into_iter()
            .map(|r| (r.category, r.probability))
            .collect();

        Ok(PineScriptResponse {
            pine_script,
            token_count,
            finish_reason,
            safety_ratings,
        })
    }
}
