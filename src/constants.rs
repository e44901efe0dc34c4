//! Application-wide constants
//!
//! Prompt text, upstream endpoint defaults, environment variable names and
//! server defaults live here so they can be tuned in one place.

use std::time::Duration;

/// Gemini upstream constants
pub mod gemini {
    use super::*;

    /// Default `generateContent` endpoint
    pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

    /// Query parameter carrying the credential
    pub const API_KEY_PARAM: &str = "key";

    /// Upper bound for a whole generation call
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Upper bound for establishing the TCP/TLS connection
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Prompt template pieces. The logic text goes verbatim between them.
pub mod prompt {
    pub const PREFIX: &str = "Generate a Pine Script based on the following trading logic: ";

    pub const SUFFIX: &str = "\nMake sure the script is complete and can be directly used in TradingView.";
}

/// Client-facing error details
pub mod detail {
    pub const UPSTREAM_FAILED: &str = "Gemini API request failed";
    pub const UPSTREAM_TIMEOUT: &str = "Gemini API request timed out";
    pub const UPSTREAM_UNREACHABLE: &str = "Gemini API is unreachable";
    pub const MALFORMED_RESPONSE: &str = "Malformed response from Gemini API";
    pub const NOT_CONFIGURED: &str = "Server is not configured for Gemini API access";
}

/// Environment variable names
pub mod env {
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const GEMINI_API_URL: &str = "GEMINI_API_URL";
    pub const GEMINI_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";
    pub const CONFIG_PATH: &str = "PINE_RELAY_CONFIG";
    pub const HOST: &str = "PINE_RELAY_HOST";
    pub const PORT: &str = "PINE_RELAY_PORT";
    /// Comma separated. Setting it switches CORS to the restricted mode.
    pub const CORS_ORIGINS: &str = "PINE_RELAY_CORS_ORIGINS";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}

/// HTTP server defaults
pub mod server {
    pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8000;
}
