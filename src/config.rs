use serde::Deserialize;
use std::fmt;
use std::fs;
use std::time::Duration;
use tracing_subscriber::{fmt as log_fmt, EnvFilter};
use url::Url;

use crate::constants::{env, gemini, server};
use crate::error::{RelayError, Result};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: server::DEFAULT_HOST.to_string(),
            port: server::DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: gemini::DEFAULT_API_URL.to_string(),
            timeout_secs: gemini::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

// Never print the credential.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.api_key.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => "<redacted>",
            _ => "<unset>",
        };
        f.debug_struct("GeminiConfig")
            .field("api_key", &key)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeminiConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The credential, or a configuration error when it is missing or blank.
    pub fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(RelayError::Configuration(format!(
                "{} is not set",
                env::GEMINI_API_KEY
            ))),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_ok()
    }

    pub fn endpoint(&self) -> Result<Url> {
        Url::parse(&self.api_url).map_err(|e| {
            RelayError::Configuration(format!("invalid Gemini API URL '{}': {}", self.api_url, e))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorsMode {
    /// Any origin, method and header, credentials allowed. Development only.
    #[default]
    Permissive,
    /// Only `allowed_origins`, credentials allowed.
    Restricted,
    Disabled,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CorsConfig {
    pub mode: CorsMode,
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl LoggingConfig {
    /// Install the global subscriber. `RUST_LOG` wins over `level`.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let result = match self.format.as_str() {
            "json" => log_fmt().json().with_env_filter(filter).try_init(),
            _ => log_fmt().with_env_filter(filter).try_init(),
        };
        if let Err(e) = result {
            eprintln!("tracing subscriber already installed: {}", e);
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// `.env`, then the optional YAML file, then environment overrides.
    pub fn load() -> Result<Self> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();

        let path = std::env::var(env::CONFIG_PATH)
            .unwrap_or_else(|_| server::DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when the file does not exist.
    pub fn from_file(path: &str) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_yaml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(RelayError::Configuration(format!(
                "failed to read {}: {}",
                path, e
            ))),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| RelayError::Configuration(format!("failed to parse config: {}", e)))
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(env::GEMINI_API_KEY) {
            self.gemini.api_key = Some(key);
        }
        if let Some(url) = lookup(env::GEMINI_API_URL) {
            self.gemini.api_url = url;
        }
        if let Some(secs) = lookup(env::GEMINI_TIMEOUT_SECS) {
            self.gemini.timeout_secs = parse_number(env::GEMINI_TIMEOUT_SECS, &secs)?;
        }
        if let Some(host) = lookup(env::HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(env::PORT) {
            self.server.port = parse_number(env::PORT, &port)?;
        }
        if let Some(origins) = lookup(env::CORS_ORIGINS) {
            self.cors.mode = CorsMode::Restricted;
            self.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(level) = lookup(env::LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(env::LOG_FORMAT) {
            self.logging.format = format;
        }
        Ok(())
    }

    /// Startup checks. A missing credential is not fatal here; calls fail instead.
    pub fn validate(&self) -> Result<()> {
        self.gemini.endpoint()?;
        if self.gemini.timeout_secs == 0 {
            return Err(RelayError::Configuration(
                "gemini.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.cors.mode == CorsMode::Restricted && self.cors.allowed_origins.is_empty() {
            return Err(RelayError::Configuration(
                "cors.allowed_origins must not be empty in restricted mode".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RelayError::Configuration(format!("{} must be a number, got '{}'", name, value)))
}
