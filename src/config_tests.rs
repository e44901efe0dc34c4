//! Unit tests for configuration structures and parsing.

#[cfg(test)]
mod config_tests {
    use crate::config::*;
    use crate::constants::{env, gemini};
    use crate::error::RelayError;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    // ============= Defaults Tests =============

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gemini.api_key, None);
        assert_eq!(config.gemini.api_url, gemini::DEFAULT_API_URL);
        assert_eq!(config.gemini.timeout_secs, 60);
        assert_eq!(config.cors.mode, CorsMode::Permissive);
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_bind_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };
        assert_eq!(server.bind_addr(), "127.0.0.1:9000");
    }

    // ============= YAML Tests =============

    #[test]
    fn test_yaml_full() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080
gemini:
  api_key: "abc"
  api_url: "http://localhost:9999/generate"
  timeout_secs: 5
cors:
  mode: restricted
  allowed_origins:
    - "https://app.example.com"
logging:
  level: debug
  format: json
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gemini.api_key.as_deref(), Some("abc"));
        assert_eq!(config.gemini.api_url, "http://localhost:9999/generate");
        assert_eq!(config.gemini.timeout_secs, 5);
        assert_eq!(config.cors.mode, CorsMode::Restricted);
        assert_eq!(config.cors.allowed_origins, vec!["https://app.example.com"]);
        assert_eq!(config.logging.format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let yaml = r#"
server:
  port: 3000
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.gemini.api_url, gemini::DEFAULT_API_URL);
    }

    #[test]
    fn test_yaml_with_bom() {
        let yaml = "\u{feff}server:\n  port: 1234\n";
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.server.port, 1234);
    }

    #[test]
    fn test_yaml_empty_is_default() {
        let config = AppConfig::from_yaml_str("   \n").unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_yaml_invalid() {
        let result = AppConfig::from_yaml_str("server: [1, 2");
        assert!(matches!(result, Err(RelayError::Configuration(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = AppConfig::from_file("/nonexistent/pine_relay/config.yaml").unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_cors_mode_disabled_deserialize() {
        let config = AppConfig::from_yaml_str("cors:\n  mode: disabled\n").unwrap();
        assert_eq!(config.cors.mode, CorsMode::Disabled);
    }

    // ============= Override Tests =============

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[
                (env::GEMINI_API_KEY, "secret"),
                (env::GEMINI_API_URL, "http://127.0.0.1:1/x"),
                (env::GEMINI_TIMEOUT_SECS, "7"),
                (env::HOST, "127.0.0.1"),
                (env::PORT, "8123"),
                (env::LOG_LEVEL, "debug"),
                (env::LOG_FORMAT, "json"),
            ]))
            .unwrap();

        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini.api_url, "http://127.0.0.1:1/x");
        assert_eq!(config.gemini.timeout_secs, 7);
        assert_eq!(config.server.bind_addr(), "127.0.0.1:8123");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_env_cors_origins_switch_to_restricted() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[(
                env::CORS_ORIGINS,
                "https://a.example, ,https://b.example",
            )]))
            .unwrap();

        assert_eq!(config.cors.mode, CorsMode::Restricted);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_env_bad_port() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(lookup_from(&[(env::PORT, "eighty")]));
        assert!(matches!(result, Err(RelayError::Configuration(_))));
    }

    #[test]
    fn test_no_overrides_keeps_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(|_| None).unwrap();
        assert_eq!(config.gemini.api_key, None);
        assert_eq!(config.server.port, 8000);
    }

    // ============= Validation Tests =============

    #[test]
    fn test_validate_bad_url() {
        let mut config = AppConfig::default();
        config.gemini.api_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(RelayError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = AppConfig::default();
        config.gemini.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_restricted_without_origins() {
        let mut config = AppConfig::default();
        config.cors.mode = CorsMode::Restricted;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_missing_key_is_not_fatal() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    // ============= GeminiConfig Tests =============

    #[test]
    fn test_api_key_missing() {
        let config = GeminiConfig::default();
        assert!(!config.has_api_key());
        match config.api_key() {
            Err(RelayError::Configuration(msg)) => assert!(msg.contains("GEMINI_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_api_key_blank() {
        let config = GeminiConfig::default().with_api_key("   ");
        assert!(matches!(config.api_key(), Err(RelayError::Configuration(_))));
    }

    #[test]
    fn test_api_key_present() {
        let config = GeminiConfig::default().with_api_key("k-123");
        assert_eq!(config.api_key().unwrap(), "k-123");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiConfig::default().with_api_key("super-secret-key");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret-key"));
        assert!(printed.contains("<redacted>"));

        let unset = format!("{:?}", GeminiConfig::default());
        assert!(unset.contains("<unset>"));
    }

    #[test]
    fn test_timeout_duration() {
        let config = GeminiConfig::default().with_timeout_secs(3);
        assert_eq!(config.timeout().as_secs(), 3);
    }
}
