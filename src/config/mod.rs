// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{RelayError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    ///
    /// The API key always comes from `GOOGLE_API_KEY` when it is set.
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(
                File::with_name(&Self::default_config_path())
                    .required(false)
            )
            // Override with environment variables (prefix: GEMINI_RELAY_)
            .add_source(
                Environment::with_prefix("GEMINI_RELAY")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()
            .map_err(|e| RelayError::Config(e.to_string()))?;

        let mut config: AppConfig = config
            .try_deserialize()
            .map_err(|e| RelayError::Config(e.to_string()))?;

        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            config.gemini.api_key = api_key;
        }

        Ok(config)
    }

    /// Fail early when no credential is available.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(RelayError::Config(format!(
                "{} is not set",
                API_KEY_ENV
            )));
        }
        Ok(())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gemini-relay")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_body_bytes, None);
        assert_eq!(
            config.gemini.api_base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_validate_requires_api_key() {
        let mut config = AppConfig::default();
        assert!(matches!(config.validate(), Err(RelayError::Config(_))));

        config.gemini.api_key = "   ".to_string();
        assert!(config.validate().is_err());

        config.gemini.api_key = "AIzaTestKey".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let mut config = AppConfig::default();
        config.gemini.api_key = "AIzaSecret".to_string();

        let dumped = serde_json::to_string(&config).unwrap();
        assert!(!dumped.contains("AIzaSecret"));
    }
}
