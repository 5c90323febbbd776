//! Configuration module
//!
//! - `auth` - Key file locations for signing and verification
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod environment;

use serde::{Deserialize, Serialize};

pub use auth::TokenConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete service configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    #[serde(default)]
    pub token: TokenConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            token: TokenConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            token: TokenConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_uses_development_logging() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.token, TokenConfig::default());
    }

    #[test]
    fn test_app_config_deserializes_partial_document() {
        let config: AppConfig = serde_json::from_str(
            r#"{"environment":"production","token":{"private_key_path":"k.pem"}}"#,
        )
        .unwrap();
        assert!(config.environment.is_production());
        assert!(config.token.private_key_path.is_some());
        assert_eq!(config.logging.level, "info");
    }
}
