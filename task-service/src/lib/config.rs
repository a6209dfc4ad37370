use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "JwtConfig::default_expiration_minutes")]
    pub expiration_minutes: i64,
}

impl JwtConfig {
    fn default_expiration_minutes() -> i64 {
        auth::JwtHandler::DEFAULT_TTL_MINUTES
    }

    /// Token lifetime as a duration.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.expiration_minutes)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }
        if self.jwt.expiration_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_minutes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiration_minutes: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/tasks".to_string(),
            },
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_minutes,
            },
        }
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        assert!(config("", 15).validate().is_err());
        assert!(config("   ", 15).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_expiration() {
        assert!(config("secret", 0).validate().is_err());
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        let config = config("secret", 15);
        assert!(config.validate().is_ok());
        assert_eq!(config.jwt.ttl().num_seconds(), 15 * 60);
    }
}
