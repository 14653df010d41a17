use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credentials::KaggleCredentials;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Kaggle credentials are not configured: set KAGGLE_USERNAME and KAGGLE_KEY")]
    MissingCredentials,

    #[error("PORT must be non-zero")]
    InvalidPort,
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Deployment label echoed in logs and /health ("development", "production", ...).
    pub environment: String,
    pub server: ServerConfig,
    pub kaggle: KaggleConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            environment: env_or("ENVIRONMENT", "development"),
            server: ServerConfig::from_env(),
            kaggle: KaggleConfig::from_env(),
        }
    }

    /// Reject configs that cannot serve any authenticated request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.kaggle.credentials.is_configured() {
            return Err(ConfigError::MissingCredentials);
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        Ok(())
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (environment: {}):", self.environment);
        tracing::info!("  server:  host={}, port={}", self.server.host, self.server.port);
        tracing::info!(
            "  kaggle:  username={}, key={}, bin={}, api_base={}",
            set_marker(self.kaggle.credentials.username.is_some()),
            set_marker(self.kaggle.credentials.key.is_some()),
            self.kaggle.bin,
            self.kaggle.api_base,
        );
    }

    /// Return a redacted view safe for API responses (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "environment": self.environment,
            "server": { "host": self.server.host, "port": self.server.port },
            "kaggle": {
                "bin": self.kaggle.bin,
                "api_base": self.kaggle.api_base,
                "configured": self.kaggle.credentials.is_configured(),
            },
        })
    }
}

fn set_marker(present: bool) -> &'static str {
    if present { "(set)" } else { "(missing)" }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8080),
        }
    }
}

// ── Kaggle ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KaggleConfig {
    pub credentials: KaggleCredentials,
    /// Kaggle CLI binary name or path.
    pub bin: String,
    /// REST base URL used by the credential probe.
    pub api_base: String,
}

impl KaggleConfig {
    fn from_env() -> Self {
        Self {
            credentials: KaggleCredentials::new(env_opt("KAGGLE_USERNAME"), env_opt("KAGGLE_KEY")),
            bin: env_or("KAGGLE_BIN", "kaggle"),
            api_base: env_or("KAGGLE_API_BASE", "https://www.kaggle.com/api/v1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(credentials: KaggleCredentials, port: u16) -> Config {
        Config {
            environment: "test".to_string(),
            server: ServerConfig { host: "127.0.0.1".to_string(), port },
            kaggle: KaggleConfig {
                credentials,
                bin: "kaggle".to_string(),
                api_base: "https://www.kaggle.com/api/v1".to_string(),
            },
        }
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let config = config_with(KaggleCredentials::new(None, None), 8080);
        assert!(matches!(config.validate(), Err(ConfigError::MissingCredentials)));
    }

    #[test]
    fn validate_rejects_port_zero() {
        let creds = KaggleCredentials::new(Some("alice".into()), Some("k3y".into()));
        let config = config_with(creds, 0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPort)));
    }

    #[test]
    fn validate_accepts_configured_credentials() {
        let creds = KaggleCredentials::new(Some("alice".into()), Some("k3y".into()));
        assert!(config_with(creds, 8080).validate().is_ok());
    }

    #[test]
    fn redacted_summary_never_contains_secrets() {
        let creds = KaggleCredentials::new(Some("alice".into()), Some("s3cret-key".into()));
        let summary = config_with(creds, 8080).redacted_summary().to_string();
        assert!(!summary.contains("s3cret-key"));
        assert!(!summary.contains("alice"));
        assert!(summary.contains("\"configured\":true"));
    }
}
