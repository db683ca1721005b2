//! Configuration management for sibyld.
//!
//! Loads settings from /etc/sibyl/config.toml or uses defaults. The provider
//! API key can be set in the file but is normally taken from the
//! OPENAI_API_KEY environment variable at startup.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sibyl_common::ProviderConfig;
use std::fs;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/sibyl/config.toml";

/// Environment variable overriding the provider API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    // Localhost only; exposure is a deployment decision
    "127.0.0.1:7878".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Config {
    /// Load config from file, or return defaults
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_PATH).unwrap_or_else(|e| {
            warn!("Config not found, using defaults: {}", e);
            Config::default()
        })
    }

    /// Load config from specific path
    pub fn load_from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path);
        Ok(config)
    }

    /// Provider config with the API key resolved from the environment.
    /// An environment key wins over a file key.
    pub fn resolved_provider(&self) -> ProviderConfig {
        let mut provider = self.provider.clone();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                provider.api_key = Some(key);
            }
        }
        provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:7878");
        assert_eq!(config.provider.model, "gpt-4");
        assert_eq!(config.provider.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_path_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\ntimeout_secs = 10").unwrap();

        let config = Config::load_from_path(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.provider.timeout_secs, 10);
        // Unset fields and the missing [server] section fall back to defaults
        assert_eq!(config.provider.model, "gpt-4");
        assert_eq!(config.server.bind_addr, "127.0.0.1:7878");
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Config::load_from_path("/nonexistent/sibyl.toml").is_err());
    }
}
