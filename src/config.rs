//! Server configuration from environment variables and an optional TOML file.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Application configuration.
///
/// File values are loaded first, then environment variables override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Server bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path to a forecast CSV to preload at startup.
    #[serde(default)]
    pub feed_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            feed_path: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }

    /// Apply environment overrides.
    ///
    /// # Environment Variables
    /// - `HOST`: server bind host
    /// - `PORT`: server bind port
    /// - `SWOPS_FEED_PATH`: forecast CSV to preload at startup
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = env::var("HOST") {
            self.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            self.port = port;
        }
        if let Ok(path) = env::var("SWOPS_FEED_PATH") {
            self.feed_path = Some(path);
        }
        self
    }

    /// Resolve the effective configuration: optional file (from
    /// `SWOPS_CONFIG` or `./swops.toml`), then environment overrides.
    pub fn load() -> Self {
        let file_path = env::var("SWOPS_CONFIG").unwrap_or_else(|_| "swops.toml".to_string());

        let base = if Path::new(&file_path).exists() {
            match Self::from_toml_file(&file_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("{}; using defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        base.with_env_overrides()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.feed_path.is_none());
    }

    #[test]
    fn test_toml_partial_override() {
        let config: AppConfig = toml::from_str("port = 9000\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_toml_full() {
        let config: AppConfig =
            toml::from_str("host = \"127.0.0.1\"\nport = 3000\nfeed_path = \"data/feed.csv\"\n")
                .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.feed_path.as_deref(), Some("data/feed.csv"));
    }
}
