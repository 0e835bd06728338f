//! Configuration management for wxbridge

pub mod file;

use std::time::Duration;

use crate::{Error, Result};

/// Default Tuling OpenAPI endpoint
pub const DEFAULT_TULING_URL: &str = "http://www.tuling123.com/openapi/api";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Tuling reply bridge configuration
#[derive(Debug, Clone)]
pub struct TulingConfig {
    /// API key (from `TULING_API_KEY` env)
    pub api_key: Option<String>,

    /// API endpoint (from `TULING_API_URL` env)
    pub url: String,

    /// Request timeout (from `TULING_TIMEOUT_SECS` env)
    pub timeout: Duration,
}

impl Default for TulingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: DEFAULT_TULING_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TulingConfig {
    /// Load configuration (env > toml > default)
    #[must_use]
    pub fn load() -> Self {
        let fc = file::load_config_file();
        let mut config = Self::from_file_config(fc);

        if let Ok(key) = std::env::var("TULING_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("TULING_API_URL") {
            config.url = url;
        }
        if let Some(secs) = std::env::var("TULING_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }

    /// Build configuration from a parsed config file, without consulting env
    #[must_use]
    pub fn from_file_config(fc: file::WxbridgeConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            api_key: fc.tuling.api_key,
            url: fc.tuling.url.unwrap_or(defaults.url),
            timeout: fc
                .tuling
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        }
    }

    /// The configured API key
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no key is configured
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::Config("Tuling API key not set (TULING_API_KEY)".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::file::{TulingFileConfig, WxbridgeConfigFile};
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TulingConfig::default();
        assert_eq!(config.url, DEFAULT_TULING_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_file_overlay() {
        let config = TulingConfig::from_file_config(WxbridgeConfigFile {
            tuling: TulingFileConfig {
                api_key: Some("k".to_string()),
                url: None,
                timeout_secs: Some(2),
            },
        });

        assert_eq!(config.require_api_key().unwrap(), "k");
        assert_eq!(config.url, DEFAULT_TULING_URL);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_empty_key_rejected() {
        let config = TulingConfig {
            api_key: Some(String::new()),
            ..TulingConfig::default()
        };
        assert!(matches!(config.require_api_key(), Err(Error::Config(_))));
    }
}
