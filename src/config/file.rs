//! TOML configuration file loading
//!
//! Supports `~/.config/wxbridge/config.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct WxbridgeConfigFile {
    /// Tuling reply bridge configuration
    #[serde(default)]
    pub tuling: TulingFileConfig,
}

/// Tuling reply bridge configuration
#[derive(Debug, Default, Deserialize)]
pub struct TulingFileConfig {
    /// Tuling API key
    pub api_key: Option<String>,

    /// API endpoint override
    pub url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Load the TOML config file from the standard path
///
/// Returns `WxbridgeConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file() -> WxbridgeConfigFile {
    config_file_path().map_or_else(WxbridgeConfigFile::default, |path| load_config_from(&path))
}

/// Load a TOML config file from an explicit path
///
/// Returns `WxbridgeConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_from(path: &Path) -> WxbridgeConfigFile {
    match read_config_file(path) {
        Ok(Some(config)) => {
            tracing::info!(path = %path.display(), "loaded config file");
            config
        }
        Ok(None) => WxbridgeConfigFile::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
            WxbridgeConfigFile::default()
        }
    }
}

/// Read and parse a TOML config file, `None` if it doesn't exist
///
/// # Errors
///
/// Returns `Error::Io` if the file can't be read, `Error::Toml` if it isn't
/// valid config
pub fn read_config_file(path: &Path) -> Result<Option<WxbridgeConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Return the config file path: `~/.config/wxbridge/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("wxbridge").join("config.toml"))
}
