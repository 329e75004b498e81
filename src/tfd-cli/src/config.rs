//! Configuration management for the tfd CLI
//!
//! Values come from three places, highest priority first: command-line
//! flags (and `TFD_API_KEY`), the TOML config file, built-in defaults.

use crate::cli::ExportArgs;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tfd_meta::{ExportSettings, Language, DEFAULT_BASE_URL};
use thiserror::Error;

/// Level at which weapons are compared when none is configured
pub const DEFAULT_TARGET_LEVEL: i64 = 100;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No API key configured (use `tfd configure --api-key KEY` or set TFD_API_KEY)")]
    MissingApiKey,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Get the path to the default config file
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("tfd");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }
}

/// Fully resolved run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub language: Language,
    pub base_url: String,
    pub export: ExportSettings,
}

impl Settings {
    /// Merge flags over the config file over defaults.
    ///
    /// Fails when no API key is available anywhere.
    pub fn resolve(config: &Config, args: &ExportArgs) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .as_ref()
            .or(config.api_key.as_ref())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let output_dir = args
            .output_dir
            .clone()
            .or_else(|| config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let target_level = args
            .level
            .or(config.target_level)
            .unwrap_or(DEFAULT_TARGET_LEVEL);

        Ok(Settings {
            api_key,
            language: args.language.or(config.language).unwrap_or_default(),
            base_url: args
                .base_url
                .clone()
                .or_else(|| config.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            export: ExportSettings::new(output_dir, target_level),
        })
    }
}
