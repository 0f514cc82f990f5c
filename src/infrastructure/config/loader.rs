use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::indirection::TAG_SEPARATOR;
use crate::domain::models::{LookupSource, Settings};

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "ccms-config.yaml";

/// Optional local overrides, merged over [`SETTINGS_FILE`]
pub const LOCAL_SETTINGS_FILE: &str = "ccms-config.local.yaml";

/// Prefix of environment variables that override settings
pub const ENV_PREFIX: &str = "CCMS_CONFIG_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Tag name cannot be empty")]
    EmptyTagName,

    #[error("Invalid tag name: {0}. Must not contain '|'")]
    InvalidTagName(String),

    #[error("Tier cannot be empty")]
    EmptyTier,

    #[error("Config directory cannot be empty")]
    EmptyConfigDir,

    #[error("Lookup source 'file' requires lookup.keys_file to be set")]
    MissingKeysFile,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Settings loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. ccms-config.yaml in the working directory
    /// 3. ccms-config.local.yaml (optional overrides)
    /// 4. Environment variables (CCMS_CONFIG_* prefix, `__` for nesting)
    pub fn load() -> Result<Settings> {
        let settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(SETTINGS_FILE))
            .merge(Yaml::file(LOCAL_SETTINGS_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract settings from figment")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Load settings from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }

        let settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Validate settings after loading
    pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
        if settings.tag_name.is_empty() {
            return Err(ConfigError::EmptyTagName);
        }
        if settings.tag_name.contains(TAG_SEPARATOR) {
            return Err(ConfigError::InvalidTagName(settings.tag_name.clone()));
        }

        if settings.tier.trim().is_empty() {
            return Err(ConfigError::EmptyTier);
        }
        if settings.config_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyConfigDir);
        }

        if settings.lookup.source == LookupSource::File && settings.lookup.keys_file.is_none() {
            return Err(ConfigError::MissingKeysFile);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&settings.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(settings.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&settings.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(settings.logging.format.clone()));
        }

        Ok(())
    }
}
