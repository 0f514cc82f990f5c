//! Per-tier configuration files.
//!
//! Every deployment tier has one `<tier>.yaml` under the configured
//! directory. Local tiers are bound as written; all others have their
//! indirection tags resolved first.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::domain::errors::ResolveError;
use crate::domain::models::{Document, Settings};
use crate::domain::ports::KeyLookup;
use crate::services::{bind, resolve_document};

/// Environment variable naming the active tier
pub const TIER_ENV_VAR: &str = "TIER";

/// Loads tier files according to [`Settings`]
#[derive(Debug, Clone)]
pub struct TierLoader {
    settings: Settings,
}

impl TierLoader {
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Picks the tier: `explicit`, else `$TIER`, else the configured tier
    pub fn select_tier(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| std::env::var(TIER_ENV_VAR).ok())
            .map(|tier| tier.trim().to_string())
            .filter(|tier| !tier.is_empty())
            .unwrap_or_else(|| self.settings.tier.clone())
    }

    /// Path of the file backing `tier`
    pub fn tier_path(&self, tier: &str) -> PathBuf {
        self.settings.config_dir.join(format!("{tier}.yaml"))
    }

    /// Reads the tier file and resolves it unless the tier is local
    pub fn load_document<L>(&self, tier: &str, lookup: &L) -> Result<Document>
    where
        L: KeyLookup + ?Sized,
    {
        let path = self.tier_path(tier);
        let raw = std::fs::read(&path)
            .with_context(|| format!("Failed to read tier file {}", path.display()))?;

        let document = if self.settings.is_local_tier(tier) {
            debug!(tier, path = %path.display(), "local tier, skipping indirection");
            Document::from_yaml_slice(&raw)
        } else {
            resolve_document(&raw, &self.settings.tag_name, lookup)
        }
        .with_context(|| format!("Failed to load tier '{tier}' from {}", path.display()))?;

        info!(tier, path = %path.display(), "tier configuration loaded");
        Ok(document)
    }

    /// Loads `tier` and binds it onto `T`
    pub fn load<T, L>(&self, tier: &str, lookup: &L) -> Result<T>
    where
        T: DeserializeOwned,
        L: KeyLookup + ?Sized,
    {
        let document = self.load_document(tier, lookup)?;
        bind(document)
            .map_err(ResolveError::from)
            .with_context(|| format!("Failed to bind tier '{tier}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::LookupError;

    fn never_called(key: &str) -> Result<String, LookupError> {
        panic!("lookup should not be called, got {key}")
    }

    #[test]
    fn test_tier_path() {
        let loader = TierLoader::new(Settings::default());
        assert_eq!(
            loader.tier_path("production"),
            PathBuf::from("config/tier/production.yaml")
        );
    }

    #[test]
    fn test_select_tier_precedence() {
        let loader = TierLoader::new(Settings::default());

        temp_env::with_var(TIER_ENV_VAR, Some("staging"), || {
            assert_eq!(loader.select_tier(Some("production")), "production");
            assert_eq!(loader.select_tier(None), "staging");
        });
        temp_env::with_var_unset(TIER_ENV_VAR, || {
            assert_eq!(loader.select_tier(None), "development");
            assert_eq!(loader.select_tier(Some("  ")), "development");
        });
    }

    #[test]
    fn test_missing_tier_file_names_path() {
        let loader = TierLoader::new(Settings {
            config_dir: PathBuf::from("/nonexistent/tiers"),
            ..Settings::default()
        });
        let err = loader.load_document("sit", &never_called).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tiers/sit.yaml"));
    }
}
