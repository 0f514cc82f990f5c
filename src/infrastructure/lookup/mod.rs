//! Key lookup adapters
//!
//! Implementations of the [`KeyLookup`](crate::domain::ports::KeyLookup)
//! port:
//! - `MapLookup`: in-memory key table
//! - `EnvLookup`: process environment
//! - `FileLookup`: flat YAML or JSON key file
//!
//! Every adapter trims surrounding whitespace from the key first.

pub mod env;
pub mod file;
pub mod map;

pub use env::EnvLookup;
pub use file::FileLookup;
pub use map::MapLookup;

use anyhow::{Context, Result};

use crate::domain::models::{LookupSettings, LookupSource};
use crate::domain::ports::KeyLookup;

/// Builds the lookup adapter selected by `settings`
pub fn from_settings(settings: &LookupSettings) -> Result<Box<dyn KeyLookup>> {
    let lookup: Box<dyn KeyLookup> = match settings.source {
        LookupSource::Env => Box::new(EnvLookup::with_prefix(settings.env_prefix.clone())),
        LookupSource::File => {
            let path = settings
                .keys_file
                .as_ref()
                .context("Lookup source 'file' requires a keys file")?;
            Box::new(FileLookup::load(path)?)
        }
        LookupSource::Map => Box::new(MapLookup::from(settings.keys.clone())),
    };
    tracing::debug!(source = %settings.source, "key lookup configured");
    Ok(lookup)
}
