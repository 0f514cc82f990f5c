use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_yaml::Value;

use super::map::MapLookup;
use crate::domain::ports::{KeyLookup, LookupError};

/// Lookup over a flat key file
///
/// The file is a single YAML (or JSON) mapping of keys to scalar values.
/// Numbers and booleans are handed out in their textual form.
#[derive(Debug, Clone)]
pub struct FileLookup {
    path: PathBuf,
    keys: MapLookup,
}

impl FileLookup {
    /// Reads and parses the key file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file {}", path.display()))?;
        let keys = parse_key_file(&text)
            .with_context(|| format!("Failed to parse key file {}", path.display()))?;

        tracing::debug!(path = %path.display(), keys = keys.len(), "key file loaded");
        Ok(Self {
            path: path.to_path_buf(),
            keys,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyLookup for FileLookup {
    fn lookup(&self, key: &str) -> Result<String, LookupError> {
        self.keys.lookup(key)
    }
}

fn parse_key_file(text: &str) -> Result<MapLookup> {
    if text.trim().is_empty() {
        return Ok(MapLookup::new());
    }

    let value: Value = serde_yaml::from_str(text)?;
    let entries = match value {
        Value::Mapping(entries) => entries,
        Value::Null => return Ok(MapLookup::new()),
        _ => bail!("key file must contain a mapping of keys to values"),
    };

    let mut keys = MapLookup::new();
    for (key, value) in entries {
        let Value::String(key) = key else {
            bail!("key file keys must be strings, found {key:?}");
        };
        let value = match value {
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null => String::new(),
            Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
                bail!("value of key '{key}' must be a scalar")
            }
        };
        keys.insert(key, value);
    }
    Ok(keys)
}
