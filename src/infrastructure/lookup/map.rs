use std::collections::{BTreeMap, HashMap};

use crate::domain::ports::{KeyLookup, LookupError};

/// Lookup over an in-memory key table
#[derive(Debug, Clone, Default)]
pub struct MapLookup {
    values: HashMap<String, String>,
}

impl MapLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapLookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for MapLookup {
    fn from(values: BTreeMap<String, String>) -> Self {
        values.into_iter().collect()
    }
}

impl KeyLookup for MapLookup {
    fn lookup(&self, key: &str) -> Result<String, LookupError> {
        let key = key.trim();
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit_and_miss() {
        let lookup: MapLookup = [("DB_HOST", "db.internal")].into_iter().collect();

        assert_eq!(lookup.lookup("DB_HOST").unwrap(), "db.internal");
        match lookup.lookup("DB_PORT") {
            Err(LookupError::NotFound(key)) => assert_eq!(key, "DB_PORT"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_key_is_trimmed() {
        let mut lookup = MapLookup::new();
        lookup.insert("TIMEOUT", "30");
        assert_eq!(lookup.lookup("  TIMEOUT ").unwrap(), "30");
    }

    #[test]
    fn test_from_btree_map() {
        let mut keys = BTreeMap::new();
        keys.insert("A".to_string(), "1".to_string());
        keys.insert("B".to_string(), "2".to_string());

        let lookup = MapLookup::from(keys);
        assert_eq!(lookup.len(), 2);
        assert!(!lookup.is_empty());
        assert_eq!(lookup.lookup("B").unwrap(), "2");
    }
}
