//! Generic in-memory form of a configuration document.
//!
//! A [`Document`] is what a YAML file looks like after parsing but before it
//! is bound onto a typed structure. The resolver rewrites it in place.

use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};
use serde_yaml::Value;

use super::key_path::KeyPath;
use crate::domain::errors::{ResolveError, ResolveResult};

/// Mapping entries keyed by their textual key
pub type Mapping = BTreeMap<String, Document>;

#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Document>),
    Mapping(Mapping),
}

impl Document {
    /// Parses a YAML buffer whose root must be a mapping.
    ///
    /// An empty document is read as an empty mapping.
    pub fn from_yaml_slice(bytes: &[u8]) -> ResolveResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::Mapping(Mapping::new()));
        }

        let value: Value = serde_yaml::from_slice(bytes)?;
        match Self::from_yaml_value(value, &KeyPath::root())? {
            Self::Null => Ok(Self::Mapping(Mapping::new())),
            document @ Self::Mapping(_) => Ok(document),
            other => Err(ResolveError::deserialization(format!(
                "expected a mapping at the document root, found a {}",
                other.kind()
            ))),
        }
    }

    pub fn from_yaml_str(text: &str) -> ResolveResult<Self> {
        Self::from_yaml_slice(text.as_bytes())
    }

    fn from_yaml_value(value: Value, path: &KeyPath) -> ResolveResult<Self> {
        let document = match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Self::Int(int)
                } else if number.is_u64() {
                    return Err(ResolveError::deserialization(format!(
                        "integer {number} at {path} does not fit in a signed 64-bit value"
                    )));
                } else {
                    match number.as_f64() {
                        Some(float) => Self::Float(float),
                        None => {
                            return Err(ResolveError::deserialization(format!(
                                "unrepresentable number {number} at {path}"
                            )))
                        }
                    }
                }
            }
            Value::String(text) => Self::String(text),
            Value::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| Self::from_yaml_value(item, &path.index(index)))
                    .collect::<ResolveResult<_>>()?,
            ),
            Value::Mapping(entries) => {
                let mut mapping = Mapping::new();
                for (key, value) in entries {
                    let key = mapping_key(key, path)?;
                    let value = Self::from_yaml_value(value, &path.key(key.as_str()))?;
                    if mapping.contains_key(&key) {
                        return Err(ResolveError::deserialization(format!(
                            "duplicate key {key:?} in mapping at {path}"
                        )));
                    }
                    mapping.insert(key, value);
                }
                Self::Mapping(mapping)
            }
            Value::Tagged(tagged) => Self::from_yaml_value(tagged.value, path)?,
        };
        Ok(document)
    }

    /// Short name of the variant, for diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a direct child of a mapping
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping().and_then(|mapping| mapping.get(key))
    }
}

/// Element kind a walked sequence must hold, decided by its first element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Mappings,
    /// Strings, with null elements read as empty strings
    Strings,
}

impl SequenceKind {
    /// `None` for sequences that are passed through untouched
    pub const fn of(items: &[Document]) -> Option<Self> {
        match items.first() {
            Some(Document::Mapping(_)) => Some(Self::Mappings),
            Some(Document::String(_)) => Some(Self::Strings),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mappings => "mapping",
            Self::Strings => "string",
        }
    }

    pub const fn admits(self, item: &Document) -> bool {
        matches!(
            (self, item),
            (Self::Mappings, Document::Mapping(_))
                | (Self::Strings, Document::String(_) | Document::Null)
        )
    }

    /// Fails with `MixedSequence` when element `index` of the sequence at
    /// `path` does not fit this kind
    pub fn check(self, item: &Document, path: &KeyPath, index: usize) -> ResolveResult<()> {
        if self.admits(item) {
            Ok(())
        } else {
            Err(ResolveError::MixedSequence {
                path: path.clone(),
                index,
                expected: self.name(),
                found: item.kind(),
            })
        }
    }
}

/// Mapping keys are always text once parsed; scalar keys keep their
/// YAML spelling and a null key becomes the empty string.
fn mapping_key(key: Value, path: &KeyPath) -> ResolveResult<String> {
    match key {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        Value::Tagged(tagged) => mapping_key(tagged.value, path),
        Value::Sequence(_) | Value::Mapping(_) => Err(ResolveError::deserialization(format!(
            "unsupported non-scalar mapping key in mapping at {path}"
        ))),
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Int(int) => serializer.serialize_i64(*int),
            Self::Float(float) => serializer.serialize_f64(*float),
            Self::String(text) => serializer.serialize_str(text),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(mapping) => serializer.collect_map(mapping),
        }
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::String(text.to_string())
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for Document {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Document {
    fn from(int: i64) -> Self {
        Self::Int(int)
    }
}

impl From<f64> for Document {
    fn from(float: f64) -> Self {
        Self::Float(float)
    }
}

impl From<Vec<Self>> for Document {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Document {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}
