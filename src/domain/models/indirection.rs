//! Indirection tag grammar and typed coercion of looked-up values.
//!
//! A tag is a string of the form `namespace|key` or `namespace|type|key`.
//! Only tags whose namespace matches the configured tag name are resolved;
//! everything else is a literal value.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::document::Document;
use super::key_path::KeyPath;
use crate::domain::errors::{ConversionError, ResolveError, ResolveResult};

/// Separator between tag segments
pub const TAG_SEPARATOR: char = '|';

/// Largest number of segments a well-formed tag can have
pub const MAX_TAG_SEGMENTS: usize = 3;

/// A parsed indirection tag borrowing from the original string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndirectionTag<'a> {
    /// Key handed to the lookup
    pub key: &'a str,
    /// Requested type name, exactly as written in the document
    pub type_name: Option<&'a str>,
}

impl<'a> IndirectionTag<'a> {
    /// Parses `text` as a tag in namespace `tag_name`.
    ///
    /// Returns `Ok(None)` when `text` is a literal value. More than three
    /// segments is an error whatever the namespace.
    pub fn parse(text: &'a str, tag_name: &str, path: &KeyPath) -> ResolveResult<Option<Self>> {
        let segments: Vec<&str> = text.split(TAG_SEPARATOR).collect();
        if segments.len() > MAX_TAG_SEGMENTS {
            return Err(ResolveError::MalformedTag {
                path: path.clone(),
                value: text.to_string(),
                segments: segments.len(),
            });
        }

        if !segments[0].eq_ignore_ascii_case(tag_name) {
            return Ok(None);
        }

        let tag = match segments.as_slice() {
            [_, key] => Self {
                key: *key,
                type_name: None,
            },
            [_, type_name, key] => Self {
                key: *key,
                type_name: Some(*type_name),
            },
            _ => return Ok(None),
        };
        Ok(Some(tag))
    }

    /// The type the looked-up value must be coerced to, `None` for plain strings
    pub fn scalar_type(&self, path: &KeyPath) -> ResolveResult<Option<ScalarType>> {
        self.type_name
            .map(|name| {
                name.parse::<ScalarType>()
                    .map_err(|_| ResolveError::UnsupportedType {
                        path: path.clone(),
                        type_name: name.to_string(),
                    })
            })
            .transpose()
    }
}

/// Scalar types a looked-up value can be coerced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Bool,
    Int,
    Int32,
    Int64,
    Float32,
    Float64,
}

#[derive(Debug, Error)]
#[error("unsupported scalar type: {0}")]
pub struct UnsupportedScalarType(pub String);

impl FromStr for ScalarType {
    type Err = UnsupportedScalarType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "bool" => Ok(Self::Bool),
            "int" => Ok(Self::Int),
            "int32" => Ok(Self::Int32),
            "int64" => Ok(Self::Int64),
            "float32" => Ok(Self::Float32),
            "float64" => Ok(Self::Float64),
            _ => Err(UnsupportedScalarType(s.to_string())),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ScalarType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    /// Converts a looked-up string into a document scalar of this type
    pub fn coerce(self, raw: &str) -> Result<Document, ConversionError> {
        let document = match self {
            Self::String => Document::String(raw.to_string()),
            Self::Bool => Document::Bool(parse_bool(raw)?),
            Self::Int | Self::Int64 => Document::Int(parse_int::<i64>(raw)?),
            Self::Int32 => Document::Int(i64::from(parse_int::<i32>(raw)?)),
            Self::Float32 => {
                #[allow(clippy::cast_possible_truncation)]
                let narrowed = parse_float(raw)? as f32;
                Document::Float(f64::from(narrowed))
            }
            Self::Float64 => Document::Float(parse_float(raw)?),
        };
        Ok(document)
    }
}

fn parse_bool(raw: &str) -> Result<bool, ConversionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(ConversionError::Boolean(other.to_string())),
    }
}

fn parse_int<T>(raw: &str) -> Result<T, ConversionError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    raw.parse::<T>().map_err(|source| ConversionError::Integer {
        value: raw.to_string(),
        source,
    })
}

fn parse_float(raw: &str) -> Result<f64, ConversionError> {
    raw.parse::<f64>().map_err(|source| ConversionError::Float {
        value: raw.to_string(),
        source,
    })
}
