//! Errors raised while resolving and binding a configuration document.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use super::models::key_path::{KeyPath, PathSegment};
use super::ports::LookupError;

/// Failure to coerce a looked-up string into the requested scalar type
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("invalid integer {value:?}: {source}")]
    Integer {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid float {value:?}: {source}")]
    Float {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid boolean {0:?}")]
    Boolean(String),
}

/// Failure to bind a resolved document onto a typed structure
#[derive(Debug, Error)]
#[error("{}", render_bind_error(.path, .message))]
pub struct BindError {
    path: KeyPath,
    message: String,
}

fn render_bind_error(path: &KeyPath, message: &str) -> String {
    if path.is_root() {
        message.to_string()
    } else {
        format!("{path}: {message}")
    }
}

impl BindError {
    pub const fn path(&self) -> &KeyPath {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Records that the failure happened below `segment`
    #[must_use]
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.prepend(segment);
        self
    }
}

impl serde::de::Error for BindError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self {
            path: KeyPath::root(),
            message: msg.to_string(),
        }
    }
}

/// Every way a resolution can fail. All of them are terminal for the call.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to parse configuration document: {message}")]
    Deserialization { message: String },

    #[error("malformed indirection tag at {path}: {value:?} has {segments} segments, at most 3 are allowed")]
    MalformedTag {
        path: KeyPath,
        value: String,
        segments: usize,
    },

    #[error("lookup of key {key:?} failed at {path}: {source}")]
    Lookup {
        path: KeyPath,
        key: String,
        #[source]
        source: LookupError,
    },

    #[error("unsupported type {type_name:?} at {path}")]
    UnsupportedType { path: KeyPath, type_name: String },

    #[error("cannot convert value at {path} to {type_name}: {source}")]
    TypeConversion {
        path: KeyPath,
        type_name: String,
        #[source]
        source: ConversionError,
    },

    #[error("sequence at {path} mixes kinds: element {index} is a {found}, expected a {expected}")]
    MixedSequence {
        path: KeyPath,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("failed to bind configuration: {0}")]
    Bind(#[from] BindError),
}

impl ResolveError {
    pub(crate) fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization {
            message: message.into(),
        }
    }

    /// Stable code identifying the error kind, suitable for log search
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Deserialization { .. } => "CONFIG.DOCUMENT.PARSE",
            Self::MalformedTag { .. } => "CONFIG.TAG.MALFORMED",
            Self::Lookup { .. } => "CONFIG.KEY.LOOKUP",
            Self::UnsupportedType { .. } => "CONFIG.TYPE.UNSUPPORTED",
            Self::TypeConversion { .. } => "CONFIG.TYPE.CONVERSION",
            Self::MixedSequence { .. } => "CONFIG.SEQUENCE.MIXED",
            Self::Bind(_) => "CONFIG.BIND",
        }
    }

    /// Where in the document the failure happened, when known
    pub fn path(&self) -> Option<&KeyPath> {
        match self {
            Self::Deserialization { .. } => None,
            Self::MalformedTag { path, .. }
            | Self::Lookup { path, .. }
            | Self::UnsupportedType { path, .. }
            | Self::TypeConversion { path, .. }
            | Self::MixedSequence { path, .. } => Some(path),
            Self::Bind(err) => Some(err.path()),
        }
    }
}

impl From<serde_yaml::Error> for ResolveError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::deserialization(err.to_string())
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
