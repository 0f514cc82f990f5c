//! ccms-config - indirection-aware configuration loading
//!
//! Reads a YAML configuration document, replaces every value written as an
//! indirection tag (`ccms|KEY` or `ccms|TYPE|KEY`) with the value a key store
//! returns for `KEY`, coerces it to `TYPE`, and binds the result onto a
//! typed struct.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): document model, tag grammar, errors and the
//!   `KeyLookup` port
//! - **Service Layer** (`services`): resolver, binder and tag scanner
//! - **Infrastructure Layer** (`infrastructure`): lookup adapters, settings,
//!   tier files and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use ccms_config::{resolve, LookupError};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct ServerConfig {
//!     host: String,
//!     timeout: i64,
//! }
//!
//! let lookup = |key: &str| match key {
//!     "TIMEOUT_SECONDS" => Ok("30".to_string()),
//!     other => Err(LookupError::NotFound(other.to_string())),
//! };
//!
//! let raw = b"host: localhost\ntimeout: ccms|int64|TIMEOUT_SECONDS\n";
//! let config: ServerConfig = resolve(raw, "ccms", &lookup).unwrap();
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.timeout, 30);
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{BindError, ConversionError, ResolveError, ResolveResult};
pub use domain::models::{Document, KeyPath, ScalarType, Settings};
pub use domain::ports::{KeyLookup, LookupError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::lookup::{EnvLookup, FileLookup, MapLookup};
pub use infrastructure::TierLoader;
pub use services::{bind, resolve, resolve_document, scan_tags, TagRef};
