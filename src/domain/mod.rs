//! Domain layer
//!
//! The configuration document model, the indirection tag grammar, the key
//! lookup port and the errors shared by every layer above.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{BindError, ConversionError, ResolveError, ResolveResult};
