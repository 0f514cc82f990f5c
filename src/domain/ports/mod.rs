//! Port trait definitions
//!
//! Capabilities the resolver consumes without knowing who provides them.

pub mod key_lookup;

pub use key_lookup::{KeyLookup, LookupError};
