//! Infrastructure layer module
//!
//! Adapters around the resolution core:
//! - Key lookup adapters (environment, key file, inline map)
//! - Settings loading with figment
//! - Tier file loading
//! - Logging infrastructure
//!
//! Lookup adapters satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod lookup;
pub mod tier;

pub use tier::TierLoader;
