//! CLI command implementations.

pub mod resolve;
pub mod scan;
pub mod tier;
