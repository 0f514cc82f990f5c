//! Service layer
//!
//! - `resolver`: indirection tag resolution over a document
//! - `binder`: structural binding of a document onto typed structs
//! - `tag_scanner`: lookup-free discovery and validation of tags

pub mod binder;
pub mod resolver;
pub mod tag_scanner;

pub use binder::bind;
pub use resolver::{resolve, resolve_document, IndirectionResolver};
pub use tag_scanner::{scan_tags, TagRef};
