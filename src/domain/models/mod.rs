pub mod document;
pub mod indirection;
pub mod key_path;
pub mod settings;

pub use document::{Document, Mapping, SequenceKind};
pub use indirection::{IndirectionTag, ScalarType};
pub use key_path::{KeyPath, PathSegment};
pub use settings::{LoggingSettings, LookupSettings, LookupSource, Settings};
