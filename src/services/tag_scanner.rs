//! Dry-run discovery of indirection tags.
//!
//! Walks a document the same way the resolver does but never calls a
//! lookup, so a configuration file can be validated before its key store
//! is reachable.

use serde::Serialize;

use crate::domain::errors::ResolveResult;
use crate::domain::models::{Document, IndirectionTag, KeyPath, Mapping, SequenceKind};

/// An indirection tag found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRef {
    pub path: KeyPath,
    pub key: String,
    /// Normalized type name, `None` for plain string tags
    pub type_name: Option<&'static str>,
}

/// Lists every tag in namespace `tag_name`, in walk order.
///
/// Malformed tags, unsupported type names and mixed sequences fail exactly
/// as they would during resolution.
pub fn scan_tags(document: &Document, tag_name: &str) -> ResolveResult<Vec<TagRef>> {
    let mut found = Vec::new();
    scan_value(document, tag_name, &KeyPath::root(), &mut found)?;
    Ok(found)
}

fn scan_value(
    value: &Document,
    tag_name: &str,
    path: &KeyPath,
    found: &mut Vec<TagRef>,
) -> ResolveResult<()> {
    match value {
        Document::String(text) => scan_scalar(text, tag_name, path, found),
        Document::Mapping(mapping) => scan_mapping(mapping, tag_name, path, found),
        Document::Sequence(items) => scan_sequence(items, tag_name, path, found),
        Document::Null | Document::Bool(_) | Document::Int(_) | Document::Float(_) => Ok(()),
    }
}

fn scan_mapping(
    mapping: &Mapping,
    tag_name: &str,
    path: &KeyPath,
    found: &mut Vec<TagRef>,
) -> ResolveResult<()> {
    for (key, value) in mapping {
        scan_value(value, tag_name, &path.key(key.as_str()), found)?;
    }
    Ok(())
}

fn scan_sequence(
    items: &[Document],
    tag_name: &str,
    path: &KeyPath,
    found: &mut Vec<TagRef>,
) -> ResolveResult<()> {
    let Some(kind) = SequenceKind::of(items) else {
        return Ok(());
    };

    for (index, item) in items.iter().enumerate() {
        kind.check(item, path, index)?;
        scan_value(item, tag_name, &path.index(index), found)?;
    }
    Ok(())
}

fn scan_scalar(
    text: &str,
    tag_name: &str,
    path: &KeyPath,
    found: &mut Vec<TagRef>,
) -> ResolveResult<()> {
    if let Some(tag) = IndirectionTag::parse(text, tag_name, path)? {
        let scalar_type = tag.scalar_type(path)?;
        found.push(TagRef {
            path: path.clone(),
            key: tag.key.to_string(),
            type_name: scalar_type.map(|ty| ty.name()),
        });
    }
    Ok(())
}
