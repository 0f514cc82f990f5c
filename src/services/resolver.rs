//! Indirection resolution over a configuration document.
//!
//! The resolver walks a [`Document`] depth-first, replaces every string that
//! is an indirection tag in the configured namespace with the value returned
//! by the injected [`KeyLookup`], and coerces it to the requested type. The
//! first failure anywhere in the tree aborts the whole walk.

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::binder::bind;
use crate::domain::errors::{ResolveError, ResolveResult};
use crate::domain::models::{Document, IndirectionTag, KeyPath, Mapping, SequenceKind};
use crate::domain::ports::KeyLookup;

/// Parses `raw`, resolves every indirection tag and binds the result onto `T`
pub fn resolve<T, L>(raw: &[u8], tag_name: &str, lookup: &L) -> ResolveResult<T>
where
    T: DeserializeOwned,
    L: KeyLookup + ?Sized,
{
    let document = resolve_document(raw, tag_name, lookup)?;
    bind(document).map_err(|err| {
        let err = ResolveError::from(err);
        warn!(code = err.code(), error = %err, "configuration binding failed");
        err
    })
}

/// Parses `raw` and resolves every indirection tag, without binding
#[instrument(skip_all, fields(tag_name = %tag_name))]
pub fn resolve_document<L>(raw: &[u8], tag_name: &str, lookup: &L) -> ResolveResult<Document>
where
    L: KeyLookup + ?Sized,
{
    let document = Document::from_yaml_slice(raw)?;
    let mut resolver = IndirectionResolver::new(tag_name, lookup);

    match resolver.resolve_document(document) {
        Ok(resolved) => {
            info!(lookups = resolver.lookups(), "configuration resolved");
            Ok(resolved)
        }
        Err(err) => {
            warn!(code = err.code(), error = %err, "configuration resolution failed");
            Err(err)
        }
    }
}

/// Walks a document and resolves tags in one namespace
pub struct IndirectionResolver<'a, L: KeyLookup + ?Sized> {
    tag_name: &'a str,
    lookup: &'a L,
    lookups: usize,
}

impl<'a, L: KeyLookup + ?Sized> IndirectionResolver<'a, L> {
    pub const fn new(tag_name: &'a str, lookup: &'a L) -> Self {
        Self {
            tag_name,
            lookup,
            lookups: 0,
        }
    }

    /// Number of lookups performed so far
    pub const fn lookups(&self) -> usize {
        self.lookups
    }

    pub fn resolve_document(&mut self, document: Document) -> ResolveResult<Document> {
        self.walk_value(document, &KeyPath::root())
    }

    fn walk_value(&mut self, value: Document, path: &KeyPath) -> ResolveResult<Document> {
        match value {
            Document::Null => Ok(Document::String(String::new())),
            Document::String(text) => self.resolve_scalar(text, path),
            Document::Mapping(mapping) => self.walk_mapping(mapping, path).map(Document::Mapping),
            Document::Sequence(items) => self.walk_sequence(items, path),
            scalar @ (Document::Bool(_) | Document::Int(_) | Document::Float(_)) => Ok(scalar),
        }
    }

    fn walk_mapping(&mut self, mapping: Mapping, path: &KeyPath) -> ResolveResult<Mapping> {
        mapping
            .into_iter()
            .map(|(key, value)| {
                let resolved = self.walk_value(value, &path.key(key.as_str()))?;
                Ok((key, resolved))
            })
            .collect()
    }

    /// The first element decides how the whole sequence is treated; see
    /// [`SequenceKind`].
    fn walk_sequence(&mut self, items: Vec<Document>, path: &KeyPath) -> ResolveResult<Document> {
        let Some(kind) = SequenceKind::of(&items) else {
            return Ok(Document::Sequence(items));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                kind.check(&item, path, index)?;
                self.walk_value(item, &path.index(index))
            })
            .collect::<ResolveResult<Vec<_>>>()
            .map(Document::Sequence)
    }

    fn resolve_scalar(&mut self, text: String, path: &KeyPath) -> ResolveResult<Document> {
        let Some(tag) = IndirectionTag::parse(&text, self.tag_name, path)? else {
            return Ok(Document::String(text));
        };
        let scalar_type = tag.scalar_type(path)?;

        debug!(path = %path, key = tag.key, "looking up indirection key");
        self.lookups += 1;
        let raw = self
            .lookup
            .lookup(tag.key)
            .map_err(|source| ResolveError::Lookup {
                path: path.clone(),
                key: tag.key.to_string(),
                source,
            })?;

        match scalar_type {
            // An untyped lookup that hands back its own input found nothing.
            None if raw == tag.key || raw == text => {
                debug!(path = %path, "lookup echoed its input, keeping literal value");
                Ok(Document::String(text))
            }
            None => Ok(Document::String(raw)),
            // Typed values are always coerced; a `string` result equal to the
            // tag text is the literal itself.
            Some(scalar_type) => {
                scalar_type
                    .coerce(&raw)
                    .map_err(|source| ResolveError::TypeConversion {
                        path: path.clone(),
                        type_name: scalar_type.name().to_string(),
                        source,
                    })
            }
        }
    }
}
