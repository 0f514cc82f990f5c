//! Structural binding of a resolved [`Document`] onto a typed structure.
//!
//! Binding goes through serde, so any `Deserialize` type is a valid target.
//! Struct fields are matched loosely: exact name first, then ASCII
//! case-insensitive, then case-insensitive ignoring `_` and `-`. A document
//! written as `ratingsUrl` therefore fills a field named `ratings_url`.

use serde::de::{
    self, DeserializeOwned, DeserializeSeed, EnumAccess, Error as _, IntoDeserializer, MapAccess,
    SeqAccess, Unexpected, VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;

use crate::domain::errors::BindError;
use crate::domain::models::{Document, Mapping, PathSegment};

/// Binds `document` onto `T`
pub fn bind<T: DeserializeOwned>(document: Document) -> Result<T, BindError> {
    T::deserialize(document)
}

impl Document {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Self::Null => Unexpected::Unit,
            Self::Bool(flag) => Unexpected::Bool(*flag),
            Self::Int(int) => Unexpected::Signed(*int),
            Self::Float(float) => Unexpected::Float(*float),
            Self::String(text) => Unexpected::Str(text),
            Self::Sequence(_) => Unexpected::Seq,
            Self::Mapping(_) => Unexpected::Map,
        }
    }
}

impl<'de> de::Deserializer<'de> for Document {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self {
            Self::Null => visitor.visit_unit(),
            Self::Bool(flag) => visitor.visit_bool(flag),
            Self::Int(int) => visitor.visit_i64(int),
            Self::Float(float) => visitor.visit_f64(float),
            Self::String(text) => visitor.visit_string(text),
            Self::Sequence(items) => visit_sequence(items, visitor),
            Self::Mapping(mapping) => visitor.visit_map(MappingAccess::new(mapping, None)),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self {
            Self::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, BindError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        match self {
            Self::Mapping(mapping) => visitor.visit_map(MappingAccess::new(mapping, Some(fields))),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        match self {
            Self::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            Self::Mapping(mapping) if mapping.len() == 1 => {
                let Some((variant, value)) = mapping.into_iter().next() else {
                    return Err(BindError::custom("empty enum mapping"));
                };
                visitor.visit_enum(VariantDocument { variant, value })
            }
            other => Err(BindError::invalid_type(
                other.unexpected(),
                &"a string or a single-entry mapping",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map identifier
        ignored_any
    }
}

fn visit_sequence<'de, V: Visitor<'de>>(
    items: Vec<Document>,
    visitor: V,
) -> Result<V::Value, BindError> {
    let len = items.len();
    let mut access = SequenceAccess {
        items: items.into_iter().enumerate(),
    };
    let value = visitor.visit_seq(&mut access)?;
    if access.items.len() == 0 {
        Ok(value)
    } else {
        Err(BindError::invalid_length(len, &"fewer elements in sequence"))
    }
}

struct SequenceAccess {
    items: std::iter::Enumerate<std::vec::IntoIter<Document>>,
}

impl<'de> SeqAccess<'de> for SequenceAccess {
    type Error = BindError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, BindError> {
        match self.items.next() {
            Some((index, item)) => seed
                .deserialize(item)
                .map(Some)
                .map_err(|err| err.within(PathSegment::Index(index))),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

struct MappingAccess {
    entries: std::collections::btree_map::IntoIter<String, Document>,
    fields: Option<&'static [&'static str]>,
    pending: Option<(String, Document)>,
}

impl MappingAccess {
    fn new(mapping: Mapping, fields: Option<&'static [&'static str]>) -> Self {
        Self {
            entries: mapping.into_iter(),
            fields,
            pending: None,
        }
    }

    /// Name the key is presented to the visitor under
    fn field_name(&self, key: &str) -> String {
        self.fields
            .and_then(|fields| match_field(fields, key))
            .map_or_else(|| key.to_string(), str::to_string)
    }
}

impl<'de> MapAccess<'de> for MappingAccess {
    type Error = BindError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, BindError> {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };

        let name = self.field_name(&key);
        let result = seed
            .deserialize(<String as IntoDeserializer<'de, BindError>>::into_deserializer(name))
            .map(Some)
            .map_err(|err| err.within(PathSegment::Key(key.clone())));
        self.pending = Some((key, value));
        result
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, BindError> {
        let Some((key, value)) = self.pending.take() else {
            return Err(BindError::custom("mapping value requested before its key"));
        };
        seed.deserialize(value)
            .map_err(|err| err.within(PathSegment::Key(key)))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// Finds the struct field a document key binds to
fn match_field(fields: &'static [&'static str], key: &str) -> Option<&'static str> {
    if let Some(exact) = fields.iter().copied().find(|field| *field == key) {
        return Some(exact);
    }
    if let Some(caseless) = fields
        .iter()
        .copied()
        .find(|field| field.eq_ignore_ascii_case(key))
    {
        return Some(caseless);
    }
    let wanted = fold_name(key);
    fields
        .iter()
        .copied()
        .find(|field| fold_name(field) == wanted)
}

fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

struct VariantDocument {
    variant: String,
    value: Document,
}

impl<'de> EnumAccess<'de> for VariantDocument {
    type Error = BindError;
    type Variant = Document;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, Self::Variant), BindError> {
        let variant = seed.deserialize(
            <String as IntoDeserializer<'de, BindError>>::into_deserializer(self.variant),
        )?;
        Ok((variant, self.value))
    }
}

impl<'de> VariantAccess<'de> for Document {
    type Error = BindError;

    fn unit_variant(self) -> Result<(), BindError> {
        match self {
            Self::Null => Ok(()),
            Self::String(text) if text.is_empty() => Ok(()),
            other => Err(BindError::invalid_type(other.unexpected(), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value, BindError> {
        seed.deserialize(self)
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, BindError> {
        de::Deserializer::deserialize_seq(self, visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        de::Deserializer::deserialize_struct(self, "", fields, visitor)
    }
}
