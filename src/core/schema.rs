//! Purpose: Hold the tag key, the ordered (tag, type) table, and the ordering mode.
//! Exports: `Schema`, `Entry`, `SchemaConfig`.
//! Role: Read-only configuration shared by every locate/encode/decode call.
//! Invariants: Entry order is fixed at construction; lookups are first-match-wins
//! Invariants: in both directions, so duplicate tags or types never error.
//! Invariants: Zero entries is valid; only `null` decodes against such a schema.
use serde::Deserialize;

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry<T> {
    pub tag: String,
    pub ty: T,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schema<T> {
    tag_key: String,
    entries: Vec<Entry<T>>,
    require_tag_first: bool,
}

impl<T> Schema<T> {
    pub fn new(tag_key: impl Into<String>) -> Self {
        Self {
            tag_key: tag_key.into(),
            entries: Vec::new(),
            require_tag_first: false,
        }
    }

    /// Build from parallel tag and type lists; the lists must be the same length.
    pub fn from_parts(
        tag_key: impl Into<String>,
        tags: Vec<String>,
        types: Vec<T>,
    ) -> Result<Self, Error> {
        if tags.len() != types.len() {
            return Err(Error::new(ErrorKind::Usage).with_message(format!(
                "schema has {} tags but {} types",
                tags.len(),
                types.len()
            ))
            .with_hint("Give exactly one type per tag, in the same order."));
        }
        let entries = tags
            .into_iter()
            .zip(types)
            .map(|(tag, ty)| Entry { tag, ty })
            .collect();
        Ok(Self {
            tag_key: tag_key.into(),
            entries,
            require_tag_first: false,
        })
    }

    pub fn with_entry(mut self, tag: impl Into<String>, ty: T) -> Self {
        self.entries.push(Entry {
            tag: tag.into(),
            ty,
        });
        self
    }

    pub fn with_require_tag_first(mut self, require_tag_first: bool) -> Self {
        self.require_tag_first = require_tag_first;
        self
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    pub fn require_tag_first(&self) -> bool {
        self.require_tag_first
    }

    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    pub fn entry_for_tag(&self, tag: &str) -> Option<&Entry<T>> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    pub fn type_for_tag(&self, tag: &str) -> Option<&T> {
        self.entry_for_tag(tag).map(|entry| &entry.ty)
    }

    pub fn tag_for_type(&self, ty: &T) -> Option<&str>
    where
        T: PartialEq,
    {
        self.entries
            .iter()
            .find(|entry| entry.ty == *ty)
            .map(|entry| entry.tag.as_str())
    }
}

/// Serde-facing form of a schema, e.g. a JSON file with parallel lists:
/// `{"tag_key": "type", "tags": ["a"], "types": ["A"], "require_tag_first": false}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig<T> {
    pub tag_key: String,
    #[serde(default = "Vec::new")]
    pub tags: Vec<String>,
    #[serde(default = "Vec::new")]
    pub types: Vec<T>,
    #[serde(default)]
    pub require_tag_first: bool,
}

impl<T> SchemaConfig<T> {
    pub fn into_schema(self) -> Result<Schema<T>, Error> {
        Ok(Schema::from_parts(self.tag_key, self.tags, self.types)?
            .with_require_tag_first(self.require_tag_first))
    }
}
