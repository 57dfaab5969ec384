//! Purpose: Compose the generic serde marshal/unmarshal step with tag location and splicing.
//! Exports: `Coder`.
//! Role: Composition root for union encode/decode; the type users hold.
//! Invariants: Decode hands the original, untouched bytes to `Union::unmarshal`.
//! Invariants: Encoding a value whose kind has no schema entry panics; it is a
//! Invariants: schema/call-site mismatch, not bad input.
//! Invariants: Null-on-error only ever absorbs domain errors.
use std::fmt;

use tracing::debug;

use crate::api::union::Union;
use crate::core::error::{Error, ErrorKind};
use crate::core::locate::locate;
use crate::core::schema::Schema;
use crate::core::splice;

pub struct Coder<U: Union> {
    schema: Schema<U::Kind>,
    null_on_error: bool,
}

impl<U: Union> Coder<U> {
    pub fn new(schema: Schema<U::Kind>) -> Self {
        Self {
            schema,
            null_on_error: false,
        }
    }

    /// Decode domain failures (not an object, missing/mistyped/unknown tag)
    /// as `Ok(None)` instead of an error.
    pub fn with_null_on_error(mut self, null_on_error: bool) -> Self {
        self.null_on_error = null_on_error;
        self
    }

    pub fn schema(&self) -> &Schema<U::Kind> {
        &self.schema
    }

    pub fn null_on_error(&self) -> bool {
        self.null_on_error
    }

    /// Resolve the record kind of `input`; `None` when the input is `null`.
    pub fn find_type(&self, input: &[u8]) -> Result<Option<U::Kind>, Error> {
        Ok(locate(&self.schema, input)?.ty().copied())
    }

    pub fn decode(&self, input: &[u8]) -> Result<Option<U>, Error> {
        let kind = match self.find_type(input) {
            Ok(Some(kind)) => kind,
            Ok(None) => return Ok(None),
            Err(err) if self.null_on_error && err.is_domain() => {
                debug!(error = %err, "discarding undecodable union value");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        let value = U::unmarshal(kind, input)?;
        Ok(Some(value))
    }

    pub fn encode(&self, value: &U) -> Result<Vec<u8>, Error> {
        let encoded = value.marshal()?;
        self.insert_tag(value, &encoded)
    }

    /// `None` encodes as `null`, the counterpart of `decode` returning `None`.
    pub fn encode_option(&self, value: Option<&U>) -> Result<Vec<u8>, Error> {
        match value {
            Some(value) => self.encode(value),
            None => Ok(b"null".to_vec()),
        }
    }

    /// Splice the tag for `value` into its already-encoded body.
    pub fn insert_tag(&self, value: &U, encoded: &[u8]) -> Result<Vec<u8>, Error> {
        let tag = self.tag_for(value);
        match splice::insert_tag(encoded, self.schema.tag_key(), tag) {
            Err(err) if err.kind() == ErrorKind::InputType => {
                panic!("cannot add tag {tag:?} to a non-object value")
            }
            result => result,
        }
    }

    pub fn tag_for(&self, value: &U) -> &str {
        let kind = value.kind();
        match self.schema.tag_for_type(&kind) {
            Some(tag) => tag,
            None => panic!(
                "unregistered union type {kind:?} for tag key {:?}",
                self.schema.tag_key()
            ),
        }
    }
}

impl<U: Union> Clone for Coder<U> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            null_on_error: self.null_on_error,
        }
    }
}

impl<U: Union> fmt::Debug for Coder<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coder")
            .field("schema", &self.schema)
            .field("null_on_error", &self.null_on_error)
            .finish()
    }
}
