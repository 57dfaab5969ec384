//! Purpose: Define the stable public Rust API boundary for jsonvariant.
//! Exports: `Coder`, `Union`, schema types, errors, and the locate/splice primitives.
//! Role: Public, additive-only surface used by the CLI and library callers.
//! Invariants: Everything a caller needs to encode/decode unions is reachable from here.
//! Invariants: `JsonError` is the serde_json error type `Union` impls return.

mod coder;
mod union;

pub use crate::core::error::{Error, ErrorKind};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::locate::{Located, locate};
pub use crate::core::schema::{Entry, Schema, SchemaConfig};
pub use crate::core::splice::insert_tag;
pub use coder::Coder;
pub use serde_json::Error as JsonError;
pub use union::Union;
