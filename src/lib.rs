//! Purpose: Tagged-union JSON coding shared by the `jsonvariant` CLI and library users.
//! Exports: `api` (coder, schema, errors), `core` (tokenizer, locator, splicer), `json_union!`.
//! Role: Library crate backing the binary; `api` is the stable surface.
//! Invariants: Schemas and coders are immutable after construction.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
#[doc(hidden)]
pub mod json;
