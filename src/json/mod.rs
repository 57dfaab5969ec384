//! Purpose: serde_json boundary shared by the coder, the splicer, and the CLI.
//! Exports: `parse` helpers (`from_slice`, `to_vec`, `quote`).
//! Role: Single seam for the generic marshal/unmarshal mechanism.
//! Invariants: Helpers stay small and deterministic (no hidden global state).

pub mod parse;

pub use parse::{from_slice, quote, to_vec};
