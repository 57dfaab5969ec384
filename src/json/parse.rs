//! Purpose: Provide the runtime JSON encode/decode entrypoints.
//! Exports: `from_slice`, `to_vec`, `quote`.
//! Role: Boundary that centralizes serde_json usage details.
//! Invariants: Output is compact serde_json text; no pretty printing here.
//! Notes: Error mapping is done by callsites so domain context stays explicit.

use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}

pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// JSON string literal for `text`, with standard escaping.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}
