//! Purpose: Insert a tag property into already-serialized JSON object bytes.
//! Exports: `insert_tag`.
//! Role: Encode-side half of the union coder; avoids a parse/re-serialize cycle.
//! Invariants: Output equals input except for one `"key": "value"[,]` segment
//! Invariants: placed right before the first property (or the closing brace).
//! Invariants: Whitespace between `{` and the first property is duplicated so
//! Invariants: the inserted segment shares the original indentation.
//! Notes: A top-level `null` passes through unchanged.
use crate::core::error::{Error, ErrorKind};
use crate::core::token::{Token, Tokenizer};
use crate::json::quote;

const SEPARATOR: &[u8] = b": ";

pub fn insert_tag(input: &[u8], tag_key: &str, tag_value: &str) -> Result<Vec<u8>, Error> {
    let mut tokens = Tokenizer::new(input);
    match tokens.next_token()? {
        Token::BeginObject => {}
        Token::Null => return Ok(input.to_vec()),
        _ => return Err(Error::new(ErrorKind::InputType)),
    }
    let open_brace = tokens.token_offset();
    let empty = tokens.next_token()? == Token::EndObject;
    let first_member = tokens.token_offset();

    let key = quote(tag_key);
    let value = quote(tag_value);
    let mut out = Vec::with_capacity(
        input.len() + (first_member - open_brace) + key.len() + value.len() + SEPARATOR.len() + 1,
    );
    out.extend_from_slice(&input[..first_member]);
    out.extend_from_slice(key.as_bytes());
    out.extend_from_slice(SEPARATOR);
    out.extend_from_slice(value.as_bytes());
    if !empty {
        out.push(b',');
    }
    out.extend_from_slice(&input[open_brace + 1..]);
    Ok(out)
}
