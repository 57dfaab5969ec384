//! Purpose: Find the tag property of a JSON object and resolve it against a schema.
//! Exports: `Located`, `locate`.
//! Role: Decode-side half of the union coder; reads only as far as the tag.
//! Invariants: Only keys of the outermost object are candidates; nested
//! Invariants: objects are skipped by depth, never searched.
//! Invariants: Tokenizer errors surface unchanged (as `Eof`/`Syntax` kinds).
use tracing::trace;

use crate::core::error::{Error, ErrorKind};
use crate::core::schema::Schema;
use crate::core::token::{Token, Tokenizer};
use crate::json::quote;

#[derive(Debug, Eq, PartialEq)]
pub enum Located<'s, T> {
    /// The whole input is JSON `null`.
    Null,
    Variant { tag: &'s str, ty: &'s T },
}

impl<'s, T> Located<'s, T> {
    pub fn ty(&self) -> Option<&'s T> {
        match self {
            Located::Null => None,
            Located::Variant { ty, .. } => Some(*ty),
        }
    }
}

pub fn locate<'s, T>(schema: &'s Schema<T>, input: &[u8]) -> Result<Located<'s, T>, Error> {
    let mut tokens = Tokenizer::new(input);
    match tokens.next_token()? {
        Token::BeginObject => {}
        Token::Null => return Ok(Located::Null),
        _ => return Err(Error::new(ErrorKind::InputType)),
    }

    let value = if schema.require_tag_first() {
        first_key_value(&mut tokens, schema.tag_key())?
    } else {
        find_key_value(&mut tokens, schema.tag_key())?
    };

    let Token::String(tag) = value else {
        return Err(Error::new(ErrorKind::TagType).with_offset(tokens.token_offset() as u64));
    };
    let Some(entry) = schema.entry_for_tag(&tag) else {
        return Err(Error::new(ErrorKind::TagValue)
            .with_message(quote(&tag))
            .with_offset(tokens.token_offset() as u64));
    };
    trace!(tag = %entry.tag, offset = tokens.token_offset(), "located union tag");
    Ok(Located::Variant {
        tag: &entry.tag,
        ty: &entry.ty,
    })
}

fn first_key_value<'a>(tokens: &mut Tokenizer<'a>, tag_key: &str) -> Result<Token<'a>, Error> {
    match tokens.next_token()? {
        Token::String(key) if key == tag_key => Ok(tokens.next_token()?),
        Token::String(_) => Err(Error::new(ErrorKind::TagMissing)
            .with_message("or not at start")
            .with_offset(tokens.token_offset() as u64)),
        _ => Err(Error::new(ErrorKind::TagMissing)),
    }
}

fn find_key_value<'a>(tokens: &mut Tokenizer<'a>, tag_key: &str) -> Result<Token<'a>, Error> {
    loop {
        let Token::String(key) = tokens.next_token()? else {
            // The tokenizer only yields a key or `}` directly inside an object.
            return Err(Error::new(ErrorKind::TagMissing));
        };
        if key == tag_key {
            return Ok(tokens.next_token()?);
        }
        skip_value(tokens)?;
    }
}

fn skip_value(tokens: &mut Tokenizer<'_>) -> Result<(), Error> {
    let mut depth = 0usize;
    loop {
        let token = tokens.next_token()?;
        if token.opens() {
            depth += 1;
        } else if token.closes() {
            depth -= 1;
        }
        if depth == 0 {
            return Ok(());
        }
    }
}
