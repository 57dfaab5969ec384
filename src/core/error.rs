//! Purpose: Model every failure the locator, splicer, and coder can report.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Single error type shared by the library API and the CLI.
//! Invariants: Domain kinds carry fixed messages; detail text only ever appends.
//! Invariants: Tokenizer and serde_json failures keep their original text.
use std::error::Error as StdError;
use std::fmt;

use crate::core::token::SyntaxError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Top-level value is not a JSON object.
    InputType,
    /// Tag property absent (or not first under `require_tag_first`).
    TagMissing,
    /// Tag property value is not a JSON string.
    TagType,
    /// Tag string has no schema entry.
    TagValue,
    /// Input ended before the first token.
    Eof,
    /// Malformed JSON text, including truncation mid-value.
    Syntax,
    /// serde_json marshal or unmarshal failure.
    Json,
    Usage,
    Io,
}

impl ErrorKind {
    /// True for the four union-level failures; false for anything that means
    /// "not valid JSON" or an environment problem.
    pub fn is_domain(self) -> bool {
        matches!(
            self,
            ErrorKind::InputType | ErrorKind::TagMissing | ErrorKind::TagType | ErrorKind::TagValue
        )
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::InputType => "expected an object",
            ErrorKind::TagMissing => "missing tag property",
            ErrorKind::TagType => "tag value must be a string",
            ErrorKind::TagValue => "unknown tag value",
            ErrorKind::Eof => "EOF",
            ErrorKind::Syntax => "invalid json",
            ErrorKind::Json => "json encode/decode failed",
            ErrorKind::Usage => "usage error",
            ErrorKind::Io => "i/o error",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    offset: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            offset: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_domain(&self) -> bool {
        self.kind.is_domain()
    }

    /// Detail text. For domain kinds it is appended to the fixed description;
    /// for the other kinds it replaces it.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// The tokenizer error behind an `Eof` or `Syntax` kind, untouched.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<SyntaxError>())
    }

    /// The serde_json error behind a `Json` kind, untouched.
    pub fn json(&self) -> Option<&serde_json::Error> {
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<serde_json::Error>())
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_domain() {
            f.write_str(self.kind.description())?;
            if let Some(message) = &self.message {
                write!(f, " {message}")?;
            }
            return Ok(());
        }
        match &self.message {
            Some(message) => f.write_str(message),
            None => f.write_str(self.kind.description()),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        let kind = if err.is_eof() {
            ErrorKind::Eof
        } else {
            ErrorKind::Syntax
        };
        Error::new(kind)
            .with_message(err.to_string())
            .with_offset(err.offset() as u64)
            .with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::Json)
            .with_message(err.to_string())
            .with_source(err)
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Usage => 2,
        ErrorKind::Io => 3,
        ErrorKind::InputType | ErrorKind::TagMissing | ErrorKind::TagType | ErrorKind::TagValue => 4,
        ErrorKind::Eof | ErrorKind::Syntax => 5,
        ErrorKind::Json => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use crate::core::token::Tokenizer;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Usage, 2),
            (ErrorKind::Io, 3),
            (ErrorKind::InputType, 4),
            (ErrorKind::TagMissing, 4),
            (ErrorKind::TagType, 4),
            (ErrorKind::TagValue, 4),
            (ErrorKind::Eof, 5),
            (ErrorKind::Syntax, 5),
            (ErrorKind::Json, 6),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn domain_messages_append_detail() {
        assert_eq!(
            Error::new(ErrorKind::InputType).to_string(),
            "expected an object"
        );
        assert_eq!(
            Error::new(ErrorKind::TagMissing)
                .with_message("or not at start")
                .to_string(),
            "missing tag property or not at start"
        );
        assert_eq!(
            Error::new(ErrorKind::TagValue)
                .with_message("\"b\"")
                .to_string(),
            "unknown tag value \"b\""
        );
    }

    #[test]
    fn domain_family_excludes_syntax_and_environment() {
        assert!(ErrorKind::TagType.is_domain());
        assert!(!ErrorKind::Syntax.is_domain());
        assert!(!ErrorKind::Eof.is_domain());
        assert!(!ErrorKind::Json.is_domain());
        assert!(!ErrorKind::Usage.is_domain());
    }

    #[test]
    fn syntax_error_passes_through_verbatim() {
        let syntax = Tokenizer::new(b"bad").next_token().unwrap_err();
        let text = syntax.to_string();
        let err = Error::from(syntax);
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.to_string(), text);
        assert_eq!(err.offset(), Some(0));
        assert!(err.syntax().is_some());
    }

    #[test]
    fn json_error_keeps_source() {
        let json_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let text = json_err.to_string();
        let err = Error::from(json_err);
        assert_eq!(err.kind(), ErrorKind::Json);
        assert_eq!(err.to_string(), text);
        assert!(err.json().is_some());
    }
}
