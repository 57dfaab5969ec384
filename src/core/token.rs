//! Purpose: Pull-based JSON tokenizer over an in-memory byte slice.
//! Exports: `Token`, `Tokenizer`, `SyntaxError`, `SyntaxErrorKind`.
//! Role: Token stream feeding the tag locator and splicer; never builds a tree.
//! Invariants: Grammar is enforced incrementally; a token is only returned once
//! Invariants: everything before it is valid JSON.
//! Invariants: `token_offset` always points at the first byte of the last token.
//! Notes: Object keys come back as `Token::String`; the `:` after a key is
//! consumed together with the key.
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    String(Cow<'a, str>),
    Number(&'a str),
    Bool(bool),
    Null,
}

impl Token<'_> {
    pub fn opens(&self) -> bool {
        matches!(self, Token::BeginObject | Token::BeginArray)
    }

    pub fn closes(&self) -> bool {
        matches!(self, Token::EndObject | Token::EndArray)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyntaxErrorKind {
    /// No token before the end of input.
    Eof,
    /// Input ended inside a value.
    UnexpectedEof,
    InvalidCharacter,
    InvalidString,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    message: String,
    offset: usize,
}

impl SyntaxError {
    fn eof(offset: usize) -> Self {
        Self {
            kind: SyntaxErrorKind::Eof,
            message: "EOF".to_string(),
            offset,
        }
    }

    fn unexpected_eof(offset: usize) -> Self {
        Self {
            kind: SyntaxErrorKind::UnexpectedEof,
            message: "unexpected end of JSON input".to_string(),
            offset,
        }
    }

    fn invalid_character(found: u8, context: &str, offset: usize) -> Self {
        Self {
            kind: SyntaxErrorKind::InvalidCharacter,
            message: format!("invalid character {} {context}", quote_byte(found)),
            offset,
        }
    }

    fn invalid_string(message: impl Into<String>, offset: usize) -> Self {
        Self {
            kind: SyntaxErrorKind::InvalidString,
            message: message.into(),
            offset,
        }
    }

    pub fn kind(&self) -> SyntaxErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_eof(&self) -> bool {
        self.kind == SyntaxErrorKind::Eof
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for SyntaxError {}

fn quote_byte(byte: u8) -> String {
    match byte {
        b'\'' => "'\\''".to_string(),
        b'"' => "'\"'".to_string(),
        0x20..=0x7e => format!("'{}'", byte as char),
        _ => format!("'\\x{byte:02x}'"),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Container {
    Object,
    Array,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Before the single top-level value.
    Start,
    /// After `{`: a key or `}`.
    KeyOrEnd,
    /// After `,` inside an object.
    Key,
    /// After `[`: a value or `]`.
    ElementOrEnd,
    /// After a key's `:` or an array's `,`.
    Value,
    /// After a complete value inside a container.
    Separator,
    /// After the top-level value.
    Done,
}

#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    token_offset: usize,
    stack: Vec<Container>,
    state: State,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            token_offset: 0,
            stack: Vec::new(),
            state: State::Start,
        }
    }

    /// Byte offset of the first byte of the most recently returned token.
    pub fn token_offset(&self) -> usize {
        self.token_offset
    }

    /// Nesting depth after the most recently returned token.
    #[cfg(test)]
    fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn next_token(&mut self) -> Result<Token<'a>, SyntaxError> {
        self.skip_whitespace();
        let Some(&byte) = self.input.get(self.pos) else {
            return Err(match self.state {
                State::Start | State::Done => SyntaxError::eof(self.pos),
                _ => SyntaxError::unexpected_eof(self.pos),
            });
        };
        self.token_offset = self.pos;

        match self.state {
            State::Start | State::Value => self.value(byte, "looking for beginning of value"),
            State::ElementOrEnd if byte == b']' => Ok(self.close(Container::Array)),
            State::ElementOrEnd => self.value(byte, "looking for beginning of value"),
            State::KeyOrEnd if byte == b'}' => Ok(self.close(Container::Object)),
            State::KeyOrEnd | State::Key => {
                if byte != b'"' {
                    return Err(SyntaxError::invalid_character(
                        byte,
                        "looking for beginning of object key string",
                        self.pos,
                    ));
                }
                let key = self.string()?;
                self.skip_whitespace();
                match self.input.get(self.pos) {
                    Some(b':') => {
                        self.pos += 1;
                        self.state = State::Value;
                        Ok(Token::String(key))
                    }
                    Some(&other) => Err(SyntaxError::invalid_character(
                        other,
                        "after object key",
                        self.pos,
                    )),
                    None => Err(SyntaxError::unexpected_eof(self.pos)),
                }
            }
            State::Separator => self.separator(byte),
            State::Done => Err(SyntaxError::invalid_character(
                byte,
                "after top-level value",
                self.pos,
            )),
        }
    }

    fn separator(&mut self, byte: u8) -> Result<Token<'a>, SyntaxError> {
        match (self.stack.last(), byte) {
            (Some(Container::Object), b',') => {
                self.pos += 1;
                self.state = State::Key;
                self.next_token()
            }
            (Some(Container::Object), b'}') => Ok(self.close(Container::Object)),
            (Some(Container::Array), b',') => {
                self.pos += 1;
                self.state = State::Value;
                self.next_token()
            }
            (Some(Container::Array), b']') => Ok(self.close(Container::Array)),
            (Some(Container::Object), _) => Err(SyntaxError::invalid_character(
                byte,
                "after object key:value pair",
                self.pos,
            )),
            _ => Err(SyntaxError::invalid_character(
                byte,
                "after array element",
                self.pos,
            )),
        }
    }

    fn close(&mut self, container: Container) -> Token<'a> {
        self.pos += 1;
        self.stack.pop();
        self.after_value();
        match container {
            Container::Object => Token::EndObject,
            Container::Array => Token::EndArray,
        }
    }

    fn after_value(&mut self) {
        self.state = if self.stack.is_empty() {
            State::Done
        } else {
            State::Separator
        };
    }

    fn value(&mut self, byte: u8, context: &str) -> Result<Token<'a>, SyntaxError> {
        let token = match byte {
            b'{' => {
                self.pos += 1;
                self.stack.push(Container::Object);
                self.state = State::KeyOrEnd;
                return Ok(Token::BeginObject);
            }
            b'[' => {
                self.pos += 1;
                self.stack.push(Container::Array);
                self.state = State::ElementOrEnd;
                return Ok(Token::BeginArray);
            }
            b'"' => Token::String(self.string()?),
            b'-' | b'0'..=b'9' => Token::Number(self.number()?),
            b't' => {
                self.literal(b"true")?;
                Token::Bool(true)
            }
            b'f' => {
                self.literal(b"false")?;
                Token::Bool(false)
            }
            b'n' => {
                self.literal(b"null")?;
                Token::Null
            }
            _ => return Err(SyntaxError::invalid_character(byte, context, self.pos)),
        };
        self.after_value();
        Ok(token)
    }

    fn literal(&mut self, expected: &[u8]) -> Result<(), SyntaxError> {
        for &want in expected {
            match self.input.get(self.pos) {
                Some(&got) if got == want => self.pos += 1,
                Some(&got) => {
                    return Err(SyntaxError::invalid_character(
                        got,
                        "in literal",
                        self.pos,
                    ));
                }
                None => return Err(SyntaxError::unexpected_eof(self.pos)),
            }
        }
        Ok(())
    }

    fn number(&mut self) -> Result<&'a str, SyntaxError> {
        let start = self.pos;
        if self.input.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        match self.input.get(self.pos) {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.digits(),
            Some(&other) => {
                return Err(SyntaxError::invalid_character(
                    other,
                    "in numeric literal",
                    self.pos,
                ));
            }
            None => return Err(SyntaxError::unexpected_eof(self.pos)),
        }
        if self.input.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            self.required_digits()?;
        }
        if matches!(self.input.get(self.pos), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.input.get(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.required_digits()?;
        }
        // Only ASCII bytes were consumed above.
        Ok(std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default())
    }

    fn required_digits(&mut self) -> Result<(), SyntaxError> {
        match self.input.get(self.pos) {
            Some(b'0'..=b'9') => {
                self.digits();
                Ok(())
            }
            Some(&other) => Err(SyntaxError::invalid_character(
                other,
                "in numeric literal",
                self.pos,
            )),
            None => Err(SyntaxError::unexpected_eof(self.pos)),
        }
    }

    fn digits(&mut self) {
        while matches!(self.input.get(self.pos), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    fn string(&mut self) -> Result<Cow<'a, str>, SyntaxError> {
        let start = self.pos;
        self.pos += 1;
        let mut escaped = false;
        loop {
            let Some(&byte) = self.input.get(self.pos) else {
                return Err(SyntaxError::unexpected_eof(self.pos));
            };
            match byte {
                b'"' => break,
                b'\\' => {
                    escaped = true;
                    self.escape()?;
                }
                0x00..=0x1f => {
                    return Err(SyntaxError::invalid_character(
                        byte,
                        "in string literal",
                        self.pos,
                    ));
                }
                _ => self.pos += 1,
            }
        }
        self.pos += 1;
        let raw = &self.input[start..self.pos];

        if !escaped {
            return std::str::from_utf8(&raw[1..raw.len() - 1])
                .map(Cow::Borrowed)
                .map_err(|_| SyntaxError::invalid_string("invalid UTF-8 in string literal", start));
        }
        serde_json::from_slice::<String>(raw)
            .map(Cow::Owned)
            .map_err(|err| SyntaxError::invalid_string(err.to_string(), start))
    }

    fn escape(&mut self) -> Result<(), SyntaxError> {
        self.pos += 1;
        let Some(&byte) = self.input.get(self.pos) else {
            return Err(SyntaxError::unexpected_eof(self.pos));
        };
        match byte {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                self.pos += 1;
                Ok(())
            }
            b'u' => {
                self.pos += 1;
                for _ in 0..4 {
                    match self.input.get(self.pos) {
                        Some(hex) if hex.is_ascii_hexdigit() => self.pos += 1,
                        Some(&other) => {
                            return Err(SyntaxError::invalid_character(
                                other,
                                "in \\u hexadecimal character escape",
                                self.pos,
                            ));
                        }
                        None => return Err(SyntaxError::unexpected_eof(self.pos)),
                    }
                }
                Ok(())
            }
            _ => Err(SyntaxError::invalid_character(
                byte,
                "in string escape code",
                self.pos,
            )),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(
            self.input.get(self.pos),
            Some(b' ' | b'\t' | b'\n' | b'\r')
        ) {
            self.pos += 1;
        }
    }
}
