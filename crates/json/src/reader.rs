//! `JsonReader`: pull-style JSON token reader over an in-memory buffer.
//!
//! The reader never builds a document tree. Callers drive it structurally:
//! `begin_object` / `next_property` for objects, `begin_array` /
//! `next_element` for arrays, and one `read_*` call (or `skip_value`) per
//! value. Separators are tracked internally.

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::duration::parse_duration;
use crate::util::{decode_string, find_ending_quote};
use crate::{JsonError, TokenKind};

/// Default nesting limit for [`JsonReader`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Saved reader position, see [`JsonReader::checkpoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    x: usize,
    depth: usize,
    after_open: bool,
}

pub struct JsonReader<'a> {
    data: &'a [u8],
    x: usize,
    depth: usize,
    max_depth: usize,
    /// True right after `{` or `[`, when the next member needs no separator.
    after_open: bool,
}

impl<'a> JsonReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            x: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            after_open: false,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.x
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            x: self.x,
            depth: self.depth,
            after_open: self.after_open,
        }
    }

    /// Return to a position saved with [`checkpoint`](Self::checkpoint).
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.x = checkpoint.x;
        self.depth = checkpoint.depth;
        self.after_open = checkpoint.after_open;
    }

    /// Kind of the next token, without consuming it.
    pub fn peek(&mut self) -> Result<TokenKind, JsonError> {
        self.skip_whitespace();
        match self.data.get(self.x) {
            None => Ok(TokenKind::End),
            Some(&b) => TokenKind::from_byte(b).ok_or(JsonError::UnexpectedToken {
                expected: "value",
                found: TokenKind::Invalid,
                offset: self.x,
            }),
        }
    }

    /// Require that nothing but whitespace is left.
    pub fn finish(&mut self) -> Result<(), JsonError> {
        self.skip_whitespace();
        if self.x < self.data.len() {
            return Err(JsonError::TrailingCharacters { offset: self.x });
        }
        Ok(())
    }

    // ---- Structure ----

    pub fn begin_object(&mut self) -> Result<(), JsonError> {
        self.open(b'{', "`{`")
    }

    /// Read the next property name of the current object, consuming the
    /// following `:`. Returns `None` once the closing `}` has been consumed.
    pub fn next_property(&mut self) -> Result<Option<String>, JsonError> {
        if !self.next_member(b'}', "`,` or `}`")? {
            return Ok(None);
        }
        let key = self.read_string()?;
        self.skip_whitespace();
        if self.data.get(self.x) != Some(&b':') {
            return Err(self.unexpected("`:`"));
        }
        self.x += 1;
        Ok(Some(key))
    }

    pub fn begin_array(&mut self) -> Result<(), JsonError> {
        self.open(b'[', "`[`")
    }

    /// Advance to the next element of the current array. Returns `false` once
    /// the closing `]` has been consumed.
    pub fn next_element(&mut self) -> Result<bool, JsonError> {
        self.next_member(b']', "`,` or `]`")
    }

    fn open(&mut self, byte: u8, expected: &'static str) -> Result<(), JsonError> {
        self.skip_whitespace();
        if self.data.get(self.x) != Some(&byte) {
            return Err(self.unexpected(expected));
        }
        if self.depth >= self.max_depth {
            return Err(JsonError::DepthLimitExceeded {
                limit: self.max_depth,
                offset: self.x,
            });
        }
        self.x += 1;
        self.depth += 1;
        self.after_open = true;
        Ok(())
    }

    fn next_member(&mut self, close: u8, expected: &'static str) -> Result<bool, JsonError> {
        self.skip_whitespace();
        match self.data.get(self.x) {
            None => Err(JsonError::UnexpectedEof { offset: self.x }),
            Some(&b) if b == close => {
                self.x += 1;
                self.depth = self.depth.saturating_sub(1);
                self.after_open = false;
                Ok(false)
            }
            Some(b',') if !self.after_open => {
                self.x += 1;
                self.skip_whitespace();
                Ok(true)
            }
            Some(_) if self.after_open => {
                self.after_open = false;
                Ok(true)
            }
            Some(_) => Err(self.unexpected(expected)),
        }
    }

    // ---- Scalars ----

    pub fn read_null(&mut self) -> Result<(), JsonError> {
        self.skip_whitespace();
        self.literal(b"null", "null")
    }

    pub fn read_bool(&mut self) -> Result<bool, JsonError> {
        self.skip_whitespace();
        match self.data.get(self.x) {
            Some(b't') => self.literal(b"true", "boolean").map(|_| true),
            Some(b'f') => self.literal(b"false", "boolean").map(|_| false),
            _ => Err(self.unexpected("boolean")),
        }
    }

    pub fn read_string(&mut self) -> Result<String, JsonError> {
        let (start, end) = self.string_span()?;
        let value = decode_string(&self.data[start..end], start)?;
        self.x = end + 1;
        Ok(value)
    }

    pub fn read_i64(&mut self) -> Result<i64, JsonError> {
        let (start, end, is_float) = self.number_span()?;
        if is_float {
            return Err(JsonError::InvalidNumber { offset: start });
        }
        self.number_text(start, end)?
            .parse()
            .map_err(|_| JsonError::InvalidNumber { offset: start })
    }

    pub fn read_i32(&mut self) -> Result<i32, JsonError> {
        let offset = self.peek_offset();
        let value = self.read_i64()?;
        i32::try_from(value).map_err(|_| JsonError::InvalidNumber { offset })
    }

    pub fn read_f64(&mut self) -> Result<f64, JsonError> {
        let (start, end, _) = self.number_span()?;
        self.number_text(start, end)?
            .parse()
            .map_err(|_| JsonError::InvalidNumber { offset: start })
    }

    /// Read a guid, written as a hyphenated string.
    pub fn read_uuid(&mut self) -> Result<Uuid, JsonError> {
        let offset = self.peek_offset();
        let text = self.read_string()?;
        Uuid::parse_str(&text).map_err(|_| JsonError::InvalidScalar {
            kind: "guid",
            value: text,
            offset,
        })
    }

    /// Read a time span, written as an ISO 8601 duration string.
    pub fn read_duration(&mut self) -> Result<Duration, JsonError> {
        let offset = self.peek_offset();
        let text = self.read_string()?;
        parse_duration(&text).ok_or(JsonError::InvalidScalar {
            kind: "duration",
            value: text,
            offset,
        })
    }

    /// Read an RFC 3339 timestamp.
    pub fn read_datetime(&mut self) -> Result<OffsetDateTime, JsonError> {
        let offset = self.peek_offset();
        let text = self.read_string()?;
        OffsetDateTime::parse(&text, &Rfc3339).map_err(|_| JsonError::InvalidScalar {
            kind: "datetime",
            value: text,
            offset,
        })
    }

    /// Consume the next value, including any nested structure.
    pub fn skip_value(&mut self) -> Result<(), JsonError> {
        match self.peek()? {
            TokenKind::BeginObject => {
                self.begin_object()?;
                while self.next_property()?.is_some() {
                    self.skip_value()?;
                }
                Ok(())
            }
            TokenKind::BeginArray => {
                self.begin_array()?;
                while self.next_element()? {
                    self.skip_value()?;
                }
                Ok(())
            }
            TokenKind::String => {
                let (_, end) = self.string_span()?;
                self.x = end + 1;
                Ok(())
            }
            TokenKind::Number => self.number_span().map(|_| ()),
            TokenKind::Bool => self.read_bool().map(|_| ()),
            TokenKind::Null => self.read_null(),
            TokenKind::EndObject | TokenKind::EndArray | TokenKind::Invalid => {
                Err(self.unexpected("value"))
            }
            TokenKind::End => Err(JsonError::UnexpectedEof { offset: self.x }),
        }
    }

    // ---- Internals ----

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.data.get(self.x) {
            self.x += 1;
        }
    }

    fn peek_offset(&mut self) -> usize {
        self.skip_whitespace();
        self.x
    }

    fn literal(&mut self, text: &[u8], expected: &'static str) -> Result<(), JsonError> {
        if self.data[self.x..].starts_with(text) {
            self.x += text.len();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Bounds of the next string's body; the cursor is left on the opening
    /// quote.
    fn string_span(&mut self) -> Result<(usize, usize), JsonError> {
        self.skip_whitespace();
        if self.data.get(self.x) != Some(&b'"') {
            return Err(self.unexpected("string"));
        }
        let start = self.x + 1;
        let end = find_ending_quote(self.data, start)?;
        Ok((start, end))
    }

    /// Consume a number and return its bounds and whether it has a fraction
    /// or exponent.
    fn number_span(&mut self) -> Result<(usize, usize, bool), JsonError> {
        self.skip_whitespace();
        let data = self.data;
        let start = self.x;
        let mut x = start;
        if data.get(x) == Some(&b'-') {
            x += 1;
        }
        let digits_start = x;
        while data.get(x).is_some_and(u8::is_ascii_digit) {
            x += 1;
        }
        if x == digits_start {
            return Err(self.unexpected("number"));
        }
        if data[digits_start] == b'0' && x - digits_start > 1 {
            return Err(JsonError::InvalidNumber { offset: start });
        }
        let mut is_float = false;
        if data.get(x) == Some(&b'.') {
            is_float = true;
            x += 1;
            let fraction_start = x;
            while data.get(x).is_some_and(u8::is_ascii_digit) {
                x += 1;
            }
            if x == fraction_start {
                return Err(JsonError::InvalidNumber { offset: start });
            }
        }
        if let Some(b'e' | b'E') = data.get(x) {
            is_float = true;
            x += 1;
            if let Some(b'+' | b'-') = data.get(x) {
                x += 1;
            }
            let exponent_start = x;
            while data.get(x).is_some_and(u8::is_ascii_digit) {
                x += 1;
            }
            if x == exponent_start {
                return Err(JsonError::InvalidNumber { offset: start });
            }
        }
        self.x = x;
        Ok((start, x, is_float))
    }

    fn number_text(&self, start: usize, end: usize) -> Result<&'a str, JsonError> {
        let data = self.data;
        std::str::from_utf8(&data[start..end]).map_err(|_| JsonError::InvalidUtf8 { offset: start })
    }

    fn unexpected(&self, expected: &'static str) -> JsonError {
        match self.data.get(self.x) {
            None => JsonError::UnexpectedEof { offset: self.x },
            Some(&b) => JsonError::UnexpectedToken {
                expected,
                found: TokenKind::from_byte(b).unwrap_or(TokenKind::Invalid),
                offset: self.x,
            },
        }
    }
}
