use std::fmt;

/// Kind of the next token in the input, as reported by
/// [`JsonReader::peek`](crate::JsonReader::peek).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Null,
    Bool,
    Number,
    String,
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    /// No input left.
    End,
    /// A byte that cannot start any JSON token.
    Invalid,
}

impl TokenKind {
    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'n' => Some(Self::Null),
            b't' | b'f' => Some(Self::Bool),
            b'-' | b'0'..=b'9' => Some(Self::Number),
            b'"' => Some(Self::String),
            b'[' => Some(Self::BeginArray),
            b']' => Some(Self::EndArray),
            b'{' => Some(Self::BeginObject),
            b'}' => Some(Self::EndObject),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::BeginArray => "`[`",
            Self::EndArray => "`]`",
            Self::BeginObject => "`{`",
            Self::EndObject => "`}`",
            Self::End => "end of input",
            Self::Invalid => "invalid character",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
