//! Reader error type.

use thiserror::Error;

use crate::TokenKind;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("expected {expected} at byte {offset}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        offset: usize,
    },
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },
    #[error("invalid number at byte {offset}")]
    InvalidNumber { offset: usize },
    #[error("invalid {kind} `{value}` at byte {offset}")]
    InvalidScalar {
        kind: &'static str,
        value: String,
        offset: usize,
    },
    #[error("unescaped control character in string at byte {offset}")]
    ControlCharacter { offset: usize },
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("nesting deeper than {limit} at byte {offset}")]
    DepthLimitExceeded { limit: usize, offset: usize },
    #[error("trailing characters at byte {offset}")]
    TrailingCharacters { offset: usize },
    #[error("invalid string escape: {0}")]
    Escape(#[from] serde_json::Error),
}

impl JsonError {
    /// Byte offset the error was raised at, when one is known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEof { offset }
            | Self::InvalidNumber { offset }
            | Self::InvalidScalar { offset, .. }
            | Self::ControlCharacter { offset }
            | Self::InvalidUtf8 { offset }
            | Self::DepthLimitExceeded { offset, .. }
            | Self::TrailingCharacters { offset } => Some(*offset),
            Self::Escape(_) => None,
        }
    }
}
