//! `clusterapi-json`: streaming JSON reader and writer.
//!
//! This is the token layer underneath the model codecs: [`JsonReader`] pulls
//! property names and typed scalars (strings, integers, booleans, guids, time
//! spans, timestamps) out of a byte buffer, and [`JsonWriter`] emits them back.

pub mod duration;
pub mod error;
pub mod reader;
pub mod token;
pub mod util;
pub mod writer;

pub use duration::{format_duration, parse_duration};
pub use error::JsonError;
pub use reader::{Checkpoint, JsonReader, DEFAULT_MAX_DEPTH};
pub use token::TokenKind;
pub use writer::JsonWriter;
