//! `clusterapi-codec`: declarative codecs for the management API wire types.
//!
//! Model types describe themselves once, as static tables:
//!
//! - [`ObjectCodec`] for records (field name, presence, name matching);
//! - [`UnionCodec`] for tagged unions dispatched on a discriminator property;
//! - [`EnumCodec`] for string enums with a zero member.
//!
//! [`WireValue`] is the common read/write surface; [`from_slice`] and
//! [`to_vec`] run it over whole documents. Decoding policy lives in
//! [`CodecOptions`].

mod api;
mod enums;
mod error;
mod macros;
mod names;
mod object;
mod options;
mod union;
mod value;

pub use api::{from_slice, from_slice_with, from_str, from_str_with, to_string, to_vec, to_vec_with};
pub use enums::{EnumCodec, WireEnum};
pub use error::CodecError;
pub use names::NameMatch;
pub use object::{ObjectCodec, ObjectCodecBuilder, ObjectModel, Presence, Slots};
pub use options::{CodecOptions, Leniency, TagPosition};
pub use union::{UnionCodec, UnionCodecBuilder, UnionModel};
pub use value::WireValue;

pub use clusterapi_json::{JsonError, JsonReader, JsonWriter, TokenKind};
