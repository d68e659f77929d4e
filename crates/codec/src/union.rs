//! Tagged-union (discriminator) codec.
//!
//! A union is a Rust enum whose variants each wrap an [`ObjectModel`]. On the
//! wire it is a single object; one property (the discriminator, usually
//! `kind` or `Kind`) names the variant.
//!
//! Decoding with [`TagPosition::First`] is a three step machine:
//!
//! 1. *expect tag*: the first property must be the discriminator, otherwise
//!    [`CodecError::SchemaViolation`];
//! 2. *dispatch*: the tag value selects a variant, otherwise
//!    [`CodecError::UnknownVariant`];
//! 3. *delegate*: the variant's object codec reads the remaining properties.
//!
//! [`TagPosition::Anywhere`] scans ahead for the discriminator, rewinds, and
//! lets the variant's codec read the whole object (it checks the tag itself).
//!
//! Encoding looks the variant up by the value's own tag and hands over to the
//! variant's object codec, which writes the tag as its first property.

use clusterapi_json::{JsonReader, JsonWriter};
use tracing::debug;

use crate::{CodecError, CodecOptions, NameMatch, ObjectModel, TagPosition};

/// A tagged union backed by a [`UnionCodec`].
pub trait UnionModel: Sized + 'static {
    fn codec() -> &'static UnionCodec<Self>;

    /// Discriminator value of the variant this value holds.
    fn tag(&self) -> &'static str;
}

type VariantDecodeFn<T> =
    Box<dyn Fn(&mut JsonReader<'_>, &CodecOptions) -> Result<T, CodecError> + Send + Sync>;
type VariantEncodeFn<T> =
    Box<dyn Fn(&T, &mut JsonWriter, &CodecOptions) -> Option<Result<(), CodecError>> + Send + Sync>;

struct Variant<T> {
    tag: &'static str,
    decode_members: VariantDecodeFn<T>,
    encode: VariantEncodeFn<T>,
}

pub struct UnionCodec<T> {
    type_name: &'static str,
    tag_property: &'static str,
    names: NameMatch,
    variants: Vec<Variant<T>>,
}

impl<T: 'static> UnionCodec<T> {
    pub fn builder(
        type_name: &'static str,
        tag_property: &'static str,
        names: NameMatch,
    ) -> UnionCodecBuilder<T> {
        UnionCodecBuilder {
            codec: UnionCodec {
                type_name,
                tag_property,
                names,
                variants: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn tag_property(&self) -> &'static str {
        self.tag_property
    }

    /// Registered discriminator values, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|variant| variant.tag)
    }

    pub fn decode(&self, reader: &mut JsonReader<'_>, options: &CodecOptions) -> Result<T, CodecError> {
        reader.begin_object()?;
        match options.tag_position {
            TagPosition::First => self.decode_tag_first(reader, options),
            TagPosition::Anywhere => self.decode_tag_anywhere(reader, options),
        }
    }

    fn decode_tag_first(&self, reader: &mut JsonReader<'_>, options: &CodecOptions) -> Result<T, CodecError> {
        match reader.next_property()? {
            Some(name) if self.names.matches(self.tag_property, &name) => {}
            Some(name) => return Err(self.schema_violation(name)),
            None => return Err(self.schema_violation(String::from("end of object"))),
        }
        let tag = reader.read_string()?;
        let variant = self.variant(&tag)?;
        (variant.decode_members)(reader, options)
    }

    fn decode_tag_anywhere(&self, reader: &mut JsonReader<'_>, options: &CodecOptions) -> Result<T, CodecError> {
        let start = reader.checkpoint();
        let tag = loop {
            match reader.next_property()? {
                Some(name) if self.names.matches(self.tag_property, &name) => break reader.read_string()?,
                Some(_) => reader.skip_value()?,
                None => return Err(self.schema_violation(String::from("end of object"))),
            }
        };
        let variant = self.variant(&tag)?;
        reader.rewind(start);
        (variant.decode_members)(reader, options)
    }

    fn variant(&self, tag: &str) -> Result<&Variant<T>, CodecError> {
        self.variants.iter().find(|variant| variant.tag == tag).ok_or_else(|| {
            debug!(type_name = self.type_name, tag, "no variant registered for tag");
            CodecError::UnknownVariant {
                type_name: self.type_name,
                tag: tag.to_owned(),
            }
        })
    }

    fn schema_violation(&self, found: String) -> CodecError {
        CodecError::SchemaViolation {
            type_name: self.type_name,
            expected: self.tag_property,
            found,
        }
    }
}

impl<T: UnionModel> UnionCodec<T> {
    pub fn encode(&self, value: &T, writer: &mut JsonWriter, options: &CodecOptions) -> Result<(), CodecError> {
        let tag = value.tag();
        let variant = self.variant(tag)?;
        (variant.encode)(value, writer, options).unwrap_or_else(|| {
            Err(CodecError::UnknownVariant {
                type_name: self.type_name,
                tag: tag.to_owned(),
            })
        })
    }
}

pub struct UnionCodecBuilder<T> {
    codec: UnionCodec<T>,
}

impl<T: 'static> UnionCodecBuilder<T> {
    /// Register a variant: its discriminator value, the enum constructor and
    /// the matching projection back out of the enum.
    pub fn variant<V, W, U>(mut self, tag: &'static str, wrap: W, unwrap: U) -> Self
    where
        V: ObjectModel,
        W: Fn(V) -> T + Send + Sync + 'static,
        U: Fn(&T) -> Option<&V> + Send + Sync + 'static,
    {
        debug_assert_eq!(
            V::codec().tag().map(|(_, value)| value),
            Some(tag),
            "{}: variant codec must declare tag `{tag}`",
            self.codec.type_name,
        );
        self.codec.variants.push(Variant {
            tag,
            decode_members: Box::new(move |reader, options| {
                V::codec().decode_members(reader, options).map(&wrap)
            }),
            encode: Box::new(move |value, writer, options| {
                unwrap(value).map(|inner| V::codec().encode(inner, writer, options))
            }),
        });
        self
    }

    pub fn build(self) -> UnionCodec<T> {
        self.codec
    }
}
