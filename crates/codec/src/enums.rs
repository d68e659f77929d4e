//! String-enum codec.
//!
//! Every wire enum has a zero member (its first declared member). Unknown
//! strings decode to it unless `unknown_enum_values` is strict, so a newer
//! server can add members without breaking older clients.

use std::fmt;

use clusterapi_json::{JsonReader, JsonWriter};
use tracing::debug;

use crate::{CodecError, CodecOptions, NameMatch};

/// An enum backed by an [`EnumCodec`]; usually declared with [`wire_enum!`](crate::wire_enum).
pub trait WireEnum: Copy + PartialEq + fmt::Debug + 'static {
    fn codec() -> &'static EnumCodec<Self>;
}

pub struct EnumCodec<E: 'static> {
    name: &'static str,
    names: NameMatch,
    members: &'static [(&'static str, E)],
    zero: E,
}

impl<E: Copy + PartialEq + fmt::Debug> EnumCodec<E> {
    pub const fn new(name: &'static str, names: NameMatch, members: &'static [(&'static str, E)], zero: E) -> Self {
        Self {
            name,
            names,
            members,
            zero,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn zero(&self) -> E {
        self.zero
    }

    pub fn members(&self) -> &'static [(&'static str, E)] {
        self.members
    }

    pub fn parse(&self, text: &str, options: &CodecOptions) -> Result<E, CodecError> {
        if let Some((_, value)) = self.members.iter().find(|(wire, _)| self.names.matches(wire, text)) {
            return Ok(*value);
        }
        if options.unknown_enum_values.is_strict() {
            return Err(CodecError::UnknownEnumValue {
                enum_name: self.name,
                value: text.to_owned(),
            });
        }
        debug!(enum_name = self.name, value = text, zero = ?self.zero, "unknown enum value");
        Ok(self.zero)
    }

    pub fn wire_name(&self, value: E) -> Result<&'static str, CodecError> {
        self.members
            .iter()
            .find(|(_, member)| *member == value)
            .map(|(wire, _)| *wire)
            .ok_or_else(|| CodecError::UnrepresentableValue {
                enum_name: self.name,
                value: format!("{value:?}"),
            })
    }

    pub fn decode(&self, reader: &mut JsonReader<'_>, options: &CodecOptions) -> Result<E, CodecError> {
        let text = reader.read_string()?;
        self.parse(&text, options)
    }

    pub fn encode(&self, value: E, writer: &mut JsonWriter) -> Result<(), CodecError> {
        writer.string(self.wire_name(value)?);
        Ok(())
    }
}

/// Declare a string enum together with its [`WireEnum`] table, a `Default`
/// returning the first member, `Display` as the wire string, and
/// [`WireValue`](crate::WireValue).
///
/// ```ignore
/// wire_enum! {
///     pub enum RestartPolicy: IgnoreCase {
///         OnFailure = "OnFailure",
///         Never = "Never",
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $names:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Wire strings in declaration order; the first member is the zero value.
            pub const MEMBERS: &'static [(&'static str, $name)] = &[$(($wire, $name::$variant)),+];

            pub fn as_wire_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::MEMBERS[0].1
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_wire_str())
            }
        }

        impl $crate::WireEnum for $name {
            fn codec() -> &'static $crate::EnumCodec<Self> {
                static CODEC: $crate::EnumCodec<$name> = $crate::EnumCodec::new(
                    stringify!($name),
                    $crate::NameMatch::$names,
                    $name::MEMBERS,
                    $name::MEMBERS[0].1,
                );
                &CODEC
            }
        }

        impl $crate::WireValue for $name {
            fn read(
                reader: &mut $crate::JsonReader<'_>,
                options: &$crate::CodecOptions,
            ) -> ::core::result::Result<Self, $crate::CodecError> {
                <$name as $crate::WireEnum>::codec().decode(reader, options)
            }

            fn write(
                &self,
                writer: &mut $crate::JsonWriter,
                _: &$crate::CodecOptions,
            ) -> ::core::result::Result<(), $crate::CodecError> {
                <$name as $crate::WireEnum>::codec().encode(*self, writer)
            }
        }
    };
}
