//! Decoding policy.
//!
//! The wire contract tolerates unknown enum strings, unknown properties and
//! absent required scalars. Each tolerance can be switched off independently.
//! The struct deserializes from camelCase keys so hosts can embed it in their
//! own configuration files.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Leniency {
    #[default]
    Lenient,
    Strict,
}

impl Leniency {
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

/// Where a tagged union's discriminator may appear in its object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TagPosition {
    /// The discriminator must be the first property.
    #[default]
    First,
    /// The discriminator may appear anywhere; the object is scanned ahead.
    Anywhere,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecOptions {
    /// Unknown enum strings: zero member (lenient) or `UnknownEnumValue`.
    pub unknown_enum_values: Leniency,
    /// Unknown properties: skipped (lenient) or `UnknownProperty`.
    pub unknown_properties: Leniency,
    /// Absent defaulted fields: default value (lenient) or `MissingProperty`.
    pub missing_required: Leniency,
    pub tag_position: TagPosition,
}

impl CodecOptions {
    pub fn lenient() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            unknown_enum_values: Leniency::Strict,
            unknown_properties: Leniency::Strict,
            missing_required: Leniency::Strict,
            tag_position: TagPosition::First,
        }
    }

    pub fn with_unknown_enum_values(mut self, leniency: Leniency) -> Self {
        self.unknown_enum_values = leniency;
        self
    }

    pub fn with_unknown_properties(mut self, leniency: Leniency) -> Self {
        self.unknown_properties = leniency;
        self
    }

    pub fn with_missing_required(mut self, leniency: Leniency) -> Self {
        self.missing_required = leniency;
        self
    }

    pub fn with_tag_position(mut self, position: TagPosition) -> Self {
        self.tag_position = position;
        self
    }
}
