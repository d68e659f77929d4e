//! Codec error taxonomy.

use clusterapi_json::JsonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// The token stream does not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] JsonError),
    /// A discriminator property was expected but another property came first.
    #[error("{type_name}: expected discriminator property `{expected}`, found `{found}`")]
    SchemaViolation {
        type_name: &'static str,
        expected: &'static str,
        found: String,
    },
    /// A discriminator value, or a value's own tag, has no registered variant.
    #[error("{type_name}: unknown variant `{tag}`")]
    UnknownVariant { type_name: &'static str, tag: String },
    /// A concrete subtype was decoded from an object carrying another subtype's tag.
    #[error("{type_name}: tag `{found}` does not match `{expected}`")]
    TagMismatch {
        type_name: &'static str,
        expected: &'static str,
        found: String,
    },
    /// An in-memory enum value has no wire string.
    #[error("{enum_name}: value `{value}` has no wire representation")]
    UnrepresentableValue { enum_name: &'static str, value: String },
    /// An in-memory scalar has no valid wire form, such as a timestamp the
    /// RFC 3339 grammar cannot express.
    #[error("{type_name}: value `{value}` cannot be written")]
    UnwritableValue { type_name: &'static str, value: String },
    /// Strict mode only: an enum string outside the table.
    #[error("{enum_name}: unknown value `{value}`")]
    UnknownEnumValue { enum_name: &'static str, value: String },
    /// Strict mode only: a property the type does not declare.
    #[error("{type_name}: unknown property `{property}`")]
    UnknownProperty { type_name: &'static str, property: String },
    #[error("{type_name}: missing required property `{property}`")]
    MissingProperty {
        type_name: &'static str,
        property: &'static str,
    },
    /// A constructor asked for a slot with a type other than the declared one.
    #[error("{type_name}: property `{property}` was read as a different type")]
    SlotType {
        type_name: &'static str,
        property: &'static str,
    },
}

impl CodecError {
    /// Short stable name of the failure class, suitable for logs and metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "MALFORMED_INPUT",
            Self::SchemaViolation { .. } => "SCHEMA_VIOLATION",
            Self::UnknownVariant { .. } => "UNKNOWN_VARIANT",
            Self::TagMismatch { .. } => "TAG_MISMATCH",
            Self::UnrepresentableValue { .. } => "UNREPRESENTABLE_VALUE",
            Self::UnwritableValue { .. } => "UNWRITABLE_VALUE",
            Self::UnknownEnumValue { .. } => "UNKNOWN_ENUM_VALUE",
            Self::UnknownProperty { .. } => "UNKNOWN_PROPERTY",
            Self::MissingProperty { .. } => "MISSING_PROPERTY",
            Self::SlotType { .. } => "SLOT_TYPE",
        }
    }
}
