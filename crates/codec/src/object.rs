//! Field-table object codec.
//!
//! Each model type declares one [`ObjectCodec`]: an ordered list of fields
//! (wire name, presence, name matching, value codec) and a constructor. The
//! same table drives both directions:
//!
//! - decoding scans properties in any order, stores each known value in a
//!   [`Slots`] map, skips unknown ones, and calls the constructor once the
//!   closing `}` has been read;
//! - encoding walks the table in declaration order, which is the wire order.

use std::any::Any;

use clusterapi_json::{JsonReader, JsonWriter, TokenKind};
use tracing::{debug, trace};

use crate::{CodecError, CodecOptions, NameMatch, WireValue};

/// A model type backed by an [`ObjectCodec`].
pub trait ObjectModel: Sized + 'static {
    fn codec() -> &'static ObjectCodec<Self>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Always written; decoding fails when absent.
    Required,
    /// Always written; when absent the decoder falls back to the default
    /// unless `missing_required` is strict.
    Defaulted,
    /// Written only when set; `null` on the wire reads as absent.
    Optional,
}

type DecodeSlotFn = fn(&mut JsonReader<'_>, &CodecOptions) -> Result<Box<dyn Any>, CodecError>;
type EncodeFieldFn<T> =
    Box<dyn Fn(&T, &mut JsonWriter, &CodecOptions) -> Result<(), CodecError> + Send + Sync>;
type BuildFn<T> = Box<dyn Fn(&mut Slots<'_>) -> Result<T, CodecError> + Send + Sync>;

enum FieldKind<T> {
    /// Constant discriminator property of a union subtype.
    Tag(&'static str),
    Value {
        presence: Presence,
        decode: DecodeSlotFn,
        encode: EncodeFieldFn<T>,
    },
}

struct Field<T> {
    wire: &'static str,
    names: NameMatch,
    kind: FieldKind<T>,
}

fn decode_slot<V: WireValue>(
    reader: &mut JsonReader<'_>,
    options: &CodecOptions,
) -> Result<Box<dyn Any>, CodecError> {
    Ok(Box::new(V::read(reader, options)?))
}

pub struct ObjectCodec<T> {
    type_name: &'static str,
    fields: Vec<Field<T>>,
    build: BuildFn<T>,
}

impl<T: 'static> ObjectCodec<T> {
    pub fn builder(type_name: &'static str, names: NameMatch) -> ObjectCodecBuilder<T> {
        ObjectCodecBuilder {
            type_name,
            names,
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Wire names in emission order.
    pub fn wire_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.wire)
    }

    /// The constant tag this subtype writes, if it is a union variant.
    pub fn tag(&self) -> Option<(&'static str, &'static str)> {
        self.fields.iter().find_map(|field| match field.kind {
            FieldKind::Tag(value) => Some((field.wire, value)),
            FieldKind::Value { .. } => None,
        })
    }

    /// Decode a complete object, starting at its `{`.
    pub fn decode(&self, reader: &mut JsonReader<'_>, options: &CodecOptions) -> Result<T, CodecError> {
        reader.begin_object()?;
        self.decode_members(reader, options)
    }

    /// Decode the remaining properties of an object whose `{` (and possibly
    /// some leading properties, such as a discriminator) were already read.
    pub fn decode_members(
        &self,
        reader: &mut JsonReader<'_>,
        options: &CodecOptions,
    ) -> Result<T, CodecError> {
        let mut slots = Slots::new(self.type_name, options);
        while let Some(name) = reader.next_property()? {
            let Some(field) = self.field(&name) else {
                if options.unknown_properties.is_strict() {
                    return Err(CodecError::UnknownProperty {
                        type_name: self.type_name,
                        property: name,
                    });
                }
                trace!(type_name = self.type_name, property = %name, "skipping unknown property");
                reader.skip_value()?;
                continue;
            };
            match &field.kind {
                FieldKind::Tag(expected) => {
                    let found = reader.read_string()?;
                    if found != *expected {
                        return Err(CodecError::TagMismatch {
                            type_name: self.type_name,
                            expected: *expected,
                            found,
                        });
                    }
                }
                FieldKind::Value { presence, decode, .. } => {
                    if *presence == Presence::Optional && reader.peek()? == TokenKind::Null {
                        debug!(type_name = self.type_name, property = field.wire, "null optional property");
                        reader.read_null()?;
                        slots.remove(field.wire);
                        continue;
                    }
                    let value = decode(reader, options)?;
                    slots.insert(field.wire, value);
                }
            }
        }
        (self.build)(&mut slots)
    }

    pub fn encode(&self, value: &T, writer: &mut JsonWriter, options: &CodecOptions) -> Result<(), CodecError> {
        writer.begin_object();
        for field in &self.fields {
            match &field.kind {
                FieldKind::Tag(tag) => {
                    writer.property(field.wire);
                    writer.string(tag);
                }
                FieldKind::Value { encode, .. } => encode(value, writer, options)?,
            }
        }
        writer.end_object();
        Ok(())
    }

    fn field(&self, name: &str) -> Option<&Field<T>> {
        self.fields.iter().find(|field| field.names.matches(field.wire, name))
    }
}

pub struct ObjectCodecBuilder<T> {
    type_name: &'static str,
    names: NameMatch,
    fields: Vec<Field<T>>,
}

impl<T: 'static> ObjectCodecBuilder<T> {
    /// Name matching for the fields declared after this call.
    pub fn match_names(mut self, names: NameMatch) -> Self {
        self.names = names;
        self
    }

    /// Constant discriminator property. Declare it first so it is written
    /// first.
    pub fn tag(mut self, wire: &'static str, value: &'static str) -> Self {
        self.fields.push(Field {
            wire,
            names: self.names,
            kind: FieldKind::Tag(value),
        });
        self
    }

    pub fn required<V, G>(self, wire: &'static str, get: G) -> Self
    where
        V: WireValue,
        G: Fn(&T) -> &V + Send + Sync + 'static,
    {
        self.always_written::<V, G>(wire, Presence::Required, get)
    }

    /// Required on the wire, but tolerated as absent by lenient decoding.
    pub fn defaulted<V, G>(self, wire: &'static str, get: G) -> Self
    where
        V: WireValue + Default,
        G: Fn(&T) -> &V + Send + Sync + 'static,
    {
        self.always_written::<V, G>(wire, Presence::Defaulted, get)
    }

    pub fn optional<V, G>(mut self, wire: &'static str, get: G) -> Self
    where
        V: WireValue,
        G: Fn(&T) -> &Option<V> + Send + Sync + 'static,
    {
        let encode: EncodeFieldFn<T> = Box::new(move |value, writer, options| match get(value) {
            Some(inner) => {
                writer.property(wire);
                inner.write(writer, options)
            }
            None => Ok(()),
        });
        self.push_value(wire, Presence::Optional, decode_slot::<V>, encode);
        self
    }

    pub fn build<B>(self, build: B) -> ObjectCodec<T>
    where
        B: Fn(&mut Slots<'_>) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        ObjectCodec {
            type_name: self.type_name,
            fields: self.fields,
            build: Box::new(build),
        }
    }

    fn always_written<V, G>(mut self, wire: &'static str, presence: Presence, get: G) -> Self
    where
        V: WireValue,
        G: Fn(&T) -> &V + Send + Sync + 'static,
    {
        let encode: EncodeFieldFn<T> = Box::new(move |value, writer, options| {
            writer.property(wire);
            get(value).write(writer, options)
        });
        self.push_value(wire, presence, decode_slot::<V>, encode);
        self
    }

    fn push_value(&mut self, wire: &'static str, presence: Presence, decode: DecodeSlotFn, encode: EncodeFieldFn<T>) {
        self.fields.push(Field {
            wire,
            names: self.names,
            kind: FieldKind::Value {
                presence,
                decode,
                encode,
            },
        });
    }
}

/// Values collected while scanning one object, keyed by declared wire name.
pub struct Slots<'o> {
    type_name: &'static str,
    options: &'o CodecOptions,
    values: Vec<(&'static str, Box<dyn Any>)>,
}

impl<'o> Slots<'o> {
    fn new(type_name: &'static str, options: &'o CodecOptions) -> Self {
        Self {
            type_name,
            options,
            values: Vec::new(),
        }
    }

    fn insert(&mut self, wire: &'static str, value: Box<dyn Any>) {
        match self.values.iter_mut().find(|(name, _)| *name == wire) {
            Some(slot) => slot.1 = value,
            None => self.values.push((wire, value)),
        }
    }

    fn remove(&mut self, wire: &'static str) -> Option<Box<dyn Any>> {
        let index = self.values.iter().position(|(name, _)| *name == wire)?;
        Some(self.values.swap_remove(index).1)
    }

    pub fn contains(&self, wire: &'static str) -> bool {
        self.values.iter().any(|(name, _)| *name == wire)
    }

    /// Take a [`Presence::Required`] field.
    pub fn take<V: 'static>(&mut self, wire: &'static str) -> Result<V, CodecError> {
        match self.take_optional(wire)? {
            Some(value) => Ok(value),
            None => Err(self.missing(wire)),
        }
    }

    /// Take a [`Presence::Defaulted`] field.
    pub fn take_or_default<V: Default + 'static>(&mut self, wire: &'static str) -> Result<V, CodecError> {
        match self.take_optional(wire)? {
            Some(value) => Ok(value),
            None if self.options.missing_required.is_strict() => Err(self.missing(wire)),
            None => {
                debug!(type_name = self.type_name, property = wire, "defaulting absent property");
                Ok(V::default())
            }
        }
    }

    /// Take a [`Presence::Optional`] field.
    pub fn take_optional<V: 'static>(&mut self, wire: &'static str) -> Result<Option<V>, CodecError> {
        let Some(value) = self.remove(wire) else {
            return Ok(None);
        };
        value.downcast::<V>().map(|value| Some(*value)).map_err(|_| CodecError::SlotType {
            type_name: self.type_name,
            property: wire,
        })
    }

    fn missing(&self, wire: &'static str) -> CodecError {
        CodecError::MissingProperty {
            type_name: self.type_name,
            property: wire,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::Leniency;

    #[derive(Debug, Default, PartialEq)]
    struct Replica {
        name: String,
        count: i32,
        weight: Option<f64>,
        labels: Option<Vec<String>>,
    }

    impl ObjectModel for Replica {
        fn codec() -> &'static ObjectCodec<Self> {
            static CODEC: OnceLock<ObjectCodec<Replica>> = OnceLock::new();
            CODEC.get_or_init(|| {
                ObjectCodec::<Self>::builder("Replica", NameMatch::Ordinal)
                    .required("Name", |r| &r.name)
                    .defaulted("Count", |r| &r.count)
                    .match_names(NameMatch::IgnoreCase)
                    .optional("weight", |r| &r.weight)
                    .optional("labels", |r| &r.labels)
                    .build(|slots| {
                        Ok(Replica {
                            name: slots.take("Name")?,
                            count: slots.take_or_default("Count")?,
                            weight: slots.take_optional("weight")?,
                            labels: slots.take_optional("labels")?,
                        })
                    })
            })
        }
    }

    fn decode(text: &str, options: &CodecOptions) -> Result<Replica, CodecError> {
        Replica::codec().decode(&mut JsonReader::from_str(text), options)
    }

    fn encode(value: &Replica) -> String {
        let mut writer = JsonWriter::new();
        Replica::codec()
            .encode(value, &mut writer, &CodecOptions::default())
            .unwrap();
        writer.into_string()
    }

    #[test]
    fn decodes_properties_in_any_order() {
        let replica = decode(r#"{"WEIGHT": 0.5, "Count": 3, "Name": "r1"}"#, &CodecOptions::default()).unwrap();
        assert_eq!(
            replica,
            Replica {
                name: "r1".into(),
                count: 3,
                weight: Some(0.5),
                labels: None,
            }
        );
    }

    #[test]
    fn ordinal_fields_ignore_other_casings() {
        let err = decode(r#"{"name": "r1"}"#, &CodecOptions::default()).unwrap_err();
        assert!(matches!(err, CodecError::MissingProperty { property: "Name", .. }));
    }

    #[test]
    fn encodes_in_table_order_and_omits_absent_optionals() {
        let replica = Replica {
            name: String::new(),
            count: 0,
            weight: None,
            labels: Some(vec!["a".into()]),
        };
        assert_eq!(encode(&replica), r#"{"Name":"","Count":0,"labels":["a"]}"#);
    }

    #[test]
    fn defaulted_fields_follow_missing_required_policy() {
        let lenient = decode(r#"{"Name": "r1"}"#, &CodecOptions::default()).unwrap();
        assert_eq!(lenient.count, 0);

        let strict = CodecOptions::default().with_missing_required(Leniency::Strict);
        let err = decode(r#"{"Name": "r1"}"#, &strict).unwrap_err();
        assert!(matches!(err, CodecError::MissingProperty { property: "Count", .. }));
    }

    #[test]
    fn null_optional_reads_as_absent() {
        let replica = decode(r#"{"Name": "r1", "weight": 2, "weight": null}"#, &CodecOptions::default()).unwrap();
        assert_eq!(replica.weight, None);
    }

    #[test]
    fn null_required_is_malformed() {
        let err = decode(r#"{"Name": null}"#, &CodecOptions::default()).unwrap_err();
        assert!(matches!(err, CodecError::MalformedInput(_)));
    }

    #[test]
    fn unknown_properties_are_skipped_or_rejected() {
        let text = r#"{"Extra": {"deep": [1, 2]}, "Name": "r1", "more": null}"#;
        assert_eq!(decode(text, &CodecOptions::default()).unwrap().name, "r1");

        let err = decode(text, &CodecOptions::strict()).unwrap_err();
        match err {
            CodecError::UnknownProperty { type_name, property } => {
                assert_eq!(type_name, "Replica");
                assert_eq!(property, "Extra");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn duplicate_properties_keep_the_last_value() {
        let replica = decode(r#"{"Name": "a", "Name": "b"}"#, &CodecOptions::default()).unwrap();
        assert_eq!(replica.name, "b");
    }

    #[test]
    fn slot_type_mismatch_is_reported() {
        let codec = ObjectCodec::<String>::builder("Broken", NameMatch::Ordinal)
            .required("n", |s: &String| s)
            .build(|slots| {
                let n: i32 = slots.take("n")?;
                Ok(n.to_string())
            });
        let err = codec
            .decode(&mut JsonReader::from_str(r#"{"n": "x"}"#), &CodecOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), "SLOT_TYPE");
    }

    #[test]
    fn exposes_wire_names() {
        let names: Vec<_> = Replica::codec().wire_names().collect();
        assert_eq!(names, ["Name", "Count", "weight", "labels"]);
        assert_eq!(Replica::codec().tag(), None);
    }
}
