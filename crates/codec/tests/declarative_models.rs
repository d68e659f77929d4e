use std::sync::OnceLock;

use clusterapi_codec::{
    from_str, from_str_with, to_string, wire_enum, wire_value, CodecError, CodecOptions, Leniency, NameMatch,
    ObjectCodec, ObjectModel, TagPosition, UnionCodec, UnionModel,
};
use serde_json::{json, Value};

wire_enum! {
    pub enum Shape: IgnoreCase {
        Invalid = "Invalid",
        Circle = "Circle",
        Square = "Square",
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Stamp {
    pub shape: Shape,
    pub label: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct Inked {
    pub stamp: Stamp,
    pub color: String,
}

#[derive(Debug, PartialEq)]
pub struct Blank {
    pub pages: i64,
}

#[derive(Debug, PartialEq)]
pub enum Sheet {
    Inked(Inked),
    Blank(Blank),
}

impl ObjectModel for Stamp {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<Stamp>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("Stamp", NameMatch::IgnoreCase)
                .defaulted("shape", |s| &s.shape)
                .optional("label", |s| &s.label)
                .build(|slots| {
                    Ok(Stamp {
                        shape: slots.take_or_default("shape")?,
                        label: slots.take_optional("label")?,
                    })
                })
        })
    }
}

impl ObjectModel for Inked {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<Inked>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("Inked", NameMatch::IgnoreCase)
                .tag("kind", "Inked")
                .required("stamp", |s| &s.stamp)
                .defaulted("color", |s| &s.color)
                .build(|slots| {
                    Ok(Inked {
                        stamp: slots.take("stamp")?,
                        color: slots.take_or_default("color")?,
                    })
                })
        })
    }
}

impl ObjectModel for Blank {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<Blank>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("Blank", NameMatch::IgnoreCase)
                .tag("kind", "Blank")
                .defaulted("pages", |s| &s.pages)
                .build(|slots| {
                    Ok(Blank {
                        pages: slots.take_or_default("pages")?,
                    })
                })
        })
    }
}

impl UnionModel for Sheet {
    fn codec() -> &'static UnionCodec<Self> {
        static CODEC: OnceLock<UnionCodec<Sheet>> = OnceLock::new();
        CODEC.get_or_init(|| {
            UnionCodec::<Self>::builder("Sheet", "kind", NameMatch::IgnoreCase)
                .variant("Inked", Sheet::Inked, |s| match s {
                    Sheet::Inked(v) => Some(v),
                    _ => None,
                })
                .variant("Blank", Sheet::Blank, |s| match s {
                    Sheet::Blank(v) => Some(v),
                    _ => None,
                })
                .build()
        })
    }

    fn tag(&self) -> &'static str {
        match self {
            Sheet::Inked(_) => "Inked",
            Sheet::Blank(_) => "Blank",
        }
    }
}

wire_value!(object Stamp, Inked, Blank);
wire_value!(union Sheet);

fn encoded(value: &Sheet) -> Value {
    serde_json::from_str(&to_string(value).unwrap()).unwrap()
}

#[test]
fn nested_objects_round_trip() {
    let sheet = Sheet::Inked(Inked {
        stamp: Stamp {
            shape: Shape::Square,
            label: Some("ok".into()),
        },
        color: "red".into(),
    });
    let text = to_string(&sheet).unwrap();
    assert_eq!(
        text,
        r#"{"kind":"Inked","stamp":{"shape":"Square","label":"ok"},"color":"red"}"#
    );
    assert_eq!(from_str::<Sheet>(&text).unwrap(), sheet);
}

#[test]
fn union_inside_sequence() {
    let sheets: Vec<Sheet> = from_str(r#"[{"kind": "Blank", "pages": 4}, {"KIND": "Blank"}]"#).unwrap();
    assert_eq!(sheets, [Sheet::Blank(Blank { pages: 4 }), Sheet::Blank(Blank { pages: 0 })]);
}

#[test]
fn subtype_decoded_directly_checks_its_tag() {
    assert_eq!(from_str::<Blank>(r#"{"kind": "Blank", "pages": 1}"#).unwrap(), Blank { pages: 1 });
    let err = from_str::<Blank>(r#"{"kind": "Inked"}"#).unwrap_err();
    assert!(matches!(err, CodecError::TagMismatch { expected: "Blank", .. }));
}

#[test]
fn missing_nested_required_object_is_reported() {
    let err = from_str::<Sheet>(r#"{"kind": "Inked", "color": "blue"}"#).unwrap_err();
    assert!(matches!(
        err,
        CodecError::MissingProperty {
            type_name: "Inked",
            property: "stamp"
        }
    ));
}

#[test]
fn unknown_enum_inside_nested_object() {
    let text = r#"{"kind": "Inked", "stamp": {"shape": "Hexagon"}}"#;
    let sheet = from_str::<Sheet>(text).unwrap();
    assert_eq!(
        encoded(&sheet),
        json!({"kind": "Inked", "stamp": {"shape": "Invalid"}, "color": ""})
    );

    let strict = CodecOptions::default().with_unknown_enum_values(Leniency::Strict);
    assert_eq!(from_str_with::<Sheet>(text, &strict).unwrap_err().code(), "UNKNOWN_ENUM_VALUE");
}

#[test]
fn tag_position_is_configurable() {
    let text = r#"{"pages": 2, "kind": "Blank"}"#;
    assert_eq!(from_str::<Sheet>(text).unwrap_err().code(), "SCHEMA_VIOLATION");

    let anywhere = CodecOptions::default().with_tag_position(TagPosition::Anywhere);
    assert_eq!(
        from_str_with::<Sheet>(text, &anywhere).unwrap(),
        Sheet::Blank(Blank { pages: 2 })
    );
}
