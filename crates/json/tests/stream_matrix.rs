use clusterapi_json::{JsonError, JsonReader, JsonWriter, TokenKind};
use proptest::prelude::*;
use serde_json::Value;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z]{0,6}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Re-emit whatever the reader sees through the writer.
fn copy(reader: &mut JsonReader<'_>, writer: &mut JsonWriter) -> Result<(), JsonError> {
    match reader.peek()? {
        TokenKind::BeginObject => {
            reader.begin_object()?;
            writer.begin_object();
            while let Some(name) = reader.next_property()? {
                writer.property(&name);
                copy(reader, writer)?;
            }
            writer.end_object();
        }
        TokenKind::BeginArray => {
            reader.begin_array()?;
            writer.begin_array();
            while reader.next_element()? {
                copy(reader, writer)?;
            }
            writer.end_array();
        }
        TokenKind::String => writer.string(&reader.read_string()?),
        TokenKind::Number => writer.f64(reader.read_f64()?),
        TokenKind::Bool => writer.bool(reader.read_bool()?),
        TokenKind::Null => {
            reader.read_null()?;
            writer.null();
        }
        other => panic!("unexpected token {other}"),
    }
    Ok(())
}

proptest! {
    #[test]
    fn skip_value_consumes_exactly_one_document(value in arb_json()) {
        let text = serde_json::to_string_pretty(&value).unwrap();
        let mut reader = JsonReader::from_str(&text);
        reader.skip_value().unwrap();
        prop_assert!(reader.finish().is_ok());
        prop_assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn reader_and_writer_agree_on_strings(s in ".*") {
        let mut writer = JsonWriter::new();
        writer.string(&s);
        let bytes = writer.into_bytes();
        let mut reader = JsonReader::new(&bytes);
        prop_assert_eq!(reader.read_string().unwrap(), s);
    }

    #[test]
    fn reader_and_writer_agree_on_integers(n in any::<i64>()) {
        let mut writer = JsonWriter::new();
        writer.i64(n);
        let bytes = writer.into_bytes();
        prop_assert_eq!(JsonReader::new(&bytes).read_i64().unwrap(), n);
    }
}

#[test]
fn copying_through_reader_and_writer_preserves_structure() {
    let input = r#"{ "name": "svc", "tags": ["a", "b"], "nested": {"on": true, "n": null, "ratio": 0.5}, "empty": {} }"#;
    let mut reader = JsonReader::from_str(input);
    let mut writer = JsonWriter::new();
    copy(&mut reader, &mut writer).unwrap();
    reader.finish().unwrap();
    let original: Value = serde_json::from_str(input).unwrap();
    let copied: Value = serde_json::from_slice(writer.as_bytes()).unwrap();
    assert_eq!(original, copied);
}

#[test]
fn peek_reports_each_kind() {
    let cases = [
        ("null", TokenKind::Null),
        ("true", TokenKind::Bool),
        ("-1", TokenKind::Number),
        ("\"s\"", TokenKind::String),
        ("[]", TokenKind::BeginArray),
        ("{}", TokenKind::BeginObject),
        ("   ", TokenKind::End),
    ];
    for (input, kind) in cases {
        assert_eq!(JsonReader::from_str(input).peek().unwrap(), kind, "{input}");
    }
    assert!(JsonReader::from_str("@").peek().is_err());
}
