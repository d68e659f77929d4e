//! `JsonWriter`: streaming JSON writer into a growable byte buffer.
//!
//! Separators are inserted automatically: every value or property written
//! after another member of the same container is preceded by `,`.

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::duration::format_duration;
use crate::JsonError;

#[derive(Debug, Default)]
pub struct JsonWriter {
    buf: Vec<u8>,
    needs_separator: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            needs_separator: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// The written text. The writer only ever emits UTF-8.
    pub fn into_string(self) -> String {
        String::from_utf8(self.buf).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }

    // ---- Structure ----

    pub fn begin_object(&mut self) {
        self.separator();
        self.buf.push(b'{');
        self.needs_separator = false;
    }

    pub fn end_object(&mut self) {
        self.buf.push(b'}');
        self.needs_separator = true;
    }

    pub fn begin_array(&mut self) {
        self.separator();
        self.buf.push(b'[');
        self.needs_separator = false;
    }

    pub fn end_array(&mut self) {
        self.buf.push(b']');
        self.needs_separator = true;
    }

    /// Write a property name and its `:`; the value must follow.
    pub fn property(&mut self, name: &str) {
        self.separator();
        self.write_str(name);
        self.buf.push(b':');
        self.needs_separator = false;
    }

    // ---- Values ----

    pub fn null(&mut self) {
        self.raw(b"null");
    }

    pub fn bool(&mut self, value: bool) {
        let text: &[u8] = if value { b"true" } else { b"false" };
        self.raw(text);
    }

    pub fn string(&mut self, value: &str) {
        self.separator();
        self.write_str(value);
        self.needs_separator = true;
    }

    pub fn i32(&mut self, value: i32) {
        self.raw(value.to_string().as_bytes());
    }

    pub fn i64(&mut self, value: i64) {
        self.raw(value.to_string().as_bytes());
    }

    /// Non-finite values have no JSON form and are written as `null`.
    pub fn f64(&mut self, value: f64) {
        self.raw(format_float(value).as_bytes());
    }

    pub fn uuid(&mut self, value: &Uuid) {
        self.string(&value.hyphenated().to_string());
    }

    pub fn duration(&mut self, value: Duration) {
        self.string(&format_duration(value));
    }

    pub fn datetime(&mut self, value: &OffsetDateTime) -> Result<(), JsonError> {
        let text = value.format(&Rfc3339).map_err(|_| JsonError::InvalidScalar {
            kind: "datetime",
            value: value.to_string(),
            offset: self.buf.len(),
        })?;
        self.string(&text);
        Ok(())
    }

    // ---- Internals ----

    fn separator(&mut self) {
        if self.needs_separator {
            self.buf.push(b',');
        }
    }

    fn raw(&mut self, bytes: &[u8]) {
        self.separator();
        self.buf.extend_from_slice(bytes);
        self.needs_separator = true;
    }

    fn write_str(&mut self, s: &str) {
        let plain = s.bytes().all(|b| (32..=126).contains(&b) && b != b'"' && b != b'\\');
        if plain {
            self.buf.reserve(s.len() + 2);
            self.buf.push(b'"');
            self.buf.extend_from_slice(s.as_bytes());
            self.buf.push(b'"');
            return;
        }
        let escaped = serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""));
        self.buf.extend_from_slice(escaped.as_bytes());
    }
}

fn format_float(f: f64) -> String {
    if !f.is_finite() {
        String::from("null")
    } else if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{f}")
    }
}
