//! `WireValue`: the per-type decode/encode entry points.
//!
//! Scalars map onto the reader's typed accessors; `Vec<V>` is a JSON array of
//! `V`. Model types implement the trait through their codec tables (see the
//! `wire_value!` and `wire_enum!` macros).

use clusterapi_json::{JsonReader, JsonWriter};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{CodecError, CodecOptions};

pub trait WireValue: Sized + 'static {
    /// Decode one value starting at the reader's current position.
    fn read(reader: &mut JsonReader<'_>, options: &CodecOptions) -> Result<Self, CodecError>;

    /// Encode this value at the writer's current position.
    fn write(&self, writer: &mut JsonWriter, options: &CodecOptions) -> Result<(), CodecError>;
}

impl WireValue for String {
    fn read(reader: &mut JsonReader<'_>, _: &CodecOptions) -> Result<Self, CodecError> {
        Ok(reader.read_string()?)
    }

    fn write(&self, writer: &mut JsonWriter, _: &CodecOptions) -> Result<(), CodecError> {
        writer.string(self);
        Ok(())
    }
}

impl WireValue for bool {
    fn read(reader: &mut JsonReader<'_>, _: &CodecOptions) -> Result<Self, CodecError> {
        Ok(reader.read_bool()?)
    }

    fn write(&self, writer: &mut JsonWriter, _: &CodecOptions) -> Result<(), CodecError> {
        writer.bool(*self);
        Ok(())
    }
}

impl WireValue for i32 {
    fn read(reader: &mut JsonReader<'_>, _: &CodecOptions) -> Result<Self, CodecError> {
        Ok(reader.read_i32()?)
    }

    fn write(&self, writer: &mut JsonWriter, _: &CodecOptions) -> Result<(), CodecError> {
        writer.i32(*self);
        Ok(())
    }
}

impl WireValue for i64 {
    fn read(reader: &mut JsonReader<'_>, _: &CodecOptions) -> Result<Self, CodecError> {
        Ok(reader.read_i64()?)
    }

    fn write(&self, writer: &mut JsonWriter, _: &CodecOptions) -> Result<(), CodecError> {
        writer.i64(*self);
        Ok(())
    }
}

impl WireValue for f64 {
    fn read(reader: &mut JsonReader<'_>, _: &CodecOptions) -> Result<Self, CodecError> {
        Ok(reader.read_f64()?)
    }

    fn write(&self, writer: &mut JsonWriter, _: &CodecOptions) -> Result<(), CodecError> {
        writer.f64(*self);
        Ok(())
    }
}

impl WireValue for Uuid {
    fn read(reader: &mut JsonReader<'_>, _: &CodecOptions) -> Result<Self, CodecError> {
        Ok(reader.read_uuid()?)
    }

    fn write(&self, writer: &mut JsonWriter, _: &CodecOptions) -> Result<(), CodecError> {
        writer.uuid(self);
        Ok(())
    }
}

impl WireValue for Duration {
    fn read(reader: &mut JsonReader<'_>, _: &CodecOptions) -> Result<Self, CodecError> {
        Ok(reader.read_duration()?)
    }

    fn write(&self, writer: &mut JsonWriter, _: &CodecOptions) -> Result<(), CodecError> {
        writer.duration(*self);
        Ok(())
    }
}

impl WireValue for OffsetDateTime {
    fn read(reader: &mut JsonReader<'_>, _: &CodecOptions) -> Result<Self, CodecError> {
        Ok(reader.read_datetime()?)
    }

    fn write(&self, writer: &mut JsonWriter, _: &CodecOptions) -> Result<(), CodecError> {
        writer.datetime(self).map_err(|_| CodecError::UnwritableValue {
            type_name: "OffsetDateTime",
            value: self.to_string(),
        })
    }
}

impl<V: WireValue> WireValue for Vec<V> {
    fn read(reader: &mut JsonReader<'_>, options: &CodecOptions) -> Result<Self, CodecError> {
        reader.begin_array()?;
        let mut items = Vec::new();
        while reader.next_element()? {
            items.push(V::read(reader, options)?);
        }
        Ok(items)
    }

    fn write(&self, writer: &mut JsonWriter, options: &CodecOptions) -> Result<(), CodecError> {
        writer.begin_array();
        for item in self {
            item.write(writer, options)?;
        }
        writer.end_array();
        Ok(())
    }
}
