//! Whole-document helpers.

use clusterapi_json::{JsonReader, JsonWriter};

use crate::{CodecError, CodecOptions, WireValue};

pub fn from_slice<T: WireValue>(bytes: &[u8]) -> Result<T, CodecError> {
    from_slice_with(bytes, &CodecOptions::default())
}

/// Decode one value from `bytes`; anything but whitespace after it is an error.
pub fn from_slice_with<T: WireValue>(bytes: &[u8], options: &CodecOptions) -> Result<T, CodecError> {
    let mut reader = JsonReader::new(bytes);
    let value = T::read(&mut reader, options)?;
    reader.finish()?;
    Ok(value)
}

pub fn from_str<T: WireValue>(text: &str) -> Result<T, CodecError> {
    from_slice_with(text.as_bytes(), &CodecOptions::default())
}

pub fn from_str_with<T: WireValue>(text: &str, options: &CodecOptions) -> Result<T, CodecError> {
    from_slice_with(text.as_bytes(), options)
}

pub fn to_vec<T: WireValue>(value: &T) -> Result<Vec<u8>, CodecError> {
    to_vec_with(value, &CodecOptions::default())
}

pub fn to_vec_with<T: WireValue>(value: &T, options: &CodecOptions) -> Result<Vec<u8>, CodecError> {
    let mut writer = JsonWriter::new();
    value.write(&mut writer, options)?;
    Ok(writer.into_bytes())
}

pub fn to_string<T: WireValue>(value: &T) -> Result<String, CodecError> {
    let mut writer = JsonWriter::new();
    value.write(&mut writer, &CodecOptions::default())?;
    Ok(writer.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_trailing_data() {
        assert_eq!(from_str::<i32>(" 7 ").unwrap(), 7);
        let err = from_str::<i32>("7 8").unwrap_err();
        assert_eq!(err.code(), "MALFORMED_INPUT");
    }

    #[test]
    fn encodes_into_fresh_buffers() {
        assert_eq!(to_vec(&vec![String::from("a")]).unwrap(), br#"["a"]"#);
        assert_eq!(to_string(&false).unwrap(), "false");
    }
}
