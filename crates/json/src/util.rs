//! String scanning helpers shared by the reader.

use crate::JsonError;

/// Find the position of the closing `"` of a JSON string.
///
/// `x` must point to the first byte after the opening quote. Backslash escapes
/// are honoured, so `\"` does not terminate the string. Unescaped control
/// characters are rejected.
pub fn find_ending_quote(data: &[u8], mut x: usize) -> Result<usize, JsonError> {
    let len = data.len();
    while x < len {
        match data[x] {
            b'"' => return Ok(x),
            b'\\' => x += 2,
            0x00..=0x1f => return Err(JsonError::ControlCharacter { offset: x }),
            _ => x += 1,
        }
    }
    Err(JsonError::UnexpectedEof { offset: len })
}

/// Decode the body of a JSON string (the bytes between the quotes).
///
/// `offset` is the position of the body in the input and is only used for
/// error reporting.
pub fn decode_string(bytes: &[u8], offset: usize) -> Result<String, JsonError> {
    if !bytes.contains(&b'\\') {
        return std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|err| JsonError::InvalidUtf8 {
                offset: offset + err.valid_up_to(),
            });
    }
    // Escapes (surrogate pairs included) go through serde_json.
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    Ok(serde_json::from_slice(&quoted)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ending_quote_skips_escaped_quotes() {
        let data = br#""a\"b" tail"#;
        assert_eq!(find_ending_quote(data, 1).unwrap(), 5);
    }

    #[test]
    fn ending_quote_after_escaped_backslash() {
        let data = br#""a\\" tail"#;
        assert_eq!(find_ending_quote(data, 1).unwrap(), 4);
    }

    #[test]
    fn unterminated_string_is_eof() {
        let err = find_ending_quote(br#""abc"#, 1).unwrap_err();
        assert!(matches!(err, JsonError::UnexpectedEof { offset: 4 }));
    }

    #[test]
    fn decodes_escapes() {
        assert_eq!(decode_string(r#"a\nbé"#.as_bytes(), 0).unwrap(), "a\nbé");
        assert_eq!(decode_string(r#"\ud83c\udf89"#.as_bytes(), 0).unwrap(), "🎉");
        assert_eq!(decode_string("🎉".as_bytes(), 0).unwrap(), "🎉");
    }

    #[test]
    fn raw_control_characters_are_rejected() {
        let err = find_ending_quote(b"\"a\tb\"", 1).unwrap_err();
        assert!(matches!(err, JsonError::ControlCharacter { offset: 2 }));
        assert_eq!(find_ending_quote(br#""a\tb""#, 1).unwrap(), 5);
    }

    #[test]
    fn plain_body_is_borrowed_verbatim() {
        assert_eq!(decode_string("héllo".as_bytes(), 0).unwrap(), "héllo");
    }
}
