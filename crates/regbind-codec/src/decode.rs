use std::char::REPLACEMENT_CHARACTER;

use regbind_types::ValueType;

use crate::config::{CodecConfig, MultiStringMode};
use crate::error::{CodecError, CodecResult};
use crate::value::CanonicalValue;

/// Decode a raw store value into its canonical form.
///
/// Integer tags read only their leading 4 or 8 bytes; string tags are
/// UTF-16LE. Tags outside the table fail with
/// [`CodecError::UnsupportedType`].
pub fn decode_raw(
    data: &[u8],
    value_type: ValueType,
    config: &CodecConfig,
) -> CodecResult<CanonicalValue> {
    match value_type {
        ValueType::DWORD_BIG_ENDIAN => {
            Ok(CanonicalValue::Integer(u32::from_be_bytes(fixed(data, value_type)?)))
        }
        ValueType::DWORD_LITTLE_ENDIAN => {
            Ok(CanonicalValue::Integer(u32::from_le_bytes(fixed(data, value_type)?)))
        }
        ValueType::QWORD_LITTLE_ENDIAN => {
            Ok(CanonicalValue::BigInteger(u64::from_le_bytes(fixed(data, value_type)?)))
        }
        ValueType::SZ | ValueType::EXPAND_SZ => {
            // Drop the terminating null unit.
            let body = &data[..data.len().saturating_sub(2)];
            Ok(CanonicalValue::Text(utf16le_to_string(body)))
        }
        ValueType::MULTI_SZ => Ok(CanonicalValue::TextList(split_multi_string(
            &utf16le_to_string(data),
            config.multi_string,
        ))),
        ValueType::BINARY => Ok(CanonicalValue::Blob(data.to_vec())),
        other => Err(CodecError::UnsupportedType(other)),
    }
}

fn fixed<const N: usize>(data: &[u8], value_type: ValueType) -> CodecResult<[u8; N]> {
    data.get(..N)
        .and_then(|head| head.try_into().ok())
        .ok_or(CodecError::Truncated {
            value_type,
            expected: N,
            actual: data.len(),
        })
}

fn split_multi_string(text: &str, mode: MultiStringMode) -> Vec<String> {
    match mode {
        MultiStringMode::Legacy => {
            let mut parts: Vec<String> = text.split('\0').map(String::from).collect();
            parts.truncate(parts.len().saturating_sub(2));
            parts
        }
        MultiStringMode::Lenient => {
            let body = text.trim_end_matches('\0');
            if body.is_empty() {
                Vec::new()
            } else {
                body.split('\0').map(String::from).collect()
            }
        }
    }
}

/// Decode UTF-16LE bytes, replacing unpaired surrogates and a dangling odd
/// byte with U+FFFD.
pub fn utf16le_to_string(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    let mut out: String = char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(REPLACEMENT_CHARACTER))
        .collect();
    if bytes.len() % 2 == 1 {
        out.push(REPLACEMENT_CHARACTER);
    }
    out
}
