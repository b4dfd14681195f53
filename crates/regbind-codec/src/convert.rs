use std::fmt;

use crate::config::NarrowingMode;
use crate::error::{CodecError, CodecResult};
use crate::value::{CanonicalKind, CanonicalValue};

/// Concrete field type a canonical value can be written into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    U64,
    I64,
    String,
    StringList,
    Bytes,
}

impl TargetKind {
    /// The only canonical kind this target accepts.
    pub fn accepts(&self) -> CanonicalKind {
        match self {
            Self::U8 | Self::U16 | Self::U32 | Self::I8 | Self::I16 | Self::I32 => {
                CanonicalKind::Integer
            }
            Self::U64 | Self::I64 => CanonicalKind::BigInteger,
            Self::String => CanonicalKind::Text,
            Self::StringList => CanonicalKind::TextList,
            Self::Bytes => CanonicalKind::Blob,
        }
    }

    /// Check that `value` converts into this target without performing the
    /// conversion.
    pub fn check(&self, value: &CanonicalValue, narrowing: NarrowingMode) -> CodecResult<()> {
        if value.kind() != self.accepts() {
            return Err(CodecError::Mismatch {
                found: value.kind(),
                target: *self,
            });
        }
        let CanonicalValue::Integer(raw) = *value else {
            return Ok(());
        };
        let value = CanonicalValue::Integer(raw);
        match self {
            Self::U8 => u8::from_canonical(value, narrowing).map(drop),
            Self::U16 => u16::from_canonical(value, narrowing).map(drop),
            Self::I8 => i8::from_canonical(value, narrowing).map(drop),
            Self::I16 => i16::from_canonical(value, narrowing).map(drop),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::U64 => "u64",
            Self::I64 => "i64",
            Self::String => "String",
            Self::StringList => "Vec<String>",
            Self::Bytes => "Vec<u8>",
        })
    }
}

/// A Rust type that can be produced from a [`CanonicalValue`].
pub trait FromCanonical: Sized {
    const KIND: TargetKind;

    fn from_canonical(value: CanonicalValue, narrowing: NarrowingMode) -> CodecResult<Self>;
}

fn mismatch(value: &CanonicalValue, target: TargetKind) -> CodecError {
    CodecError::Mismatch {
        found: value.kind(),
        target,
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty => $kind:ident, $checked:expr;)*) => {
        $(
            impl FromCanonical for $ty {
                const KIND: TargetKind = TargetKind::$kind;

                #[allow(clippy::redundant_closure_call)]
                fn from_canonical(
                    value: CanonicalValue,
                    narrowing: NarrowingMode,
                ) -> CodecResult<Self> {
                    match value {
                        CanonicalValue::Integer(raw) => match narrowing {
                            NarrowingMode::Wrap => Ok(raw as $ty),
                            NarrowingMode::Checked => ($checked)(raw).ok_or(CodecError::Overflow {
                                value: raw,
                                target: Self::KIND,
                            }),
                        },
                        other => Err(mismatch(&other, Self::KIND)),
                    }
                }
            }
        )*
    };
}

impl_from_integer! {
    u8 => U8, |raw: u32| u8::try_from(raw).ok();
    u16 => U16, |raw: u32| u16::try_from(raw).ok();
    u32 => U32, |raw: u32| Some(raw);
    i8 => I8, |raw: u32| i8::try_from(raw as i32).ok();
    i16 => I16, |raw: u32| i16::try_from(raw as i32).ok();
    i32 => I32, |raw: u32| Some(raw as i32);
}

impl FromCanonical for u64 {
    const KIND: TargetKind = TargetKind::U64;

    fn from_canonical(value: CanonicalValue, _: NarrowingMode) -> CodecResult<Self> {
        match value {
            CanonicalValue::BigInteger(v) => Ok(v),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }
}

impl FromCanonical for i64 {
    const KIND: TargetKind = TargetKind::I64;

    fn from_canonical(value: CanonicalValue, _: NarrowingMode) -> CodecResult<Self> {
        match value {
            CanonicalValue::BigInteger(v) => Ok(v as i64),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }
}

impl FromCanonical for String {
    const KIND: TargetKind = TargetKind::String;

    fn from_canonical(value: CanonicalValue, _: NarrowingMode) -> CodecResult<Self> {
        match value {
            CanonicalValue::Text(s) => Ok(s),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }
}

impl FromCanonical for Vec<String> {
    const KIND: TargetKind = TargetKind::StringList;

    fn from_canonical(value: CanonicalValue, _: NarrowingMode) -> CodecResult<Self> {
        match value {
            CanonicalValue::TextList(list) => Ok(list),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }
}

impl FromCanonical for Vec<u8> {
    const KIND: TargetKind = TargetKind::Bytes;

    fn from_canonical(value: CanonicalValue, _: NarrowingMode) -> CodecResult<Self> {
        match value {
            CanonicalValue::Blob(bytes) => Ok(bytes),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRAP: NarrowingMode = NarrowingMode::Wrap;
    const CHECKED: NarrowingMode = NarrowingMode::Checked;

    #[test]
    fn integer_into_every_small_width() {
        let v = || CanonicalValue::Integer(42);
        assert_eq!(u8::from_canonical(v(), WRAP).unwrap(), 42);
        assert_eq!(u16::from_canonical(v(), WRAP).unwrap(), 42);
        assert_eq!(u32::from_canonical(v(), WRAP).unwrap(), 42);
        assert_eq!(i8::from_canonical(v(), WRAP).unwrap(), 42);
        assert_eq!(i16::from_canonical(v(), WRAP).unwrap(), 42);
        assert_eq!(i32::from_canonical(v(), WRAP).unwrap(), 42);
    }

    #[test]
    fn wrap_truncates_silently() {
        let v = || CanonicalValue::Integer(0x1_23);
        assert_eq!(u8::from_canonical(v(), WRAP).unwrap(), 0x23);
        let all_ones = || CanonicalValue::Integer(u32::MAX);
        assert_eq!(i8::from_canonical(all_ones(), WRAP).unwrap(), -1);
        assert_eq!(i32::from_canonical(all_ones(), WRAP).unwrap(), -1);
        assert_eq!(u16::from_canonical(all_ones(), WRAP).unwrap(), u16::MAX);
    }

    #[test]
    fn checked_rejects_out_of_range() {
        let err = u8::from_canonical(CanonicalValue::Integer(256), CHECKED).unwrap_err();
        assert_eq!(
            err,
            CodecError::Overflow {
                value: 256,
                target: TargetKind::U8
            }
        );
        assert!(i16::from_canonical(CanonicalValue::Integer(40_000), CHECKED).is_err());
    }

    #[test]
    fn checked_reads_signed_as_i32() {
        // 0xFFFFFFFF is -1 as i32, which fits every signed width.
        let v = || CanonicalValue::Integer(u32::MAX);
        assert_eq!(i8::from_canonical(v(), CHECKED).unwrap(), -1);
        assert_eq!(i16::from_canonical(v(), CHECKED).unwrap(), -1);
        assert!(u8::from_canonical(v(), CHECKED).is_err());
        assert_eq!(u32::from_canonical(v(), CHECKED).unwrap(), u32::MAX);
    }

    #[test]
    fn big_integer_only_into_64_bit() {
        let v = || CanonicalValue::BigInteger(u64::MAX);
        assert_eq!(u64::from_canonical(v(), WRAP).unwrap(), u64::MAX);
        assert_eq!(i64::from_canonical(v(), WRAP).unwrap(), -1);
        assert_eq!(
            i32::from_canonical(v(), WRAP).unwrap_err(),
            CodecError::Mismatch {
                found: CanonicalKind::BigInteger,
                target: TargetKind::I32
            }
        );
        assert!(u32::from_canonical(v(), WRAP).is_err());
    }

    #[test]
    fn integer_is_not_widened_into_64_bit() {
        assert!(u64::from_canonical(CanonicalValue::Integer(1), WRAP).is_err());
        assert!(i64::from_canonical(CanonicalValue::Integer(1), WRAP).is_err());
    }

    #[test]
    fn strings_lists_and_blobs_are_strict() {
        let text = || CanonicalValue::Text("x".into());
        assert_eq!(String::from_canonical(text(), WRAP).unwrap(), "x");
        assert!(Vec::<String>::from_canonical(text(), WRAP).is_err());
        assert!(Vec::<u8>::from_canonical(text(), WRAP).is_err());
        assert!(u32::from_canonical(text(), WRAP).is_err());

        let list = CanonicalValue::TextList(vec!["a".into()]);
        assert_eq!(Vec::<String>::from_canonical(list, WRAP).unwrap(), vec!["a"]);
        assert!(String::from_canonical(CanonicalValue::TextList(vec![]), WRAP).is_err());

        let blob = CanonicalValue::Blob(vec![1, 2]);
        assert_eq!(Vec::<u8>::from_canonical(blob, WRAP).unwrap(), vec![1, 2]);
        assert!(Vec::<u8>::from_canonical(CanonicalValue::Integer(1), WRAP).is_err());
    }

    #[test]
    fn check_agrees_with_conversion() {
        let cases = [
            (TargetKind::U8, CanonicalValue::Integer(300)),
            (TargetKind::I8, CanonicalValue::Integer(u32::MAX)),
            (TargetKind::I32, CanonicalValue::BigInteger(1)),
            (TargetKind::String, CanonicalValue::Text("a".into())),
            (TargetKind::Bytes, CanonicalValue::TextList(vec![])),
        ];
        for (kind, value) in cases {
            let checked = kind.check(&value, CHECKED);
            let converted = match kind {
                TargetKind::U8 => u8::from_canonical(value, CHECKED).map(drop),
                TargetKind::I8 => i8::from_canonical(value, CHECKED).map(drop),
                TargetKind::I32 => i32::from_canonical(value, CHECKED).map(drop),
                TargetKind::String => String::from_canonical(value, CHECKED).map(drop),
                TargetKind::Bytes => Vec::<u8>::from_canonical(value, CHECKED).map(drop),
                _ => unreachable!(),
            };
            assert_eq!(checked, converted, "{kind}");
        }
    }

    #[test]
    fn display_names_rust_types() {
        assert_eq!(TargetKind::StringList.to_string(), "Vec<String>");
        assert_eq!(TargetKind::Bytes.to_string(), "Vec<u8>");
        assert_eq!(TargetKind::I16.to_string(), "i16");
    }
}
