use std::fmt;

/// A decoded store value, independent of the store's type tags and of the
/// target field's Rust type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanonicalValue {
    BigInteger(u64),
    Integer(u32),
    Text(String),
    TextList(Vec<String>),
    Blob(Vec<u8>),
}

/// Discriminant of a [`CanonicalValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CanonicalKind {
    BigInteger,
    Integer,
    Text,
    TextList,
    Blob,
}

impl CanonicalValue {
    pub fn kind(&self) -> CanonicalKind {
        match self {
            Self::BigInteger(_) => CanonicalKind::BigInteger,
            Self::Integer(_) => CanonicalKind::Integer,
            Self::Text(_) => CanonicalKind::Text,
            Self::TextList(_) => CanonicalKind::TextList,
            Self::Blob(_) => CanonicalKind::Blob,
        }
    }
}

impl fmt::Display for CanonicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BigInteger => "64-bit integer",
            Self::Integer => "32-bit integer",
            Self::Text => "text",
            Self::TextList => "text list",
            Self::Blob => "binary",
        })
    }
}
