use std::fmt;

use serde::{Deserialize, Serialize};

/// The store's own tag describing how a value's bytes are encoded.
///
/// The numbering follows the registry's value type catalog. Tags the codec
/// has no rule for are still representable so they can be reported.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueType(pub u32);

impl ValueType {
    pub const NONE: Self = Self(0);
    /// Null-terminated UTF-16LE string.
    pub const SZ: Self = Self(1);
    /// Null-terminated UTF-16LE string with unexpanded environment references.
    pub const EXPAND_SZ: Self = Self(2);
    pub const BINARY: Self = Self(3);
    pub const DWORD_LITTLE_ENDIAN: Self = Self(4);
    pub const DWORD: Self = Self::DWORD_LITTLE_ENDIAN;
    pub const DWORD_BIG_ENDIAN: Self = Self(5);
    pub const LINK: Self = Self(6);
    /// Sequence of null-terminated strings closed by an extra null.
    pub const MULTI_SZ: Self = Self(7);
    pub const RESOURCE_LIST: Self = Self(8);
    pub const FULL_RESOURCE_DESCRIPTOR: Self = Self(9);
    pub const RESOURCE_REQUIREMENTS_LIST: Self = Self(10);
    pub const QWORD_LITTLE_ENDIAN: Self = Self(11);
    pub const QWORD: Self = Self::QWORD_LITTLE_ENDIAN;

    /// Symbolic name of a catalogued tag, if any.
    pub fn name(&self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "NONE",
            1 => "SZ",
            2 => "EXPAND_SZ",
            3 => "BINARY",
            4 => "DWORD",
            5 => "DWORD_BIG_ENDIAN",
            6 => "LINK",
            7 => "MULTI_SZ",
            8 => "RESOURCE_LIST",
            9 => "FULL_RESOURCE_DESCRIPTOR",
            10 => "RESOURCE_REQUIREMENTS_LIST",
            11 => "QWORD",
            _ => return None,
        })
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueType({self})")
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} (0x{:08x})", self.0),
            None => write!(f, "0x{:08x}", self.0),
        }
    }
}

impl From<u32> for ValueType {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_codes() {
        assert_eq!(ValueType::DWORD, ValueType::DWORD_LITTLE_ENDIAN);
        assert_eq!(ValueType::QWORD, ValueType(11));
    }

    #[test]
    fn display_known_tag() {
        assert_eq!(ValueType::MULTI_SZ.to_string(), "MULTI_SZ (0x00000007)");
    }

    #[test]
    fn display_unknown_tag() {
        let tag = ValueType(0xdead);
        assert!(tag.name().is_none());
        assert_eq!(tag.to_string(), "0x0000dead");
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&ValueType::BINARY).unwrap();
        assert_eq!(json, "3");
        let back: ValueType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ValueType::BINARY);
    }
}
