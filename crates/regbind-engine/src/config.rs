use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use regbind_codec::{CodecConfig, MultiStringMode, NarrowingMode};
use regbind_schema::MAX_SCHEMA_DEPTH;

use crate::error::{DecodeError, DecodeResult};

/// Configuration for a [`Decoder`](crate::Decoder).
///
/// Every key is optional in TOML form:
///
/// ```toml
/// multi_string = "lenient"   # or "legacy"
/// narrowing = "checked"      # or "wrap"
/// max_depth = 16
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// How multi-string values are split.
    pub multi_string: MultiStringMode,
    /// How 32-bit integers are narrowed into smaller fields.
    pub narrowing: NarrowingMode,
    /// Maximum composite nesting accepted when building the entry tree.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            multi_string: MultiStringMode::default(),
            narrowing: NarrowingMode::default(),
            max_depth: MAX_SCHEMA_DEPTH,
        }
    }
}

impl DecoderConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> DecodeResult<Self> {
        toml::from_str(text).map_err(|e| DecodeError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> DecodeResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| DecodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// The subset of settings the value codec consumes.
    pub fn codec(&self) -> CodecConfig {
        CodecConfig {
            multi_string: self.multi_string,
            narrowing: self.narrowing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = DecoderConfig::default();
        assert_eq!(c.multi_string, MultiStringMode::Legacy);
        assert_eq!(c.narrowing, NarrowingMode::Wrap);
        assert_eq!(c.max_depth, MAX_SCHEMA_DEPTH);
        assert_eq!(c.codec(), CodecConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(DecoderConfig::from_toml_str("").unwrap(), DecoderConfig::default());
    }

    #[test]
    fn full_toml() {
        let c = DecoderConfig::from_toml_str(
            "multi_string = \"lenient\"\nnarrowing = \"checked\"\nmax_depth = 8\n",
        )
        .unwrap();
        assert_eq!(c.multi_string, MultiStringMode::Lenient);
        assert_eq!(c.narrowing, NarrowingMode::Checked);
        assert_eq!(c.max_depth, 8);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let c = DecoderConfig::from_toml_str("narrowing = \"checked\"").unwrap();
        assert_eq!(c.narrowing, NarrowingMode::Checked);
        assert_eq!(c.multi_string, MultiStringMode::Legacy);
        assert_eq!(c.max_depth, MAX_SCHEMA_DEPTH);
    }

    #[test]
    fn bad_value_is_config_error() {
        let err = DecoderConfig::from_toml_str("narrowing = \"saturate\"").unwrap_err();
        assert!(matches!(err, DecodeError::Config(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let c = DecoderConfig {
            multi_string: MultiStringMode::Lenient,
            ..DecoderConfig::default()
        };
        let text = toml::to_string(&c).unwrap();
        assert_eq!(DecoderConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "multi_string = \"lenient\"").unwrap();
        let c = DecoderConfig::load(file.path()).unwrap();
        assert_eq!(c.multi_string, MultiStringMode::Lenient);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = DecoderConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, DecodeError::Config(msg) if msg.contains("absent.toml")));
    }
}
