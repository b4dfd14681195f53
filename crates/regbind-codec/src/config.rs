use serde::{Deserialize, Serialize};

/// How multi-string buffers are split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiStringMode {
    /// Split on NUL and drop the last two segments.
    ///
    /// Exact for a buffer closed by the double terminator; a buffer missing
    /// its final terminator loses its last string.
    #[default]
    Legacy,
    /// Strip every trailing NUL, then split. Keeps all strings regardless of
    /// how the buffer was terminated.
    Lenient,
}

/// How 32-bit integers are narrowed into smaller targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrowingMode {
    /// Keep the low bits, two's-complement for signed targets.
    #[default]
    Wrap,
    /// Fail with [`CodecError::Overflow`](crate::CodecError::Overflow) when
    /// the value does not fit. Signed targets read the raw value as `i32`.
    Checked,
}

/// Knobs for the value codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub multi_string: MultiStringMode,
    pub narrowing: NarrowingMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_behavior() {
        let c = CodecConfig::default();
        assert_eq!(c.multi_string, MultiStringMode::Legacy);
        assert_eq!(c.narrowing, NarrowingMode::Wrap);
    }
}
