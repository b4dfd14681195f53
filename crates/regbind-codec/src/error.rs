use regbind_types::ValueType;

use crate::convert::TargetKind;
use crate::value::CanonicalKind;

/// Errors produced while decoding or converting a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The store type tag has no decoding rule.
    #[error("unsupported store type {0}")]
    UnsupportedType(ValueType),

    /// A fixed-width value had fewer bytes than its type requires.
    #[error("{value_type} value needs {expected} bytes, got {actual}")]
    Truncated {
        value_type: ValueType,
        expected: usize,
        actual: usize,
    },

    /// The decoded kind cannot be written into the target type.
    #[error("cannot store {found} value in {target}")]
    Mismatch {
        found: CanonicalKind,
        target: TargetKind,
    },

    /// The integer does not fit the target under checked narrowing.
    #[error("value {value} out of range for {target}")]
    Overflow { value: u32, target: TargetKind },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
