use regbind_codec::{CanonicalKind, CodecError, TargetKind};
use regbind_schema::SchemaError;
use regbind_store::StoreError;
use regbind_types::{TypeError, ValueType};
use thiserror::Error;

/// Errors that abort a decode.
///
/// Paths are full store paths, starting at the root's conventional name.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown root key '{0}'")]
    UnknownRoot(String),

    #[error("{0}")]
    InvalidAddress(TypeError),

    #[error("required '{path}' could not be read: {source}")]
    RequiredMissing {
        path: String,
        #[source]
        source: StoreError,
    },

    #[error("'{path}' has store type {value_type}, which cannot be decoded")]
    UnsupportedStoreType { path: String, value_type: ValueType },

    #[error("cannot decode {value_type} value '{path}' ({found}) into {target}")]
    TypeMismatch {
        path: String,
        value_type: ValueType,
        found: CanonicalKind,
        target: TargetKind,
    },

    #[error("value {value} of '{path}' does not fit in {target}")]
    Overflow {
        path: String,
        value: u32,
        target: TargetKind,
    },

    #[error("malformed value '{path}': {source}")]
    MalformedValue {
        path: String,
        #[source]
        source: CodecError,
    },

    #[error("malformed target: {0}")]
    MalformedTarget(String),

    #[error("failed to release '{path}': {source}")]
    Release {
        path: String,
        #[source]
        source: StoreError,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(String),
}

impl DecodeError {
    /// Map a codec failure for the value at `path` onto the decode taxonomy.
    pub(crate) fn from_codec(path: String, value_type: ValueType, err: CodecError) -> Self {
        match err {
            CodecError::UnsupportedType(value_type) => Self::UnsupportedStoreType { path, value_type },
            CodecError::Mismatch { found, target } => Self::TypeMismatch {
                path,
                value_type,
                found,
                target,
            },
            CodecError::Overflow { value, target } => Self::Overflow { path, value, target },
            source @ CodecError::Truncated { .. } => Self::MalformedValue { path, source },
        }
    }
}

impl From<TypeError> for DecodeError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::UnknownRoot(name) => Self::UnknownRoot(name),
            other => Self::InvalidAddress(other),
        }
    }
}

impl From<SchemaError> for DecodeError {
    fn from(err: SchemaError) -> Self {
        Self::MalformedTarget(err.to_string())
    }
}

/// Convenience alias for decode results.
pub type DecodeResult<T> = Result<T, DecodeError>;
