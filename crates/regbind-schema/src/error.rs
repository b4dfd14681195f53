use regbind_codec::CodecError;

/// Errors raised while building an entry tree from a target's schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two fields of one composite resolve to the same store name.
    #[error("duplicate field name '{name}' in '{container}'")]
    DuplicateName { container: String, name: String },

    /// The decode target is a plain value rather than a composite.
    #[error("target type {0} is not a composite")]
    NotComposite(&'static str),

    /// Composites nest deeper than the configured limit.
    #[error("schema nesting under '{container}' exceeds {max} levels")]
    TooDeep { container: String, max: usize },
}

/// Convenience alias for schema results.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while writing into a target field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// The decoded value could not be converted into the field's type.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A value was written into a composite field.
    #[error("field is a composite, not a value")]
    NotAValue,

    /// A composite was requested from a value field.
    #[error("field is a value, not a composite")]
    NotARecord,

    /// An index path does not lead to a field.
    #[error("no field at index path {0:?}")]
    BadPath(Vec<usize>),
}
