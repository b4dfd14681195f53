use regbind_types::Handle;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named container does not exist under the given parent.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// The named value does not exist in the container.
    #[error("value not found: {0}")]
    ValueNotFound(String),

    /// The handle was never issued by this store, or was already closed.
    #[error("invalid handle {0}")]
    InvalidHandle(Handle),

    /// The caller's buffer cannot hold the stored value.
    #[error("buffer too small: value needs {needed} bytes, got {provided}")]
    BufferTooSmall { needed: usize, provided: usize },

    /// The root container is not available in this store.
    #[error("root unavailable: {0}")]
    RootUnavailable(String),

    /// Failure reported by the underlying backend.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
