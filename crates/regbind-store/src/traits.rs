use regbind_types::{Handle, RootKey, ValueType};

use crate::error::StoreResult;

/// Result of probing a value: how large it is and how it is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueProbe {
    /// Number of bytes a full read will return.
    pub size: usize,
    /// The store's encoding tag for the value.
    pub value_type: ValueType,
}

/// Read access to a hierarchical key-value store.
///
/// All implementations must satisfy these invariants:
/// - Names are matched case-insensitively.
/// - `open_container` accepts a `\`-separated name and opens every level in
///   one call; an empty name opens the parent itself.
/// - Each handle returned by `open_container` stays valid until it is passed
///   to `close_container`, and must not be closed twice.
/// - `probe_value` and `read_value` never mutate the store.
pub trait Store: Send + Sync {
    /// Handle of a well-known root container.
    fn root(&self, root: RootKey) -> StoreResult<Handle>;

    /// Open the container `name` below `parent`.
    fn open_container(&self, parent: Handle, name: &str) -> StoreResult<Handle>;

    /// Release a handle obtained from [`Store::open_container`].
    fn close_container(&self, handle: Handle) -> StoreResult<()>;

    /// Report the size and type tag of a value without reading it.
    fn probe_value(&self, container: Handle, name: &str) -> StoreResult<ValueProbe>;

    /// Read a value's bytes into a buffer of `size_hint` bytes.
    ///
    /// Returns [`StoreError::BufferTooSmall`] if the value grew past
    /// `size_hint` since it was probed.
    ///
    /// [`StoreError::BufferTooSmall`]: crate::StoreError::BufferTooSmall
    fn read_value(&self, container: Handle, name: &str, size_hint: usize)
        -> StoreResult<Vec<u8>>;
}
