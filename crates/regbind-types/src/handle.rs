use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque token identifying an open container inside a store.
///
/// Handles are minted by a store backend and are only meaningful to the
/// backend that produced them. Root handles are permanent; handles returned by
/// `open_container` must be given back through `close_container`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(u64);

impl Handle {
    /// Wrap a backend-specific raw handle value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The backend-specific raw handle value.
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
