//! Hierarchical key-value store contract for regbind.
//!
//! A store is a tree of named containers, each holding named, typed values.
//! The decode engine only ever reads from it: it opens containers, probes and
//! reads values, and closes what it opened.
//!
//! # Storage Backends
//!
//! All backends implement the [`Store`] trait:
//!
//! - [`InMemoryStore`] -- tree-of-maps store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Container and value names are case-insensitive.
//! 2. Every handle returned by `open_container` must be closed exactly once.
//! 3. Root handles are permanent and closing one is a no-op.
//! 4. The store never interprets value bytes -- decoding is the codec's job.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use traits::{Store, ValueProbe};
