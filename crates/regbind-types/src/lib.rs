//! Foundation types for regbind.
//!
//! This crate provides the vocabulary shared by the store backends, the value
//! codec, and the decode engine. Every other regbind crate depends on
//! `regbind-types`.
//!
//! # Key Types
//!
//! - [`ValueType`] -- The store's own tag identifying a value's encoding
//! - [`Handle`] -- Opaque token for an open container
//! - [`RootKey`] -- One of the fixed, well-known root containers
//! - [`Location`] -- A parsed `//root/segment/...` address

pub mod error;
pub mod handle;
pub mod location;
pub mod root;
pub mod value_type;

pub use error::TypeError;
pub use handle::Handle;
pub use location::{Location, PATH_SEPARATOR};
pub use root::{RootKey, ROOT_TABLE};
pub use value_type::ValueType;
