//! Value codec for regbind.
//!
//! Decoding a stored value happens in two pure steps:
//!
//! 1. [`decode_raw`] turns `(bytes, ValueType)` into a [`CanonicalValue`],
//!    one of a small set of kinds independent of both the store's tags and
//!    Rust types.
//! 2. [`FromCanonical`] turns a [`CanonicalValue`] into a concrete field type,
//!    rejecting any pairing that is not explicitly allowed.
//!
//! | Canonical kind | Accepted targets                     |
//! |----------------|--------------------------------------|
//! | `Integer`      | `u8` `u16` `u32` `i8` `i16` `i32`    |
//! | `BigInteger`   | `u64` `i64`                          |
//! | `Text`         | `String`                             |
//! | `TextList`     | `Vec<String>`                        |
//! | `Blob`         | `Vec<u8>`                            |

pub mod config;
pub mod convert;
pub mod decode;
pub mod error;
pub mod value;

pub use config::{CodecConfig, MultiStringMode, NarrowingMode};
pub use convert::{FromCanonical, TargetKind};
pub use decode::{decode_raw, utf16le_to_string};
pub use error::{CodecError, CodecResult};
pub use value::{CanonicalKind, CanonicalValue};
