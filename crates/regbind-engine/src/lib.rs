//! Schema-driven decoding of a hierarchical key-value store into typed
//! Rust structs.
//!
//! This is the main entry point for applications. A decode runs in three
//! phases, each completing for the whole tree before the next starts:
//!
//! 1. **Build** -- walk the target type's schema into an entry tree (no I/O).
//! 2. **Populate** -- open containers and read values from the [`Store`],
//!    depth-first, closing every container it opened.
//! 3. **Unmarshal** -- decode each raw value, check it against its field's
//!    type, then write the whole tree into the target.
//!
//! Any error aborts the decode before the target is touched.
//!
//! ```
//! use regbind_engine::{record, Decoder, InMemoryStore, RootKey};
//!
//! #[derive(Debug, Default)]
//! struct Settings {
//!     name: String,
//!     retries: u32,
//! }
//! record!(Settings {
//!     name: String => "Name,required",
//!     retries: u32 => "Retries",
//! });
//!
//! let store = InMemoryStore::new();
//! store.set_string(RootKey::CurrentUser, "Software\\Vendor", "Name", "demo");
//!
//! let mut settings = Settings::default();
//! Decoder::new(&store)
//!     .decode("//hkcu/Software/Vendor", &mut settings)
//!     .unwrap();
//! assert_eq!(settings.name, "demo");
//! assert_eq!(settings.retries, 0);
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod populate;
pub mod unmarshal;

pub use config::DecoderConfig;
pub use decoder::{decode, Decoder};
pub use error::{DecodeError, DecodeResult};
pub use populate::populate;
pub use unmarshal::unmarshal;

// Re-export the types callers need to describe targets and stores.
pub use regbind_codec::{CodecConfig, MultiStringMode, NarrowingMode};
pub use regbind_schema::{record, Record, Schema, Target};
pub use regbind_store::{InMemoryStore, Store, StoreError};
pub use regbind_types::{Location, RootKey, ValueType};
