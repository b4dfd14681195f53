//! Schema registration and entry-tree construction for regbind.
//!
//! A target type describes itself through [`Schema`]: either a single value
//! of some [`TargetKind`], or a composite whose fields are listed as
//! [`FieldDef`]s. Composites also implement [`Record`] so the engine can
//! reach each field by index as a [`Target`].
//!
//! [`build_entry`] walks a shape into a tree of [`Entry`] descriptors, one
//! per field, which the engine then populates from the store and unmarshals
//! into a target instance.
//!
//! Composites are registered with the [`record!`] macro:
//!
//! ```
//! use regbind_schema::{record, build_root, Entry, MAX_SCHEMA_DEPTH};
//!
//! #[derive(Debug, Default)]
//! struct Settings {
//!     name: String,
//!     retries: u32,
//!     scratch: Vec<u8>,
//! }
//!
//! record!(Settings {
//!     name: String => "DisplayName,required",
//!     retries: u32 => "",
//!     scratch: Vec<u8> => "-",
//! });
//!
//! let Entry::Container(root) = build_root::<Settings>("Software\\Vendor", MAX_SCHEMA_DEPTH).unwrap()
//! else { unreachable!() };
//! assert_eq!(root.subentries.len(), 2);
//! assert_eq!(root.subentries[0].spec().name, "DisplayName");
//! assert_eq!(root.subentries[1].spec().name, "retries");
//! ```

pub mod entry;
pub mod error;
pub mod field;
mod macros;
pub mod target;

pub use entry::{build_entry, build_root, ContainerEntry, Entry, ValueEntry, MAX_SCHEMA_DEPTH};
pub use error::{SchemaError, SchemaResult, SlotError};
pub use field::{parse_tag, FieldDef, FieldSpec, Tag};
pub use target::{resolve_field, Record, Schema, Shape, Target};

// Used by `record!` expansions.
pub use regbind_codec::{CanonicalValue, NarrowingMode, TargetKind};
