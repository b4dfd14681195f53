//! The entry tree: one descriptor per schema node, built from a target's
//! static shape and later filled from the store.
//!
//! # Invariants
//!
//! - Subentries follow the composite's field declaration order.
//! - Store names are unique (case-insensitively) within one container,
//!   counting the members of embedded composites and not their field names.
//! - A freshly built tree holds no data: nothing is skipped, no raw bytes,
//!   no handles.

use std::collections::HashSet;

use regbind_codec::{CanonicalValue, TargetKind};
use regbind_types::{Handle, ValueType};

use crate::error::{SchemaError, SchemaResult};
use crate::field::FieldSpec;
use crate::target::{Schema, Shape};

/// Default limit on composite nesting, which also stops self-recursive
/// target types.
pub const MAX_SCHEMA_DEPTH: usize = 64;

/// A node of the entry tree.
#[derive(Clone, Debug)]
pub enum Entry {
    Container(ContainerEntry),
    Value(ValueEntry),
}

/// A composite field, backed by a store container.
#[derive(Clone, Debug)]
pub struct ContainerEntry {
    pub spec: FieldSpec,
    pub subentries: Vec<Entry>,
    /// Handle of the container while it is being populated.
    pub handle: Option<Handle>,
    pub skipped: bool,
}

/// A scalar or array field, backed by a store value.
#[derive(Clone, Debug)]
pub struct ValueEntry {
    pub spec: FieldSpec,
    /// The field type the value will be converted into.
    pub kind: TargetKind,
    pub raw: Option<Vec<u8>>,
    pub value_type: Option<ValueType>,
    /// Canonical form, filled in once the value has been decoded and checked.
    pub decoded: Option<CanonicalValue>,
    pub skipped: bool,
}

impl Entry {
    pub fn spec(&self) -> &FieldSpec {
        match self {
            Self::Container(c) => &c.spec,
            Self::Value(v) => &v.spec,
        }
    }

    pub fn is_skipped(&self) -> bool {
        match self {
            Self::Container(c) => c.skipped,
            Self::Value(v) => v.skipped,
        }
    }

    /// Number of value entries in this subtree.
    pub fn value_count(&self) -> usize {
        match self {
            Self::Container(c) => c.subentries.iter().map(Entry::value_count).sum(),
            Self::Value(_) => 1,
        }
    }
}

impl ContainerEntry {
    pub fn new(spec: FieldSpec, subentries: Vec<Entry>) -> Self {
        Self {
            spec,
            subentries,
            handle: None,
            skipped: false,
        }
    }
}

impl ValueEntry {
    pub fn new(spec: FieldSpec, kind: TargetKind) -> Self {
        Self {
            spec,
            kind,
            raw: None,
            value_type: None,
            decoded: None,
            skipped: false,
        }
    }
}

/// Build the entry tree for a shape.
///
/// Composites become [`ContainerEntry`]s with one subentry per non-excluded
/// field; everything else becomes an unresolved [`ValueEntry`].
pub fn build_entry(shape: Shape, spec: FieldSpec, max_depth: usize) -> SchemaResult<Entry> {
    build(shape, spec, 0, max_depth)
}

fn build(shape: Shape, spec: FieldSpec, depth: usize, max_depth: usize) -> SchemaResult<Entry> {
    let fields = match shape {
        Shape::Value(kind) => return Ok(Entry::Value(ValueEntry::new(spec, kind))),
        Shape::Composite(fields) => fields,
    };
    if depth >= max_depth {
        return Err(SchemaError::TooDeep {
            container: spec.name,
            max: max_depth,
        });
    }

    let mut seen = HashSet::new();
    let mut subentries = Vec::new();
    for def in fields() {
        let Some(child) = FieldSpec::from_def(&def) else {
            continue;
        };
        let entry = build((def.shape)(), child, depth + 1, max_depth)?;
        let mut names = Vec::new();
        store_names(&entry, &mut names);
        for name in names {
            if !seen.insert(name.to_lowercase()) {
                return Err(SchemaError::DuplicateName {
                    container: spec.name,
                    name: name.to_string(),
                });
            }
        }
        subentries.push(entry);
    }

    Ok(Entry::Container(ContainerEntry::new(spec, subentries)))
}

/// Names `entry` occupies in its parent container. An embedded composite
/// has no name of its own there; its members are spliced in instead.
fn store_names<'e>(entry: &'e Entry, out: &mut Vec<&'e str>) {
    match entry {
        Entry::Container(c) if c.spec.embedded => {
            for sub in &c.subentries {
                store_names(sub, out);
            }
        }
        other => out.push(&other.spec().name),
    }
}

/// Build the tree for a whole decode target rooted at `path`.
///
/// The root is always required and must be a composite.
pub fn build_root<T: Schema>(path: &str, max_depth: usize) -> SchemaResult<Entry> {
    let shape = T::shape();
    if let Shape::Value(_) = shape {
        return Err(SchemaError::NotComposite(std::any::type_name::<T>()));
    }
    build_entry(shape, FieldSpec::root(path), max_depth)
}
