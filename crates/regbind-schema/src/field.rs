//! Field metadata: the static [`FieldDef`] a composite declares, and the
//! resolved [`FieldSpec`] an entry carries.

use crate::target::Shape;

/// A field as declared by a composite's [`Record::fields`].
///
/// [`Record::fields`]: crate::Record::fields
#[derive(Clone, Copy, Debug)]
pub struct FieldDef {
    /// The field's identifier in the Rust type.
    pub ident: &'static str,
    /// Position of the field among the composite's declared fields.
    pub index: usize,
    /// Annotation of the form `name[,required]`, or `-` to exclude.
    pub tag: &'static str,
    /// Whether the field's members live in the enclosing container.
    pub embedded: bool,
    /// Shape of the field's type.
    pub shape: fn() -> Shape,
}

/// A parsed field annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    /// The field is left out of the schema entirely.
    Excluded,
    /// The field maps to a store name. `None` means use the field identifier.
    Field { name: Option<String>, required: bool },
}

/// Parse a `name[,required]` annotation.
///
/// An empty name means "use the field identifier"; options other than
/// `required` are ignored.
pub fn parse_tag(tag: &str) -> Tag {
    if tag == "-" {
        return Tag::Excluded;
    }
    let mut parts = tag.split(',');
    let name = parts
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from);
    let required = parts.any(|option| option.trim() == "required");
    Tag::Field { name, required }
}

/// Resolved per-field metadata carried by every entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Store name of the container or value.
    pub name: String,
    pub required: bool,
    pub embedded: bool,
    /// Index chain from the enclosing composite to the field.
    pub path: Vec<usize>,
}

impl FieldSpec {
    /// Spec for the root of an entry tree: always required, never embedded.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            embedded: false,
            path: Vec::new(),
        }
    }

    /// Resolve a declared field, or `None` if its tag excludes it.
    pub fn from_def(def: &FieldDef) -> Option<Self> {
        match parse_tag(def.tag) {
            Tag::Excluded => None,
            Tag::Field { name, required } => Some(Self {
                name: name.unwrap_or_else(|| def.ident.to_string()),
                required,
                embedded: def.embedded,
                path: vec![def.index],
            }),
        }
    }
}
