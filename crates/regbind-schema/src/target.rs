//! Static shapes and mutable field access for decode targets.

use regbind_codec::{CanonicalValue, FromCanonical, NarrowingMode, TargetKind};

use crate::error::SlotError;
use crate::field::FieldDef;

/// What a type looks like to the schema walker.
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    /// A single stored value.
    Value(TargetKind),
    /// A composite mapped to a container, described by its fields.
    Composite(fn() -> Vec<FieldDef>),
}

/// A type that can appear in a decode target.
pub trait Schema {
    fn shape() -> Shape;
}

/// A mutable view of one target field.
pub trait Target {
    /// Convert `value` into this field's type and store it.
    fn assign(&mut self, value: CanonicalValue, narrowing: NarrowingMode)
        -> Result<(), SlotError>;

    /// The composite behind this field, allocated first if it is optional
    /// and currently empty.
    fn record(&mut self) -> Result<&mut dyn Record, SlotError>;
}

/// A composite target whose fields are reachable by declaration index.
pub trait Record {
    /// The composite's declared fields, in declaration order.
    fn fields() -> Vec<FieldDef>
    where
        Self: Sized;

    fn field(&mut self, index: usize) -> Option<&mut dyn Target>;
}

/// Follow an index chain from `record` down to a field.
pub fn resolve_field<'a>(
    record: &'a mut dyn Record,
    path: &[usize],
) -> Result<&'a mut dyn Target, SlotError> {
    let bad_path = || SlotError::BadPath(path.to_vec());
    let (first, rest) = path.split_first().ok_or_else(bad_path)?;
    let target = record.field(*first).ok_or_else(bad_path)?;
    if rest.is_empty() {
        return Ok(target);
    }
    let nested = target.record().map_err(|_| bad_path())?;
    resolve_field(nested, rest).map_err(|_| bad_path())
}

macro_rules! impl_value_target {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Schema for $ty {
                fn shape() -> Shape {
                    Shape::Value(<$ty as FromCanonical>::KIND)
                }
            }

            impl Target for $ty {
                fn assign(
                    &mut self,
                    value: CanonicalValue,
                    narrowing: NarrowingMode,
                ) -> Result<(), SlotError> {
                    *self = <$ty as FromCanonical>::from_canonical(value, narrowing)?;
                    Ok(())
                }

                fn record(&mut self) -> Result<&mut dyn Record, SlotError> {
                    Err(SlotError::NotARecord)
                }
            }
        )*
    };
}

impl_value_target!(u8, u16, u32, i8, i16, i32, u64, i64, String, Vec<String>, Vec<u8>);

impl<T: Schema> Schema for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Target + Default> Target for Option<T> {
    fn assign(&mut self, value: CanonicalValue, narrowing: NarrowingMode) -> Result<(), SlotError> {
        // Only allocate once the conversion has succeeded.
        let mut inner = T::default();
        inner.assign(value, narrowing)?;
        *self = Some(inner);
        Ok(())
    }

    fn record(&mut self) -> Result<&mut dyn Record, SlotError> {
        self.get_or_insert_with(T::default).record()
    }
}

impl<T: Schema> Schema for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Target> Target for Box<T> {
    fn assign(&mut self, value: CanonicalValue, narrowing: NarrowingMode) -> Result<(), SlotError> {
        (**self).assign(value, narrowing)
    }

    fn record(&mut self) -> Result<&mut dyn Record, SlotError> {
        (**self).record()
    }
}
