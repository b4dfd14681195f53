/// Register a struct as a decode target.
///
/// Implements [`Schema`](crate::Schema), [`Record`](crate::Record) and
/// [`Target`](crate::Target) for an existing struct. Each line names a field,
/// its type, and its annotation (`name[,required]`, `""` for the field's own
/// name, or `"-"` to exclude it). A leading `#[embedded]` reads the field's
/// members from the enclosing container.
///
/// ```
/// use regbind_schema::record;
///
/// #[derive(Debug, Default)]
/// struct Common {
///     version: u32,
/// }
/// record!(Common { version: u32 => "Version" });
///
/// #[derive(Debug, Default)]
/// struct Service {
///     common: Common,
///     image_path: String,
///     depends_on: Option<Vec<String>>,
/// }
/// record!(Service {
///     #[embedded] common: Common => "",
///     image_path: String => "ImagePath,required",
///     depends_on: Option<Vec<String>> => "DependOnService",
/// });
/// ```
#[macro_export]
macro_rules! record {
    (@embedded) => {
        false
    };
    (@embedded embedded) => {
        true
    };
    ($ty:ty { $( $(#[$flag:ident])? $field:ident : $fty:ty => $tag:literal ),* $(,)? }) => {
        impl $crate::Schema for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::Composite(<$ty as $crate::Record>::fields)
            }
        }

        impl $crate::Record for $ty {
            fn fields() -> ::std::vec::Vec<$crate::FieldDef> {
                let mut fields = ::std::vec::Vec::new();
                $(
                    fields.push($crate::FieldDef {
                        ident: ::std::stringify!($field),
                        index: fields.len(),
                        tag: $tag,
                        embedded: $crate::record!(@embedded $($flag)?),
                        shape: <$fty as $crate::Schema>::shape,
                    });
                )*
                fields
            }

            #[allow(unused_mut, unused_assignments)]
            fn field(&mut self, index: usize) -> ::std::option::Option<&mut dyn $crate::Target> {
                let mut slot = 0usize;
                $(
                    if index == slot {
                        let field: &mut $fty = &mut self.$field;
                        return ::std::option::Option::Some(field);
                    }
                    slot += 1;
                )*
                let _ = (index, slot);
                ::std::option::Option::None
            }
        }

        impl $crate::Target for $ty {
            fn assign(
                &mut self,
                _: $crate::CanonicalValue,
                _: $crate::NarrowingMode,
            ) -> ::std::result::Result<(), $crate::SlotError> {
                ::std::result::Result::Err($crate::SlotError::NotAValue)
            }

            fn record(
                &mut self,
            ) -> ::std::result::Result<&mut dyn $crate::Record, $crate::SlotError> {
                ::std::result::Result::Ok(self)
            }
        }
    };
}
