//! Accessor macros for the model sum types
//!
//! These macros eliminate repetitive match code on `Block` and friends.
//! They use `paste` internally for identifier concatenation.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert method name to variant name,
/// so each variant must wrap a type of the same name.
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Block {
///     // paragraph -> Paragraph, markup_fragment -> MarkupFragment
///     impl_enum_accessors!(paragraph, markup_fragment);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " variant"]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&[<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut [<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}

/// Generate a `kind(&self) -> &'static str` naming the active variant
///
/// # Example
/// ```ignore
/// impl_variant_names!(Paragraph => "paragraph", Table => "table");
/// ```
#[macro_export]
macro_rules! impl_variant_names {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Short name of the active variant, for logging
        pub fn kind(&self) -> &'static str {
            match self {
                $(Self::$variant(..) => $name,)*
            }
        }
    };
}
