//! `Captured` implementations for standard library types.
//!
//! Scalars and strings map onto the scalar path. Slices and fixed-size arrays
//! are trusted arrays; the std collections and maps are iterated through the
//! fallible collection interface so the serializer can apply the container
//! safety policy to them. Smart pointers and references are transparent: they
//! report the pointee's kind and runtime type name.

#[cfg(feature = "chrono")]
mod chrono;
#[cfg(feature = "ip-address")]
mod ip_address;
#[cfg(feature = "json")]
mod json;
mod maps;
mod scalars;
mod sequences;
#[cfg(feature = "time")]
mod time;
#[cfg(feature = "uuid")]
mod uuid;
mod wrappers;


use super::traits::{AlienError, Captured, CapturedRef};

// =============================================================================
// Scalar implementation helper
// =============================================================================

/// Implements `Captured` for types rendered as text through `Display`.
macro_rules! impl_captured_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl crate::capture::traits::Captured for $ty {
                fn kind(&self) -> crate::capture::traits::ValueKind<'_> {
                    crate::capture::traits::ValueKind::Scalar(
                        crate::capture::traits::Scalar::Text(self.to_string().into()),
                    )
                }
            }
        )*
    };
}

pub(super) use impl_captured_display;

fn as_captured<T: Captured>(value: &T) -> &dyn Captured {
    value
}

fn borrowed<T: Captured>(value: &T) -> Result<CapturedRef<'_>, AlienError> {
    Ok(CapturedRef::Borrowed(value))
}

fn borrowed_entry<'a, K: Captured, V: Captured>(
    (key, value): (&'a K, &'a V),
) -> Result<(CapturedRef<'a>, CapturedRef<'a>), AlienError> {
    Ok((CapturedRef::Borrowed(key), CapturedRef::Borrowed(value)))
}
