//! Scalars, strings and std text-like types.

use std::{
    borrow::Cow,
    num::{
        NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroU8, NonZeroU16, NonZeroU32,
        NonZeroU64, NonZeroUsize,
    },
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::capture::traits::{Captured, PrimitiveArray, Scalar, ValueKind};

// =============================================================================
// Primitives with an array fast path
// =============================================================================

macro_rules! impl_captured_primitive {
    ($($ty:ty => $scalar:ident, $array:ident);* $(;)?) => {
        $(
            impl Captured for $ty {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Scalar(Scalar::$scalar((*self).into()))
                }

                fn primitive_slice(slice: &[Self]) -> Option<PrimitiveArray<'_>> {
                    Some(PrimitiveArray::$array(slice))
                }
            }
        )*
    };
}

impl_captured_primitive! {
    bool => Bool, Bool;
    char => Char, Char;
    i8 => I64, I8;
    i16 => I64, I16;
    i32 => I64, I32;
    i64 => I64, I64;
    f32 => F32, F32;
    f64 => F64, F64;
}

// =============================================================================
// Other integers
// =============================================================================

macro_rules! impl_captured_integer {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            impl Captured for $ty {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Scalar(Scalar::$scalar((*self).into()))
                }
            }
        )*
    };
}

impl_captured_integer! {
    i128 => I128,
    u8 => U64,
    u16 => U64,
    u32 => U64,
    u64 => U64,
    u128 => U128,
}

impl Captured for isize {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::I64(*self as i64))
    }
}

impl Captured for usize {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::U64(*self as u64))
    }
}

macro_rules! impl_captured_non_zero {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            impl Captured for $ty {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Scalar(Scalar::$scalar(self.get().into()))
                }
            }
        )*
    };
}

impl_captured_non_zero! {
    NonZeroI8 => I64,
    NonZeroI16 => I64,
    NonZeroI32 => I64,
    NonZeroI64 => I64,
    NonZeroU8 => U64,
    NonZeroU16 => U64,
    NonZeroU32 => U64,
    NonZeroU64 => U64,
}

impl Captured for NonZeroUsize {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::U64(self.get() as u64))
    }
}

impl Captured for () {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Null
    }
}

// =============================================================================
// Strings
// =============================================================================

impl Captured for str {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Str(self)
    }
}

impl Captured for String {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Str(self)
    }
}

impl Captured for Cow<'_, str> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Str(self)
    }
}

// =============================================================================
// Time and paths
// =============================================================================

impl Captured for Duration {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::Text(format!("{self:?}").into()))
    }
}

/// Seconds since the Unix epoch, with nanosecond precision.
impl Captured for SystemTime {
    fn kind(&self) -> ValueKind<'_> {
        let text = match self.duration_since(UNIX_EPOCH) {
            Ok(since) => format!("{}.{:09}", since.as_secs(), since.subsec_nanos()),
            Err(before) => {
                let before = before.duration();
                format!("-{}.{:09}", before.as_secs(), before.subsec_nanos())
            }
        };
        ValueKind::Scalar(Scalar::Text(text.into()))
    }
}

impl Captured for Path {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::Text(self.to_string_lossy()))
    }
}

impl Captured for PathBuf {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::Text(self.to_string_lossy()))
    }
}
