//! Adapters for emitting captured values through `tracing`.
//!
//! Values are rendered with [`TextTokenWriter`] and logged as display strings,
//! which works with any subscriber.
//!
//! # Example
//!
//! ```rust
//! use probe_snapshot::tracing::TracingCapturedExt;
//!
//! let ids = vec![1_u32, 2, 3];
//! tracing::info!(ids = %ids.tracing_captured());
//! assert_eq!(ids.tracing_captured().to_string(), "[1, 2, 3]");
//! ```

use std::any;

use tracing::field::{DisplayValue, display};

use crate::{
    capture::{BoundedSerializer, Captured},
    encode::TextTokenWriter,
    limits::Limits,
};

/// Extension trait for logging captured values as display strings.
pub trait TracingCapturedExt: Captured + Sized {
    /// Captures `self` under the default limits and redaction.
    fn tracing_captured(&self) -> DisplayValue<String> {
        self.tracing_captured_with(&Limits::default())
    }

    fn tracing_captured_with(&self, limits: &Limits) -> DisplayValue<String> {
        let mut writer = TextTokenWriter::new();
        let text = match BoundedSerializer::new(&mut writer).serialize(
            self,
            any::type_name::<Self>(),
            limits,
        ) {
            Ok(()) => writer.into_string(),
            Err(err) => format!("<{err}>"),
        };
        display(text)
    }
}

impl<T> TracingCapturedExt for T where T: Captured {}
