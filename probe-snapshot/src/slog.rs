//! Adapters for emitting captured values through `slog`.
//!
//! Values are captured with [`BoundedSerializer`] into the JSON snapshot shape
//! and emitted through `slog`'s nested-value support, so a structured drain
//! sees the same document a snapshot would carry. Capture failures never
//! surface as logging errors; they are logged as a placeholder string.

use std::any;

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    capture::{BoundedSerializer, Captured},
    encode::JsonTokenWriter,
    limits::Limits,
    policy::RedactionPolicy,
};

/// A captured value, ready to be logged as structured JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedJson(JsonValue);

impl CapturedJson {
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_value(self) -> JsonValue {
        self.0
    }
}

impl SlogValue for CapturedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.0.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

fn capture(
    value: &dyn Captured,
    type_name: &str,
    limits: &Limits,
    redaction: Option<&dyn RedactionPolicy>,
) -> CapturedJson {
    let mut writer = JsonTokenWriter::new();
    let mut serializer = BoundedSerializer::new(&mut writer);
    if let Some(redaction) = redaction {
        serializer = serializer.with_redaction(redaction);
    }
    if let Err(err) = serializer.serialize(value, type_name, limits) {
        return CapturedJson(JsonValue::String(format!("Failed to capture value: {err}")));
    }
    CapturedJson(writer.into_value().unwrap_or_else(|err| {
        JsonValue::String(format!("Failed to capture value: {err}"))
    }))
}

/// Extension trait for logging any `Captured` value through `slog`.
///
/// ## Example
/// ```ignore
/// use probe_snapshot::slog::SlogCapturedExt;
///
/// info!(logger, "request"; "user" => user.slog_captured());
/// ```
pub trait SlogCapturedExt: Captured + Sized {
    /// Captures `self` under the default limits and redaction.
    fn slog_captured(&self) -> CapturedJson {
        capture(self, any::type_name::<Self>(), &Limits::default(), None)
    }

    /// Captures `self` under explicit limits and redaction.
    fn slog_captured_with(&self, limits: &Limits, redaction: &dyn RedactionPolicy) -> CapturedJson {
        capture(self, any::type_name::<Self>(), limits, Some(redaction))
    }
}

impl<T> SlogCapturedExt for T where T: Captured {}
