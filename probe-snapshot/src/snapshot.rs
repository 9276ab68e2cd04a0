//! End-to-end capture of a probe's variables into a pruned JSON document.

use std::{any, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    capture::{BoundedSerializer, Captured, REDACTED, SerializeError},
    encode::{JsonTokenWriter, JsonWriteError},
    limits::Limits,
    policy::{Deadline, KeywordRedaction, RedactionPolicy},
    prune::prune,
    wire,
};

/// Default wall-clock budget of one capture.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);
/// Default byte budget of one encoded snapshot.
pub const DEFAULT_MAX_SNAPSHOT_SIZE: usize = 1024 * 1024;
/// Default shallowest nesting level the pruner may replace.
pub const DEFAULT_PRUNE_MIN_LEVEL: usize = 2;

/// Settings for one capture.
///
/// Deserializes from camelCase keys; every key is optional.
///
/// ```rust
/// let config: probe_snapshot::CaptureConfig = serde_json::from_str(
///     r#"{"limits": {"maxReferenceDepth": 1}, "timeoutMs": 50, "redactedTypes": ["billing::*"]}"#,
/// )
/// .unwrap();
/// assert_eq!(config.limits.max_reference_depth, 1);
/// assert_eq!(config.limits.max_collection_size, 100);
/// assert_eq!(config.timeout.as_millis(), 50);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptureConfig {
    pub limits: Limits,
    #[serde(rename = "timeoutMs", with = "millis")]
    pub timeout: Duration,
    pub max_snapshot_size: usize,
    pub prune_min_level: usize,
    /// Identifiers redacted on top of the default keywords.
    pub redacted_identifiers: Vec<String>,
    /// Identifiers removed from the redacted set.
    pub excluded_identifiers: Vec<String>,
    /// Redacted type names; a trailing `*` matches any suffix.
    pub redacted_types: Vec<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            timeout: DEFAULT_TIMEOUT,
            max_snapshot_size: DEFAULT_MAX_SNAPSHOT_SIZE,
            prune_min_level: DEFAULT_PRUNE_MIN_LEVEL,
            redacted_identifiers: Vec::new(),
            excluded_identifiers: Vec::new(),
            redacted_types: Vec::new(),
        }
    }
}

impl CaptureConfig {
    /// The redaction policy described by this configuration.
    pub fn redaction(&self) -> KeywordRedaction {
        let builder = self
            .redacted_identifiers
            .iter()
            .fold(KeywordRedaction::builder(), |builder, id| {
                builder.redact_identifier(id.as_str())
            });
        let builder = self
            .excluded_identifiers
            .iter()
            .fold(builder, |builder, id| builder.exclude_identifier(id.as_str()));
        self.redacted_types
            .iter()
            .fold(builder, |builder, pattern| builder.redact_type(pattern.as_str()))
            .build()
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        duration: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Errors raised while building a snapshot document.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to capture `{name}`")]
    Serialize {
        name: String,
        #[source]
        source: SerializeError<JsonWriteError>,
    },
    #[error(transparent)]
    Encode(#[from] JsonWriteError),
}

struct Variable<'a> {
    name: String,
    type_name: &'static str,
    value: &'a dyn Captured,
}

/// The named arguments and locals of one stack frame.
///
/// ```rust
/// use probe_snapshot::{CaptureConfig, Frame};
///
/// let id = 7_u64;
/// let password = String::from("hunter2");
/// let document = Frame::new()
///     .argument("id", &id)
///     .local("password", &password)
///     .to_json_document(&CaptureConfig::default())
///     .unwrap();
/// assert_eq!(
///     document,
///     r#"{"arguments":{"id":{"type":"u64","value":"7"}},"locals":{"password":{"type":"alloc::string::String","notCapturedReason":"redactedIdent"}}}"#
/// );
/// ```
#[derive(Default)]
pub struct Frame<'a> {
    arguments: Vec<Variable<'a>>,
    locals: Vec<Variable<'a>>,
}

impl<'a> Frame<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn argument<T: Captured>(mut self, name: impl Into<String>, value: &'a T) -> Self {
        self.arguments.push(Variable {
            name: name.into(),
            type_name: any::type_name::<T>(),
            value,
        });
        self
    }

    #[must_use]
    pub fn local<T: Captured>(mut self, name: impl Into<String>, value: &'a T) -> Self {
        self.locals.push(Variable {
            name: name.into(),
            type_name: any::type_name::<T>(),
            value,
        });
        self
    }

    /// Captures every variable under one shared deadline, then prunes the
    /// encoded document to the configured size.
    pub fn to_json_document(&self, config: &CaptureConfig) -> Result<String, CaptureError> {
        let redaction = config.redaction();
        let deadline = Deadline::after(config.timeout);
        let mut document = Map::new();
        for (key, variables) in [(wire::ARGUMENTS, &self.arguments), (wire::LOCALS, &self.locals)] {
            let mut captured = Map::new();
            for variable in variables {
                let value: &dyn Captured = if redaction.is_redacted_keyword(&variable.name) {
                    &REDACTED
                } else {
                    variable.value
                };
                let encoded = capture_value(
                    value,
                    variable.type_name,
                    &config.limits,
                    &redaction,
                    deadline,
                )
                .map_err(|error| with_name(error, &variable.name))?;
                captured.insert(variable.name.clone(), encoded);
            }
            document.insert(key.to_string(), Value::Object(captured));
        }
        finish(&Value::Object(document), config)
    }
}

/// Captures one value into a pruned JSON document.
///
/// ```rust
/// use probe_snapshot::{CaptureConfig, capture_json};
///
/// let document = capture_json(&42_i32, "i32", &CaptureConfig::default()).unwrap();
/// assert_eq!(document, r#"{"type":"i32","value":"42"}"#);
/// ```
pub fn capture_json(
    value: &dyn Captured,
    type_name: &str,
    config: &CaptureConfig,
) -> Result<String, CaptureError> {
    let redaction = config.redaction();
    let encoded = capture_value(
        value,
        type_name,
        &config.limits,
        &redaction,
        Deadline::after(config.timeout),
    )
    .map_err(|error| with_name(error, type_name))?;
    finish(&encoded, config)
}

fn capture_value(
    value: &dyn Captured,
    type_name: &str,
    limits: &Limits,
    redaction: &dyn RedactionPolicy,
    deadline: Deadline,
) -> Result<Value, SerializeError<JsonWriteError>> {
    let mut writer = JsonTokenWriter::new();
    BoundedSerializer::new(&mut writer)
        .with_redaction(redaction)
        .with_deadline(deadline)
        .serialize(value, type_name, limits)?;
    writer.into_value().map_err(SerializeError::Sink)
}

fn with_name(source: SerializeError<JsonWriteError>, name: &str) -> CaptureError {
    CaptureError::Serialize {
        name: name.to_string(),
        source,
    }
}

fn finish(document: &Value, config: &CaptureConfig) -> Result<String, CaptureError> {
    let text = serde_json::to_string(document).map_err(JsonWriteError::from)?;
    Ok(prune(&text, config.max_snapshot_size, config.prune_min_level).into_owned())
}
