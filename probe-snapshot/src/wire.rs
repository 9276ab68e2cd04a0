//! Reserved keys and sentinels of the JSON snapshot shape.
//!
//! The JSON encoder writes these and the pruner scans for them, so both sides
//! must use the constants from this module.

pub const TYPE: &str = "type";
pub const VALUE: &str = "value";
pub const IS_NULL: &str = "isNull";
pub const TRUNCATED: &str = "truncated";
pub const SIZE: &str = "size";

/// Container key of array and collection elements.
pub const ELEMENTS: &str = "elements";
/// Container key of map entries.
pub const ENTRIES: &str = "entries";
/// Container key of object fields.
pub const FIELDS: &str = "fields";

pub const ARGUMENTS: &str = "arguments";
pub const LOCALS: &str = "locals";

/// Key annotating a value that was not, or not fully, captured.
pub const NOT_CAPTURED_REASON: &str = "notCapturedReason";

pub const DEPTH_REASON: &str = "depth";
pub const FIELD_COUNT_REASON: &str = "fieldCount";
pub const COLLECTION_SIZE_REASON: &str = "collectionSize";
pub const TIMEOUT_REASON: &str = "timeout";
pub const REDACTED_IDENT_REASON: &str = "redactedIdent";
pub const REDACTED_TYPE_REASON: &str = "redactedType";

/// Token substituted for every subtree removed by the pruner.
pub const PRUNED_PLACEHOLDER: &str = r#"{"pruned":true}"#;
