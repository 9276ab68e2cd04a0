//! Why a value was not, or not fully, captured.

use std::fmt;

use crate::wire;

/// Reason attached to a value or field that could not be fully captured.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NotCapturedReason {
    /// The reference depth budget was exhausted.
    MaxDepth,
    /// The field count budget was exhausted.
    FieldCount,
    /// The capture deadline passed.
    Timeout,
    /// The value's identifier is redacted.
    RedactedIdent,
    /// The value's type is redacted.
    RedactedType,
    /// The inspected value's own code failed.
    Error(String),
}

impl NotCapturedReason {
    /// Wire text of this reason.
    pub fn as_str(&self) -> &str {
        match self {
            Self::MaxDepth => wire::DEPTH_REASON,
            Self::FieldCount => wire::FIELD_COUNT_REASON,
            Self::Timeout => wire::TIMEOUT_REASON,
            Self::RedactedIdent => wire::REDACTED_IDENT_REASON,
            Self::RedactedType => wire::REDACTED_TYPE_REASON,
            Self::Error(message) => message,
        }
    }
}

impl fmt::Display for NotCapturedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_text() {
        assert_eq!(NotCapturedReason::MaxDepth.to_string(), "depth");
        assert_eq!(NotCapturedReason::FieldCount.to_string(), "fieldCount");
        assert_eq!(NotCapturedReason::Timeout.to_string(), "timeout");
        assert_eq!(NotCapturedReason::RedactedIdent.to_string(), "redactedIdent");
        assert_eq!(NotCapturedReason::RedactedType.to_string(), "redactedType");
        assert_eq!(NotCapturedReason::Error("boom".into()).to_string(), "boom");
    }
}
