//! Capture policies: redaction, container safety and deadlines.
//!
//! This module provides:
//!
//! - **Redaction** (`redaction`): The [`RedactionPolicy`] trait deciding which
//!   identifiers and types are never captured, with the built-in
//!   [`DefaultRedaction`] and the configurable [`KeywordRedaction`].
//!
//! - **Safety** (`safety`): The [`ContainerSafety`] trait deciding which
//!   collections and maps may be iterated, with [`WellKnownTypes`].
//!
//! - **Deadline** (`deadline`): The [`Deadline`] consulted between values.
//!
//! # Example
//!
//! ```rust
//! use probe_snapshot::{KeywordRedaction, RedactionPolicy};
//!
//! let policy = KeywordRedaction::builder()
//!     .redact_identifier("customerPin")
//!     .redact_type("billing::*")
//!     .build();
//! assert!(policy.is_redacted_keyword("customer_pin"));
//! assert!(policy.is_redacted_keyword("Password"));
//! assert!(policy.is_redacted_type("billing::Card"));
//! ```

pub mod deadline;
pub mod redaction;
pub mod safety;

pub use deadline::Deadline;
pub use redaction::{
    DEFAULT_KEYWORDS, DefaultRedaction, KeywordRedaction, KeywordRedactionBuilder, RedactionPolicy,
    normalize_identifier,
};
pub use safety::{ContainerSafety, WellKnownTypes, base_type_name};
