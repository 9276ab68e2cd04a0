//! Bounded capture of runtime values into size-limited snapshot documents.
//!
//! This crate separates:
//! - **Capture**: walking an arbitrary value graph under [`Limits`] and emitting
//!   a structural event stream to a [`TokenWriter`].
//! - **Pruning**: shrinking an already-encoded document below a byte budget by
//!   replacing the least valuable objects with a placeholder.
//!
//! What this crate does:
//! - defines the value-inspection traits (`Captured`, `Reflect`, ...) and
//!   implements them for std types
//! - enforces depth, collection size, string length and field count budgets
//! - contains failures (errors and panics) raised by the inspected values
//! - provides JSON and human-readable encoders, plus logging integrations behind
//!   feature flags (e.g. `slog`)
//!
//! What it does not do:
//! - decide when a probe fires
//! - perform I/O or upload snapshots
//!
//! The `Capture` derive macro lives in `probe-snapshot-derive` and is re-exported
//! from this crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else,
    clippy::cast_possible_truncation
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use probe_snapshot_derive::Capture;

#[allow(unused_extern_crates)]
extern crate self as probe_snapshot;

// Module declarations
mod capture;
mod encode;
mod limits;
pub mod policy;
mod prune;
#[cfg(feature = "json")]
mod snapshot;
#[cfg(feature = "slog")]
pub mod slog;
#[cfg(feature = "tracing-display")]
pub mod tracing;
pub mod wire;

// Re-exports from capture module
pub use capture::{
    AlienError, BoundedSerializer, Captured, CapturedArray, CapturedCollection, CapturedMap,
    CapturedRef, Elements, Entries, FieldDescriptor, NotCapturedReason, PrimitiveArray, REDACTED,
    Reflect, RedactedValue, Scalar, SerializeError, TokenWriter, TypeFields, ValueKind,
    is_primitive, unknown_field,
};
// Re-exports from encode module
#[cfg(feature = "json")]
pub use encode::{JsonTokenWriter, JsonWriteError};
pub use encode::TextTokenWriter;
pub use limits::{
    DEFAULT_COLLECTION_SIZE, DEFAULT_FIELD_COUNT, DEFAULT_LENGTH, DEFAULT_REFERENCE_DEPTH, Limits,
};
// Re-exports from policy module
pub use policy::{
    ContainerSafety, Deadline, DefaultRedaction, KeywordRedaction, RedactionPolicy, WellKnownTypes,
};
pub use prune::prune;
#[cfg(feature = "json")]
pub use snapshot::{
    CaptureConfig, CaptureError, DEFAULT_MAX_SNAPSHOT_SIZE, DEFAULT_PRUNE_MIN_LEVEL, DEFAULT_TIMEOUT,
    Frame, capture_json,
};
