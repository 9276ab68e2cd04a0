//! `TokenWriter` implementations.
//!
//! - `JsonTokenWriter` (feature `json`): the snapshot document shape the
//!   pruner understands
//! - `TextTokenWriter`: compact human-readable text for logs

#[cfg(feature = "json")]
mod json;
mod text;

#[cfg(feature = "json")]
pub use json::{JsonTokenWriter, JsonWriteError};
pub use text::TextTokenWriter;
