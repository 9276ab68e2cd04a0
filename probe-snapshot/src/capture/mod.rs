//! Bounded serialization of captured values.
//!
//! This module contains:
//! - the inspection traits (`traits`)
//! - `Captured` implementations for std and feature-gated types (`impls`)
//! - the `TokenWriter` event contract (`writer`)
//! - the `BoundedSerializer` (`serializer`)

mod error;
mod impls;
mod reason;
mod serializer;
mod traits;
mod writer;


pub use error::SerializeError;
pub use reason::NotCapturedReason;
pub use serializer::{BoundedSerializer, is_primitive};
pub use traits::{
    AlienError, Captured, CapturedArray, CapturedCollection, CapturedMap, CapturedRef, Elements,
    Entries, FieldDescriptor, PrimitiveArray, REDACTED, Reflect, RedactedValue, Scalar,
    TypeFields, ValueKind, unknown_field,
};
pub use writer::TokenWriter;
