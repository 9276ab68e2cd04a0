//! Fatal serialization errors.

/// Errors that abort a serialization call.
///
/// Failures raised by the inspected values never surface here; they are
/// rendered inline as reason annotations.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError<E> {
    /// `serialize` was called with an empty type name.
    #[error("a type name is required to serialize a value")]
    MissingTypeName,
    /// The token writer rejected an event.
    #[error("token writer failed")]
    Sink(#[source] E),
}
