//! The event contract between the serializer and encoders.

use super::{
    reason::NotCapturedReason,
    traits::{FieldDescriptor, Scalar},
};

/// Receives the structural event stream of one serialization.
///
/// Every value is framed by exactly one `prologue`/`epilogue` pair. Composites
/// additionally frame their children with a matched inner pair, and map
/// entries are framed by `map_entry_prologue`/`map_entry_epilogue` around the
/// key and value. `not_captured` is either the whole content of a value or a
/// trailing annotation after a truncated composite's inner epilogue.
///
/// The serializer never formats text; rendering reasons, counters and
/// truncation flags is up to the implementation. Errors returned here are
/// propagated to the caller of the serializer unchanged.
pub trait TokenWriter {
    type Error;

    fn prologue(&mut self, type_name: &str) -> Result<(), Self::Error>;

    fn epilogue(&mut self) -> Result<(), Self::Error>;

    fn null_value(&mut self) -> Result<(), Self::Error>;

    /// A string, possibly cut to the length budget. `original_length` counts
    /// characters of the value before truncation.
    fn string(
        &mut self,
        value: &str,
        is_complete: bool,
        original_length: usize,
    ) -> Result<(), Self::Error>;

    fn primitive_value(&mut self, value: &Scalar<'_>) -> Result<(), Self::Error>;

    fn array_prologue(&mut self) -> Result<(), Self::Error>;

    fn array_epilogue(&mut self, is_complete: bool, size: usize) -> Result<(), Self::Error>;

    fn primitive_array_element(
        &mut self,
        value: &Scalar<'_>,
        type_name: &str,
    ) -> Result<(), Self::Error>;

    fn collection_prologue(&mut self) -> Result<(), Self::Error>;

    fn collection_epilogue(&mut self, is_complete: bool, size: usize) -> Result<(), Self::Error>;

    fn map_prologue(&mut self) -> Result<(), Self::Error>;

    fn map_entry_prologue(&mut self) -> Result<(), Self::Error>;

    fn map_entry_epilogue(&mut self) -> Result<(), Self::Error>;

    fn map_epilogue(&mut self, is_complete: bool, size: usize) -> Result<(), Self::Error>;

    fn object_prologue(&mut self) -> Result<(), Self::Error>;

    /// Whether a declared field is captured at all. Skipped fields do not count
    /// toward the field budget.
    fn filter_in_field(&self, field: &FieldDescriptor) -> bool {
        !field.is_static && !field.is_synthetic
    }

    /// Starts a field; `remaining_depth` is the owning object's, before the
    /// field's value descends one level.
    fn object_field_prologue(
        &mut self,
        name: &str,
        remaining_depth: usize,
    ) -> Result<(), Self::Error>;

    /// A field whose value could not be read.
    fn field_not_captured(
        &mut self,
        name: &str,
        declared_type: &str,
        reason: &NotCapturedReason,
    ) -> Result<(), Self::Error>;

    fn object_epilogue(&mut self) -> Result<(), Self::Error>;

    fn not_captured(&mut self, reason: &NotCapturedReason) -> Result<(), Self::Error>;
}

impl<W: TokenWriter + ?Sized> TokenWriter for &mut W {
    type Error = W::Error;

    fn prologue(&mut self, type_name: &str) -> Result<(), Self::Error> {
        (**self).prologue(type_name)
    }

    fn epilogue(&mut self) -> Result<(), Self::Error> {
        (**self).epilogue()
    }

    fn null_value(&mut self) -> Result<(), Self::Error> {
        (**self).null_value()
    }

    fn string(
        &mut self,
        value: &str,
        is_complete: bool,
        original_length: usize,
    ) -> Result<(), Self::Error> {
        (**self).string(value, is_complete, original_length)
    }

    fn primitive_value(&mut self, value: &Scalar<'_>) -> Result<(), Self::Error> {
        (**self).primitive_value(value)
    }

    fn array_prologue(&mut self) -> Result<(), Self::Error> {
        (**self).array_prologue()
    }

    fn array_epilogue(&mut self, is_complete: bool, size: usize) -> Result<(), Self::Error> {
        (**self).array_epilogue(is_complete, size)
    }

    fn primitive_array_element(
        &mut self,
        value: &Scalar<'_>,
        type_name: &str,
    ) -> Result<(), Self::Error> {
        (**self).primitive_array_element(value, type_name)
    }

    fn collection_prologue(&mut self) -> Result<(), Self::Error> {
        (**self).collection_prologue()
    }

    fn collection_epilogue(&mut self, is_complete: bool, size: usize) -> Result<(), Self::Error> {
        (**self).collection_epilogue(is_complete, size)
    }

    fn map_prologue(&mut self) -> Result<(), Self::Error> {
        (**self).map_prologue()
    }

    fn map_entry_prologue(&mut self) -> Result<(), Self::Error> {
        (**self).map_entry_prologue()
    }

    fn map_entry_epilogue(&mut self) -> Result<(), Self::Error> {
        (**self).map_entry_epilogue()
    }

    fn map_epilogue(&mut self, is_complete: bool, size: usize) -> Result<(), Self::Error> {
        (**self).map_epilogue(is_complete, size)
    }

    fn object_prologue(&mut self) -> Result<(), Self::Error> {
        (**self).object_prologue()
    }

    fn filter_in_field(&self, field: &FieldDescriptor) -> bool {
        (**self).filter_in_field(field)
    }

    fn object_field_prologue(
        &mut self,
        name: &str,
        remaining_depth: usize,
    ) -> Result<(), Self::Error> {
        (**self).object_field_prologue(name, remaining_depth)
    }

    fn field_not_captured(
        &mut self,
        name: &str,
        declared_type: &str,
        reason: &NotCapturedReason,
    ) -> Result<(), Self::Error> {
        (**self).field_not_captured(name, declared_type, reason)
    }

    fn object_epilogue(&mut self) -> Result<(), Self::Error> {
        (**self).object_epilogue()
    }

    fn not_captured(&mut self, reason: &NotCapturedReason) -> Result<(), Self::Error> {
        (**self).not_captured(reason)
    }
}
