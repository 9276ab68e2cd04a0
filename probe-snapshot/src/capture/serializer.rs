//! The bounded value serializer.

use std::{
    collections::HashSet,
    panic::{self, AssertUnwindSafe},
};

use super::{
    error::SerializeError,
    reason::NotCapturedReason,
    traits::{
        AlienError, Captured, CapturedArray, CapturedCollection, CapturedMap, FieldDescriptor,
        PrimitiveArray, REDACTED, Reflect, Scalar, ValueKind,
    },
    writer::TokenWriter,
};
use crate::{
    limits::Limits,
    policy::{
        ContainerSafety, Deadline, DefaultRedaction, RedactionPolicy, WellKnownTypes,
        base_type_name,
    },
};

static DEFAULT_REDACTION: DefaultRedaction = DefaultRedaction;
static DEFAULT_SAFETY: WellKnownTypes = WellKnownTypes;

const PRIMITIVE_TYPES: &[&str] = &[
    "bool",
    "char",
    "i8",
    "i16",
    "i32",
    "i64",
    "i128",
    "isize",
    "u8",
    "u16",
    "u32",
    "u64",
    "u128",
    "usize",
    "f32",
    "f64",
    "str",
    "&str",
    "alloc::string::String",
];

/// Whether a declared type name denotes a primitive, reported as declared
/// rather than by the runtime value's type.
pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&type_name)
}

/// `app::model::Base<T>` and `id` give `Base::id`.
fn shadowed_field_name(layer_type: &str, name: &str) -> String {
    let layer = base_type_name(layer_type);
    let short = layer.rsplit("::").next().unwrap_or(layer);
    format!("{short}::{name}")
}

/// Failure inside one composite: either contained, or fatal for the call.
enum Fault<E> {
    Alien(AlienError),
    Sink(E),
}

impl<E> From<AlienError> for Fault<E> {
    fn from(error: AlienError) -> Self {
        Self::Alien(error)
    }
}

/// Runs a call into inspected code, converting panics into errors.
fn contain<T>(call: impl FnOnce() -> Result<T, AlienError>) -> Result<T, AlienError> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => Err(AlienError::from_panic(payload.as_ref())),
    }
}

/// Walks a value graph under [`Limits`] and emits events to a [`TokenWriter`].
///
/// Each call to [`serialize`](Self::serialize) emits exactly one balanced
/// `prologue`/`epilogue` pair for the root value. Policies decide what is
/// redacted and which containers are iterated; the deadline is checked before
/// every value.
///
/// ```rust
/// use probe_snapshot::{BoundedSerializer, JsonTokenWriter, Limits};
///
/// let mut writer = JsonTokenWriter::new();
/// BoundedSerializer::new(&mut writer)
///     .serialize(&vec![1_u8, 2, 3], "alloc::vec::Vec<u8>", &Limits::default())
///     .unwrap();
/// let value = writer.into_value().unwrap();
/// assert_eq!(value["size"], "3");
/// ```
pub struct BoundedSerializer<'a, W: TokenWriter + ?Sized> {
    writer: &'a mut W,
    redaction: &'a dyn RedactionPolicy,
    safety: &'a dyn ContainerSafety,
    deadline: Deadline,
}

impl<'a, W: TokenWriter + ?Sized> BoundedSerializer<'a, W> {
    /// A serializer with the default policies and no deadline.
    pub fn new(writer: &'a mut W) -> Self {
        Self {
            writer,
            redaction: &DEFAULT_REDACTION,
            safety: &DEFAULT_SAFETY,
            deadline: Deadline::never(),
        }
    }

    #[must_use]
    pub fn with_redaction(mut self, redaction: &'a dyn RedactionPolicy) -> Self {
        self.redaction = redaction;
        self
    }

    #[must_use]
    pub fn with_safety(mut self, safety: &'a dyn ContainerSafety) -> Self {
        self.safety = safety;
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Serializes one value reported under `type_name`.
    ///
    /// Fails only for an empty type name or when the writer fails; failures of
    /// the inspected value are rendered inline.
    pub fn serialize(
        &mut self,
        value: &dyn Captured,
        type_name: &str,
        limits: &Limits,
    ) -> Result<(), SerializeError<W::Error>> {
        if type_name.is_empty() {
            return Err(SerializeError::MissingTypeName);
        }
        self.write_value(value, type_name, limits)
            .map_err(SerializeError::Sink)
    }

    fn write_value(
        &mut self,
        value: &dyn Captured,
        type_name: &str,
        limits: &Limits,
    ) -> Result<(), W::Error> {
        self.writer.prologue(type_name)?;
        self.write_content(value, type_name, limits)?;
        self.writer.epilogue()
    }

    fn write_content(
        &mut self,
        value: &dyn Captured,
        type_name: &str,
        limits: &Limits,
    ) -> Result<(), W::Error> {
        let kind = match contain(|| Ok(value.kind())) {
            Ok(kind) => kind,
            Err(error) => return self.contained(type_name, &error),
        };

        if matches!(kind, ValueKind::Redacted) {
            return self.writer.not_captured(&NotCapturedReason::RedactedIdent);
        }
        if self.redaction.is_redacted_type(type_name) {
            return self.writer.not_captured(&NotCapturedReason::RedactedType);
        }
        if self.deadline.is_expired() {
            return self.writer.not_captured(&NotCapturedReason::Timeout);
        }

        let descend = limits.can_descend();
        match kind {
            ValueKind::Null => self.writer.null_value(),
            ValueKind::Str(text) | ValueKind::Enum(text) => self.write_string(text, limits),
            ValueKind::Scalar(scalar) => self.writer.primitive_value(&scalar),
            ValueKind::PrimitiveArray(array) if descend => self.write_primitive_array(array, limits),
            ValueKind::Array(array) if descend => self.write_array(&*array, limits),
            ValueKind::Collection(collection) if descend => {
                if self.safety.is_safe_collection(type_name) {
                    self.write_collection(collection, type_name, limits)
                } else {
                    self.write_object(collection.reflect(), type_name, limits)
                }
            }
            ValueKind::Map(map) if descend => {
                if self.safety.is_safe_map(type_name) {
                    self.write_map(map, type_name, limits)
                } else {
                    self.write_object(map.reflect(), type_name, limits)
                }
            }
            ValueKind::Object(reflect) if descend => {
                self.write_object(Some(reflect), type_name, limits)
            }
            _ => self.writer.not_captured(&NotCapturedReason::MaxDepth),
        }
    }

    fn contained(&mut self, type_name: &str, error: &AlienError) -> Result<(), W::Error> {
        tracing::debug!(type_name, error = %error, "contained failure while capturing value");
        self.writer
            .not_captured(&NotCapturedReason::Error(error.to_string()))
    }

    fn write_string(&mut self, text: &str, limits: &Limits) -> Result<(), W::Error> {
        let length = text.chars().count();
        if length <= limits.max_length {
            return self.writer.string(text, true, length);
        }
        let cut = text
            .char_indices()
            .nth(limits.max_length)
            .map_or(text.len(), |(index, _)| index);
        self.writer.string(&text[..cut], false, length)
    }

    fn write_primitive_array(
        &mut self,
        array: PrimitiveArray<'_>,
        limits: &Limits,
    ) -> Result<(), W::Error> {
        let size = array.len();
        let count = size.min(limits.max_collection_size);
        let element_type = array.element_type();
        self.writer.array_prologue()?;
        match array {
            PrimitiveArray::Bool(values) => {
                self.write_primitive_elements(&values[..count], element_type, |v| Scalar::Bool(*v))?;
            }
            PrimitiveArray::Char(values) => {
                self.write_primitive_elements(&values[..count], element_type, |v| Scalar::Char(*v))?;
            }
            PrimitiveArray::I8(values) => {
                self.write_primitive_elements(&values[..count], element_type, |v| {
                    Scalar::I64(i64::from(*v))
                })?;
            }
            PrimitiveArray::I16(values) => {
                self.write_primitive_elements(&values[..count], element_type, |v| {
                    Scalar::I64(i64::from(*v))
                })?;
            }
            PrimitiveArray::I32(values) => {
                self.write_primitive_elements(&values[..count], element_type, |v| {
                    Scalar::I64(i64::from(*v))
                })?;
            }
            PrimitiveArray::I64(values) => {
                self.write_primitive_elements(&values[..count], element_type, |v| Scalar::I64(*v))?;
            }
            PrimitiveArray::F32(values) => {
                self.write_primitive_elements(&values[..count], element_type, |v| Scalar::F32(*v))?;
            }
            PrimitiveArray::F64(values) => {
                self.write_primitive_elements(&values[..count], element_type, |v| Scalar::F64(*v))?;
            }
        }
        self.writer.array_epilogue(count == size, size)
    }

    fn write_primitive_elements<T>(
        &mut self,
        values: &[T],
        element_type: &str,
        to_scalar: impl Fn(&T) -> Scalar<'static>,
    ) -> Result<(), W::Error> {
        for value in values {
            self.writer
                .primitive_array_element(&to_scalar(value), element_type)?;
        }
        Ok(())
    }

    fn write_array(&mut self, array: &dyn CapturedArray, limits: &Limits) -> Result<(), W::Error> {
        let size = array.len();
        let count = size.min(limits.max_collection_size);
        let child = limits.dec_depth();
        self.writer.array_prologue()?;
        let mut emitted = 0;
        while emitted < count {
            let Some(element) = array.element(emitted) else {
                break;
            };
            self.write_value(element, element.type_name(), &child)?;
            emitted += 1;
        }
        self.writer.array_epilogue(emitted == size, size)
    }

    fn write_collection(
        &mut self,
        collection: &dyn CapturedCollection,
        type_name: &str,
        limits: &Limits,
    ) -> Result<(), W::Error> {
        self.writer.collection_prologue()?;
        let mut size = None;
        let mut emitted = 0;
        let failure = match self.collection_elements(collection, limits, &mut size, &mut emitted) {
            Ok(()) => None,
            Err(Fault::Alien(error)) => Some(error),
            Err(Fault::Sink(error)) => return Err(error),
        };
        let size = size.unwrap_or(emitted);
        self.writer.collection_epilogue(emitted == size, size)?;
        match failure {
            Some(error) => self.contained(type_name, &error),
            None => Ok(()),
        }
    }

    fn collection_elements(
        &mut self,
        collection: &dyn CapturedCollection,
        limits: &Limits,
        size: &mut Option<usize>,
        emitted: &mut usize,
    ) -> Result<(), Fault<W::Error>> {
        let total = contain(|| collection.size())?;
        *size = Some(total);
        let count = total.min(limits.max_collection_size);
        if count == 0 {
            return Ok(());
        }
        let child = limits.dec_depth();
        let mut elements = contain(|| collection.elements())?;
        while *emitted < count {
            let Some(element) = contain(|| Ok(elements.next()))? else {
                break;
            };
            let element = element?;
            self.write_value(&*element, element.type_name(), &child)
                .map_err(Fault::Sink)?;
            *emitted += 1;
        }
        Ok(())
    }

    fn write_map(
        &mut self,
        map: &dyn CapturedMap,
        type_name: &str,
        limits: &Limits,
    ) -> Result<(), W::Error> {
        self.writer.map_prologue()?;
        let mut size = None;
        let mut emitted = 0;
        let failure = match self.map_entries(map, limits, &mut size, &mut emitted) {
            Ok(()) => None,
            Err(Fault::Alien(error)) => Some(error),
            Err(Fault::Sink(error)) => return Err(error),
        };
        let size = size.unwrap_or(emitted);
        self.writer.map_epilogue(emitted == size, size)?;
        match failure {
            Some(error) => self.contained(type_name, &error),
            None => Ok(()),
        }
    }

    fn map_entries(
        &mut self,
        map: &dyn CapturedMap,
        limits: &Limits,
        size: &mut Option<usize>,
        emitted: &mut usize,
    ) -> Result<(), Fault<W::Error>> {
        let total = contain(|| map.size())?;
        *size = Some(total);
        let count = total.min(limits.max_collection_size);
        if count == 0 {
            return Ok(());
        }
        let child = limits.dec_depth();
        let mut entries = contain(|| map.entries())?;
        while *emitted < count {
            let Some(entry) = contain(|| Ok(entries.next()))? else {
                break;
            };
            let (key, value) = entry?;
            let redacted = matches!(
                contain(|| Ok(key.kind())),
                Ok(ValueKind::Str(name)) if self.redaction.is_redacted_keyword(name)
            );
            self.writer.map_entry_prologue().map_err(Fault::Sink)?;
            self.write_value(&*key, key.type_name(), &child)
                .map_err(Fault::Sink)?;
            let written: &dyn Captured = if redacted { &REDACTED } else { &*value };
            self.write_value(written, value.type_name(), &child)
                .map_err(Fault::Sink)?;
            self.writer.map_entry_epilogue().map_err(Fault::Sink)?;
            *emitted += 1;
        }
        Ok(())
    }

    fn write_object(
        &mut self,
        reflect: Option<&dyn Reflect>,
        type_name: &str,
        limits: &Limits,
    ) -> Result<(), W::Error> {
        self.writer.object_prologue()?;
        let mut truncated = false;
        let mut failure = None;
        if let Some(reflect) = reflect {
            match self.object_fields(reflect, limits) {
                Ok(more) => truncated = more,
                Err(Fault::Alien(error)) => failure = Some(error),
                Err(Fault::Sink(error)) => return Err(error),
            }
        }
        self.writer.object_epilogue()?;
        if truncated {
            self.writer.not_captured(&NotCapturedReason::FieldCount)?;
        }
        match failure {
            Some(error) => self.contained(type_name, &error),
            None => Ok(()),
        }
    }

    /// Emits the fields of every layer; returns whether fields were left out
    /// because of the field budget.
    ///
    /// A parent-layer field whose name was already emitted is reported under
    /// `Parent::name`.
    fn object_fields(
        &mut self,
        reflect: &dyn Reflect,
        limits: &Limits,
    ) -> Result<bool, Fault<W::Error>> {
        let layers = contain(|| reflect.declared_fields())?;
        let mut emitted: HashSet<String> = HashSet::new();
        let mut count = 0;
        for (layer, fields) in layers.iter().enumerate() {
            for (index, field) in fields.fields.iter().enumerate() {
                if !self.writer.filter_in_field(field) {
                    continue;
                }
                if count >= limits.max_field_count {
                    return Ok(true);
                }
                count += 1;
                let name = if emitted.contains(&*field.name) {
                    shadowed_field_name(&fields.type_name, &field.name)
                } else {
                    field.name.to_string()
                };
                self.write_field(reflect, layer, index, field, &name, limits)
                    .map_err(Fault::Sink)?;
                emitted.insert(name);
            }
        }
        Ok(false)
    }

    fn write_field(
        &mut self,
        reflect: &dyn Reflect,
        layer: usize,
        index: usize,
        field: &FieldDescriptor,
        name: &str,
        limits: &Limits,
    ) -> Result<(), W::Error> {
        let child = limits.dec_depth();
        if field.redacted || self.redaction.is_redacted_keyword(&field.name) {
            self.writer
                .object_field_prologue(name, limits.max_reference_depth)?;
            return self.write_value(&REDACTED, &field.declared_type, &child);
        }
        match contain(|| reflect.field_value(layer, index)) {
            Ok(value) => {
                self.writer
                    .object_field_prologue(name, limits.max_reference_depth)?;
                let type_name = if is_primitive(&field.declared_type) {
                    &*field.declared_type
                } else {
                    value.type_name()
                };
                self.write_value(&*value, type_name, &child)
            }
            Err(error) => {
                tracing::debug!(
                    field = %field.name,
                    error = %error,
                    "contained failure while reading field"
                );
                self.writer.field_not_captured(
                    name,
                    &field.declared_type,
                    &NotCapturedReason::Error(error.to_string()),
                )
            }
        }
    }
}
