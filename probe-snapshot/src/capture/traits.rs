//! Core traits for inspecting captured values.
//!
//! This module defines the inspection capability the serializer walks:
//!
//! - [`Captured`]: every capturable value, classified once into a [`ValueKind`]
//! - [`CapturedArray`]: trusted, indexable sequences of values
//! - [`CapturedCollection`] / [`CapturedMap`]: containers whose iteration runs
//!   the container's own, possibly misbehaving, code
//! - [`Reflect`]: field enumeration and access for objects

use std::{borrow::Cow, fmt, ops::Deref};

// =============================================================================
// AlienError - Failures raised by inspected code
// =============================================================================

/// A failure raised by code owned by the inspected value.
///
/// Returned by container sizes, iterators and field accessors, and produced by
/// the serializer when such code panics. It never aborts a capture: it becomes
/// an inline annotation scoped to the failing field or composite.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AlienError {
    message: String,
}

impl AlienError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Converts a panic payload into an error.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let detail = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::new(format!("panicked: {detail}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// =============================================================================
// Scalar - Values rendered through the scalar path
// =============================================================================

/// A value rendered through a fixed, side-effect-free conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Char(char),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F32(f32),
    F64(f64),
    /// Text produced by a whitelisted conversion (timestamps, UUIDs, paths...).
    Text(Cow<'a, str>),
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::Char(value) => fmt::Display::fmt(value, f),
            Self::I64(value) => fmt::Display::fmt(value, f),
            Self::U64(value) => fmt::Display::fmt(value, f),
            Self::I128(value) => fmt::Display::fmt(value, f),
            Self::U128(value) => fmt::Display::fmt(value, f),
            Self::F32(value) => fmt::Display::fmt(value, f),
            Self::F64(value) => fmt::Display::fmt(value, f),
            Self::Text(value) => f.write_str(value),
        }
    }
}

// =============================================================================
// PrimitiveArray - Arrays with a fast path
// =============================================================================

/// Slices of the eight primitive element types, emitted without recursion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrimitiveArray<'a> {
    Bool(&'a [bool]),
    Char(&'a [char]),
    I8(&'a [i8]),
    I16(&'a [i16]),
    I32(&'a [i32]),
    I64(&'a [i64]),
    F32(&'a [f32]),
    F64(&'a [f64]),
}

impl PrimitiveArray<'_> {
    pub const fn len(&self) -> usize {
        match self {
            Self::Bool(values) => values.len(),
            Self::Char(values) => values.len(),
            Self::I8(values) => values.len(),
            Self::I16(values) => values.len(),
            Self::I32(values) => values.len(),
            Self::I64(values) => values.len(),
            Self::F32(values) => values.len(),
            Self::F64(values) => values.len(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type name reported for each element.
    pub const fn element_type(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
        }
    }
}

// =============================================================================
// ValueKind - What a value is, decided once per node
// =============================================================================

/// Classification of a captured value.
pub enum ValueKind<'a> {
    /// The redaction sentinel [`REDACTED`].
    Redacted,
    Null,
    Str(&'a str),
    Scalar(Scalar<'a>),
    PrimitiveArray(PrimitiveArray<'a>),
    Array(Box<dyn CapturedArray + 'a>),
    Collection(&'a dyn CapturedCollection),
    Map(&'a dyn CapturedMap),
    /// An enum variant without data, captured by name.
    Enum(&'a str),
    Object(&'a dyn Reflect),
}

impl fmt::Debug for ValueKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redacted => f.write_str("Redacted"),
            Self::Null => f.write_str("Null"),
            Self::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Self::PrimitiveArray(value) => f.debug_tuple("PrimitiveArray").field(value).finish(),
            Self::Array(array) => f.debug_struct("Array").field("len", &array.len()).finish(),
            Self::Collection(_) => f.write_str("Collection"),
            Self::Map(_) => f.write_str("Map"),
            Self::Enum(name) => f.debug_tuple("Enum").field(name).finish(),
            Self::Object(_) => f.write_str("Object"),
        }
    }
}

// =============================================================================
// Captured - Every capturable value
// =============================================================================

/// A value the serializer can capture.
///
/// Implemented for std scalars, strings, sequences, collections, maps and smart
/// pointers, and generated by `#[derive(Capture)]` for structs and enums.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Captured`",
    label = "this type cannot be captured",
    note = "use `#[derive(Capture)]` on the type definition",
    note = "or mark the field with `#[capture(skip)]`"
)]
pub trait Captured {
    /// Classifies this value.
    fn kind(&self) -> ValueKind<'_>;

    /// The runtime type name reported for this value.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Fast path for slices of primitives; `None` for every other element type.
    #[doc(hidden)]
    fn primitive_slice(_slice: &[Self]) -> Option<PrimitiveArray<'_>>
    where
        Self: Sized,
    {
        None
    }
}

/// A reference to a captured value, borrowed from its owner or produced on
/// demand by an accessor.
pub enum CapturedRef<'a> {
    Borrowed(&'a dyn Captured),
    Owned(Box<dyn Captured + 'a>),
}

impl<'a> Deref for CapturedRef<'a> {
    type Target = dyn Captured + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => value.as_ref(),
        }
    }
}

impl<'a> From<&'a dyn Captured> for CapturedRef<'a> {
    fn from(value: &'a dyn Captured) -> Self {
        Self::Borrowed(value)
    }
}

// =============================================================================
// Sequences, collections and maps
// =============================================================================

/// An indexable sequence whose length and elements are trusted.
pub trait CapturedArray {
    fn len(&self) -> usize;

    fn element(&self, index: usize) -> Option<&dyn Captured>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator over collection elements; every step may fail.
pub type Elements<'a> = Box<dyn Iterator<Item = Result<CapturedRef<'a>, AlienError>> + 'a>;

/// Iterator over map entries; every step may fail.
pub type Entries<'a> =
    Box<dyn Iterator<Item = Result<(CapturedRef<'a>, CapturedRef<'a>), AlienError>> + 'a>;

/// A collection whose size and iteration run the collection's own code.
pub trait CapturedCollection {
    fn size(&self) -> Result<usize, AlienError>;

    fn elements(&self) -> Result<Elements<'_>, AlienError>;

    /// Field view used when the collection type is not known to be safe.
    fn reflect(&self) -> Option<&dyn Reflect> {
        None
    }
}

/// A map whose size and iteration run the map's own code.
pub trait CapturedMap {
    fn size(&self) -> Result<usize, AlienError>;

    fn entries(&self) -> Result<Entries<'_>, AlienError>;

    /// Field view used when the map type is not known to be safe.
    fn reflect(&self) -> Option<&dyn Reflect> {
        None
    }
}

// =============================================================================
// Reflect - Field enumeration for objects
// =============================================================================

/// A declared field of an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: Cow<'static, str>,
    /// Type name of the declaration, as opposed to the runtime value's type.
    pub declared_type: Cow<'static, str>,
    /// Type-level state, not part of any instance.
    pub is_static: bool,
    /// Generated by tooling rather than declared by the author.
    pub is_synthetic: bool,
    /// Always captured as redacted, whatever its name.
    pub redacted: bool,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        declared_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            is_static: false,
            is_synthetic: false,
            redacted: false,
        }
    }

    #[must_use]
    pub fn redacted(mut self) -> Self {
        self.redacted = true;
        self
    }

    #[must_use]
    pub fn static_field(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn synthetic(mut self) -> Self {
        self.is_synthetic = true;
        self
    }
}

/// The fields one type in a hierarchy declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeFields {
    pub type_name: Cow<'static, str>,
    pub fields: Vec<FieldDescriptor>,
}

impl TypeFields {
    pub fn new(type_name: impl Into<Cow<'static, str>>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }
}

/// Field access for objects.
///
/// `declared_fields` lists one [`TypeFields`] layer per type in the hierarchy,
/// most derived first. `field_value(layer, index)` addresses a field by its
/// position in that listing.
pub trait Reflect {
    fn declared_fields(&self) -> Result<Vec<TypeFields>, AlienError>;

    fn field_value(&self, layer: usize, index: usize) -> Result<CapturedRef<'_>, AlienError>;
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn declared_fields(&self) -> Result<Vec<TypeFields>, AlienError> {
        (**self).declared_fields()
    }

    fn field_value(&self, layer: usize, index: usize) -> Result<CapturedRef<'_>, AlienError> {
        (**self).field_value(layer, index)
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn declared_fields(&self) -> Result<Vec<TypeFields>, AlienError> {
        (**self).declared_fields()
    }

    fn field_value(&self, layer: usize, index: usize) -> Result<CapturedRef<'_>, AlienError> {
        (**self).field_value(layer, index)
    }
}

/// Error for a `(layer, index)` pair outside the declared fields.
pub fn unknown_field(layer: usize, index: usize) -> AlienError {
    AlienError::new(format!("no field at layer {layer}, index {index}"))
}

// =============================================================================
// RedactedValue - The redaction sentinel
// =============================================================================

/// The sentinel substituted for values that must not be captured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedactedValue;

/// The redaction sentinel.
pub static REDACTED: RedactedValue = RedactedValue;

impl Captured for RedactedValue {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Redacted
    }
}
