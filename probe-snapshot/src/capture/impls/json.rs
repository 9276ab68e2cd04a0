//! `serde_json::Value` support.
//!
//! A `Value` classifies itself by its variant: arrays are collections and
//! objects are maps, so both are subject to the container safety policy like
//! any other container.

use serde_json::{Map, Number, Value};

use super::{borrowed, borrowed_entry};
use crate::capture::traits::{
    AlienError, Captured, CapturedCollection, CapturedMap, Elements, Entries, Scalar, ValueKind,
};

fn number_scalar(number: &Number) -> Scalar<'_> {
    if let Some(value) = number.as_i64() {
        Scalar::I64(value)
    } else if let Some(value) = number.as_u64() {
        Scalar::U64(value)
    } else if let Some(value) = number.as_f64() {
        Scalar::F64(value)
    } else {
        Scalar::Text(number.to_string().into())
    }
}

impl Captured for Value {
    fn kind(&self) -> ValueKind<'_> {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(value) => ValueKind::Scalar(Scalar::Bool(*value)),
            Value::Number(number) => ValueKind::Scalar(number_scalar(number)),
            Value::String(text) => ValueKind::Str(text),
            Value::Array(_) => ValueKind::Collection(self),
            Value::Object(_) => ValueKind::Map(self),
        }
    }
}

impl CapturedCollection for Value {
    fn size(&self) -> Result<usize, AlienError> {
        match self {
            Value::Array(values) => Ok(values.len()),
            _ => Err(AlienError::new("not a JSON array")),
        }
    }

    fn elements(&self) -> Result<Elements<'_>, AlienError> {
        match self {
            Value::Array(values) => Ok(Box::new(values.iter().map(borrowed))),
            _ => Err(AlienError::new("not a JSON array")),
        }
    }
}

impl CapturedMap for Value {
    fn size(&self) -> Result<usize, AlienError> {
        match self {
            Value::Object(map) => Ok(map.len()),
            _ => Err(AlienError::new("not a JSON object")),
        }
    }

    fn entries(&self) -> Result<Entries<'_>, AlienError> {
        match self {
            Value::Object(map) => CapturedMap::entries(map),
            _ => Err(AlienError::new("not a JSON object")),
        }
    }
}

impl Captured for Map<String, Value> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Map(self)
    }
}

impl CapturedMap for Map<String, Value> {
    fn size(&self) -> Result<usize, AlienError> {
        Ok(self.len())
    }

    fn entries(&self) -> Result<Entries<'_>, AlienError> {
        Ok(Box::new(self.iter().map(borrowed_entry)))
    }
}
