//! JSON snapshot encoder.

use serde_json::{Map, Value};

use crate::{
    capture::{NotCapturedReason, Scalar, TokenWriter},
    wire,
};

/// Errors produced by [`JsonTokenWriter`].
#[derive(Debug, thiserror::Error)]
pub enum JsonWriteError {
    /// An event arrived where the document structure does not allow it.
    #[error("unbalanced event `{0}`")]
    Unbalanced(&'static str),
    /// The document was taken before its root value was closed.
    #[error("snapshot document is incomplete")]
    Incomplete,
    #[error("failed to encode snapshot document")]
    Encode(#[from] serde_json::Error),
}

enum Frame {
    /// A value object: `{"type": ..., ...}`.
    Value(Map<String, Value>),
    /// Array or collection elements.
    Elements(Vec<Value>),
    /// Map entries, each a `[key, value]` pair.
    Entries(Vec<Value>),
    /// One map entry being filled.
    Entry(Vec<Value>),
    /// Object fields, with the name of the field whose value comes next.
    Fields {
        fields: Map<String, Value>,
        pending: Option<String>,
    },
}

/// Builds the JSON snapshot shape as a [`serde_json::Value`].
///
/// One writer holds one root value. Key order follows event order.
#[derive(Default)]
pub struct JsonTokenWriter {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl JsonTokenWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the finished root value.
    pub fn into_value(self) -> Result<Value, JsonWriteError> {
        if !self.stack.is_empty() {
            return Err(JsonWriteError::Incomplete);
        }
        self.root.ok_or(JsonWriteError::Incomplete)
    }

    /// Returns the finished root value encoded as compact JSON text.
    pub fn into_string(self) -> Result<String, JsonWriteError> {
        let value = self.into_value()?;
        Ok(serde_json::to_string(&value)?)
    }

    fn current(&mut self, event: &'static str) -> Result<&mut Map<String, Value>, JsonWriteError> {
        match self.stack.last_mut() {
            Some(Frame::Value(map)) => Ok(map),
            _ => Err(JsonWriteError::Unbalanced(event)),
        }
    }

    fn attach(&mut self, value: Value) -> Result<(), JsonWriteError> {
        match self.stack.last_mut() {
            None if self.root.is_none() => {
                self.root = Some(value);
                Ok(())
            }
            Some(Frame::Elements(values) | Frame::Entry(values)) => {
                values.push(value);
                Ok(())
            }
            Some(Frame::Fields { fields, pending }) => {
                let name = pending.take().ok_or(JsonWriteError::Unbalanced("epilogue"))?;
                fields.insert(name, value);
                Ok(())
            }
            _ => Err(JsonWriteError::Unbalanced("epilogue")),
        }
    }

    fn close_elements(
        &mut self,
        key: &str,
        event: &'static str,
        is_complete: bool,
        size: usize,
    ) -> Result<(), JsonWriteError> {
        let values = match self.stack.pop() {
            Some(Frame::Elements(values) | Frame::Entries(values)) => values,
            _ => return Err(JsonWriteError::Unbalanced(event)),
        };
        let map = self.current(event)?;
        map.insert(key.to_string(), Value::Array(values));
        if !is_complete {
            map.insert(
                wire::NOT_CAPTURED_REASON.to_string(),
                Value::from(wire::COLLECTION_SIZE_REASON),
            );
        }
        map.insert(wire::SIZE.to_string(), Value::from(size.to_string()));
        Ok(())
    }
}

impl TokenWriter for JsonTokenWriter {
    type Error = JsonWriteError;

    fn prologue(&mut self, type_name: &str) -> Result<(), Self::Error> {
        let mut map = Map::new();
        map.insert(wire::TYPE.to_string(), Value::from(type_name));
        self.stack.push(Frame::Value(map));
        Ok(())
    }

    fn epilogue(&mut self) -> Result<(), Self::Error> {
        match self.stack.pop() {
            Some(Frame::Value(map)) => self.attach(Value::Object(map)),
            _ => Err(JsonWriteError::Unbalanced("epilogue")),
        }
    }

    fn null_value(&mut self) -> Result<(), Self::Error> {
        self.current("null_value")?
            .insert(wire::IS_NULL.to_string(), Value::Bool(true));
        Ok(())
    }

    fn string(
        &mut self,
        value: &str,
        is_complete: bool,
        original_length: usize,
    ) -> Result<(), Self::Error> {
        let map = self.current("string")?;
        map.insert(wire::VALUE.to_string(), Value::from(value));
        if !is_complete {
            map.insert(wire::TRUNCATED.to_string(), Value::Bool(true));
            map.insert(wire::SIZE.to_string(), Value::from(original_length.to_string()));
        }
        Ok(())
    }

    fn primitive_value(&mut self, value: &Scalar<'_>) -> Result<(), Self::Error> {
        self.current("primitive_value")?
            .insert(wire::VALUE.to_string(), Value::from(value.to_string()));
        Ok(())
    }

    fn array_prologue(&mut self) -> Result<(), Self::Error> {
        self.current("array_prologue")?;
        self.stack.push(Frame::Elements(Vec::new()));
        Ok(())
    }

    fn array_epilogue(&mut self, is_complete: bool, size: usize) -> Result<(), Self::Error> {
        self.close_elements(wire::ELEMENTS, "array_epilogue", is_complete, size)
    }

    fn primitive_array_element(
        &mut self,
        value: &Scalar<'_>,
        type_name: &str,
    ) -> Result<(), Self::Error> {
        let Some(Frame::Elements(values)) = self.stack.last_mut() else {
            return Err(JsonWriteError::Unbalanced("primitive_array_element"));
        };
        let mut element = Map::new();
        element.insert(wire::TYPE.to_string(), Value::from(type_name));
        element.insert(wire::VALUE.to_string(), Value::from(value.to_string()));
        values.push(Value::Object(element));
        Ok(())
    }

    fn collection_prologue(&mut self) -> Result<(), Self::Error> {
        self.current("collection_prologue")?;
        self.stack.push(Frame::Elements(Vec::new()));
        Ok(())
    }

    fn collection_epilogue(&mut self, is_complete: bool, size: usize) -> Result<(), Self::Error> {
        self.close_elements(wire::ELEMENTS, "collection_epilogue", is_complete, size)
    }

    fn map_prologue(&mut self) -> Result<(), Self::Error> {
        self.current("map_prologue")?;
        self.stack.push(Frame::Entries(Vec::new()));
        Ok(())
    }

    fn map_entry_prologue(&mut self) -> Result<(), Self::Error> {
        if !matches!(self.stack.last(), Some(Frame::Entries(_))) {
            return Err(JsonWriteError::Unbalanced("map_entry_prologue"));
        }
        self.stack.push(Frame::Entry(Vec::with_capacity(2)));
        Ok(())
    }

    fn map_entry_epilogue(&mut self) -> Result<(), Self::Error> {
        let Some(Frame::Entry(entry)) = self.stack.pop() else {
            return Err(JsonWriteError::Unbalanced("map_entry_epilogue"));
        };
        match self.stack.last_mut() {
            Some(Frame::Entries(entries)) => {
                entries.push(Value::Array(entry));
                Ok(())
            }
            _ => Err(JsonWriteError::Unbalanced("map_entry_epilogue")),
        }
    }

    fn map_epilogue(&mut self, is_complete: bool, size: usize) -> Result<(), Self::Error> {
        self.close_elements(wire::ENTRIES, "map_epilogue", is_complete, size)
    }

    fn object_prologue(&mut self) -> Result<(), Self::Error> {
        self.current("object_prologue")?;
        self.stack.push(Frame::Fields {
            fields: Map::new(),
            pending: None,
        });
        Ok(())
    }

    fn object_field_prologue(
        &mut self,
        name: &str,
        _remaining_depth: usize,
    ) -> Result<(), Self::Error> {
        match self.stack.last_mut() {
            Some(Frame::Fields { pending, .. }) => {
                *pending = Some(name.to_string());
                Ok(())
            }
            _ => Err(JsonWriteError::Unbalanced("object_field_prologue")),
        }
    }

    fn field_not_captured(
        &mut self,
        name: &str,
        declared_type: &str,
        reason: &NotCapturedReason,
    ) -> Result<(), Self::Error> {
        let Some(Frame::Fields { fields, .. }) = self.stack.last_mut() else {
            return Err(JsonWriteError::Unbalanced("field_not_captured"));
        };
        let mut value = Map::new();
        value.insert(wire::TYPE.to_string(), Value::from(declared_type));
        value.insert(
            wire::NOT_CAPTURED_REASON.to_string(),
            Value::from(reason.as_str()),
        );
        fields.insert(name.to_string(), Value::Object(value));
        Ok(())
    }

    fn object_epilogue(&mut self) -> Result<(), Self::Error> {
        let Some(Frame::Fields { fields, .. }) = self.stack.pop() else {
            return Err(JsonWriteError::Unbalanced("object_epilogue"));
        };
        self.current("object_epilogue")?
            .insert(wire::FIELDS.to_string(), Value::Object(fields));
        Ok(())
    }

    fn not_captured(&mut self, reason: &NotCapturedReason) -> Result<(), Self::Error> {
        self.current("not_captured")?.insert(
            wire::NOT_CAPTURED_REASON.to_string(),
            Value::from(reason.as_str()),
        );
        Ok(())
    }
}
