//! Compact human-readable encoder.

use std::convert::Infallible;

use crate::capture::{NotCapturedReason, Scalar, TokenWriter};

enum Frame {
    Value { wrote: bool },
    /// Elements or map entries.
    Seq { first: bool },
    /// A map entry; counts the values seen so far.
    Entry { parts: u8 },
    Fields { first: bool },
}

/// Renders captured values as short text for log lines.
///
/// ```rust
/// use probe_snapshot::{BoundedSerializer, Limits, TextTokenWriter};
///
/// let mut writer = TextTokenWriter::new();
/// BoundedSerializer::new(&mut writer)
///     .serialize(&vec![1, 2, 3], "alloc::vec::Vec<i32>", &Limits::new(3, 2, 255, 20))
///     .unwrap();
/// assert_eq!(writer.as_str(), "[1, 2, ...]");
/// ```
#[derive(Default)]
pub struct TextTokenWriter {
    out: String,
    stack: Vec<Frame>,
}

impl TextTokenWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn separate(&mut self) {
        if let Some(Frame::Seq { first } | Frame::Fields { first }) = self.stack.last_mut() {
            if !*first {
                self.out.push_str(", ");
            }
            *first = false;
        }
    }

    fn mark(&mut self) {
        if let Some(Frame::Value { wrote }) = self.stack.last_mut() {
            *wrote = true;
        }
    }

    fn open(&mut self, bracket: char, frame: Frame) {
        self.mark();
        self.out.push(bracket);
        self.stack.push(frame);
    }

    fn close(&mut self, bracket: char, is_complete: bool) {
        let first = match self.stack.pop() {
            Some(Frame::Seq { first } | Frame::Fields { first }) => first,
            _ => true,
        };
        if !is_complete {
            self.out.push_str(if first { "..." } else { ", ..." });
        }
        self.out.push(bracket);
    }

    fn push_reason(&mut self, reason: &NotCapturedReason) {
        match reason {
            NotCapturedReason::MaxDepth => self.out.push_str("..."),
            other => {
                self.out.push('<');
                self.out.push_str(other.as_str());
                self.out.push('>');
            }
        }
    }
}

impl TokenWriter for TextTokenWriter {
    type Error = Infallible;

    fn prologue(&mut self, _type_name: &str) -> Result<(), Self::Error> {
        match self.stack.last_mut() {
            Some(Frame::Entry { parts }) => {
                if *parts == 1 {
                    self.out.push('=');
                }
                *parts += 1;
            }
            Some(Frame::Seq { .. }) => self.separate(),
            _ => {}
        }
        self.stack.push(Frame::Value { wrote: false });
        Ok(())
    }

    fn epilogue(&mut self) -> Result<(), Self::Error> {
        self.stack.pop();
        Ok(())
    }

    fn null_value(&mut self) -> Result<(), Self::Error> {
        self.mark();
        self.out.push_str("null");
        Ok(())
    }

    fn string(
        &mut self,
        value: &str,
        is_complete: bool,
        _original_length: usize,
    ) -> Result<(), Self::Error> {
        self.mark();
        self.out.push_str(value);
        if !is_complete {
            self.out.push_str("...");
        }
        Ok(())
    }

    fn primitive_value(&mut self, value: &Scalar<'_>) -> Result<(), Self::Error> {
        self.mark();
        self.out.push_str(&value.to_string());
        Ok(())
    }

    fn array_prologue(&mut self) -> Result<(), Self::Error> {
        self.open('[', Frame::Seq { first: true });
        Ok(())
    }

    fn array_epilogue(&mut self, is_complete: bool, _size: usize) -> Result<(), Self::Error> {
        self.close(']', is_complete);
        Ok(())
    }

    fn primitive_array_element(
        &mut self,
        value: &Scalar<'_>,
        _type_name: &str,
    ) -> Result<(), Self::Error> {
        self.separate();
        self.out.push_str(&value.to_string());
        Ok(())
    }

    fn collection_prologue(&mut self) -> Result<(), Self::Error> {
        self.open('[', Frame::Seq { first: true });
        Ok(())
    }

    fn collection_epilogue(&mut self, is_complete: bool, _size: usize) -> Result<(), Self::Error> {
        self.close(']', is_complete);
        Ok(())
    }

    fn map_prologue(&mut self) -> Result<(), Self::Error> {
        self.open('{', Frame::Seq { first: true });
        Ok(())
    }

    fn map_entry_prologue(&mut self) -> Result<(), Self::Error> {
        self.separate();
        self.stack.push(Frame::Entry { parts: 0 });
        Ok(())
    }

    fn map_entry_epilogue(&mut self) -> Result<(), Self::Error> {
        self.stack.pop();
        Ok(())
    }

    fn map_epilogue(&mut self, is_complete: bool, _size: usize) -> Result<(), Self::Error> {
        self.close('}', is_complete);
        Ok(())
    }

    fn object_prologue(&mut self) -> Result<(), Self::Error> {
        self.open('{', Frame::Fields { first: true });
        Ok(())
    }

    fn object_field_prologue(
        &mut self,
        name: &str,
        _remaining_depth: usize,
    ) -> Result<(), Self::Error> {
        self.separate();
        self.out.push_str(name);
        self.out.push('=');
        Ok(())
    }

    fn field_not_captured(
        &mut self,
        name: &str,
        _declared_type: &str,
        reason: &NotCapturedReason,
    ) -> Result<(), Self::Error> {
        self.separate();
        self.out.push_str(name);
        self.out.push('=');
        self.push_reason(reason);
        Ok(())
    }

    fn object_epilogue(&mut self) -> Result<(), Self::Error> {
        self.close('}', true);
        Ok(())
    }

    fn not_captured(&mut self, reason: &NotCapturedReason) -> Result<(), Self::Error> {
        if let Some(Frame::Value { wrote }) = self.stack.last_mut() {
            if *wrote {
                self.out.push(' ');
            }
            *wrote = true;
        }
        self.push_reason(reason);
        Ok(())
    }
}
