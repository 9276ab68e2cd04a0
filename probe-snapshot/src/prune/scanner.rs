//! Structural scan of an encoded snapshot.
//!
//! Recognizes only `{`, `}` and string boundaries; everything else is opaque.

use crate::wire;

/// One `{...}` span of the document.
#[derive(Debug)]
pub(super) struct Node {
    pub(super) start: usize,
    /// Offset of the closing `}`; `None` while unclosed.
    pub(super) end: Option<usize>,
    /// Nesting depth, the outermost object being level 0.
    pub(super) level: usize,
    pub(super) parent: Option<usize>,
    pub(super) children: Vec<usize>,
    pub(super) not_captured: bool,
    pub(super) not_captured_depth: bool,
    pub(super) pruned_children: usize,
}

impl Node {
    /// Byte length of the span, both braces included.
    pub(super) fn span(&self) -> usize {
        self.end.map_or(0, |end| end - self.start + 1)
    }

    pub(super) const fn is_closed(&self) -> bool {
        self.end.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Object,
    String,
    Escape,
}

/// Single-pass scanner building the node arena for one document.
///
/// Nodes are stored in order of their opening brace.
pub(super) struct Scanner<'a> {
    bytes: &'a [u8],
    nodes: Vec<Node>,
    open: Vec<usize>,
    state: State,
    string_start: usize,
    /// Node whose next string is checked against the depth sentinel.
    armed: Option<usize>,
}

impl<'a> Scanner<'a> {
    pub(super) fn new(document: &'a str) -> Self {
        Self {
            bytes: document.as_bytes(),
            nodes: Vec::new(),
            open: Vec::new(),
            state: State::Object,
            string_start: 0,
            armed: None,
        }
    }

    pub(super) fn scan(mut self) -> Vec<Node> {
        for (offset, &byte) in self.bytes.iter().enumerate() {
            match self.state {
                State::Object => self.object_byte(offset, byte),
                State::String => match byte {
                    b'\\' => self.state = State::Escape,
                    b'"' => {
                        self.state = State::Object;
                        self.string_closed(offset);
                    }
                    _ => {}
                },
                State::Escape => self.state = State::String,
            }
        }
        self.nodes
    }

    fn object_byte(&mut self, offset: usize, byte: u8) {
        match byte {
            b'"' => {
                self.state = State::String;
                self.string_start = offset + 1;
            }
            b':' => {}
            b'{' => {
                self.armed = None;
                let index = self.nodes.len();
                let parent = self.open.last().copied();
                if let Some(parent) = parent {
                    self.nodes[parent].children.push(index);
                }
                self.nodes.push(Node {
                    start: offset,
                    end: None,
                    level: self.open.len(),
                    parent,
                    children: Vec::new(),
                    not_captured: false,
                    not_captured_depth: false,
                    pruned_children: 0,
                });
                self.open.push(index);
            }
            b'}' => {
                self.armed = None;
                // stray closing braces are ignored
                if let Some(index) = self.open.pop() {
                    self.nodes[index].end = Some(offset);
                }
            }
            byte if byte.is_ascii_whitespace() => {}
            _ => self.armed = None,
        }
    }

    fn string_closed(&mut self, offset: usize) {
        let content = &self.bytes[self.string_start..offset];
        if let Some(node) = self.armed.take() {
            if content == wire::DEPTH_REASON.as_bytes() {
                self.nodes[node].not_captured_depth = true;
            }
            return;
        }
        if content == wire::NOT_CAPTURED_REASON.as_bytes() {
            if let Some(&node) = self.open.last() {
                self.nodes[node].not_captured = true;
                self.armed = Some(node);
            }
        }
    }
}
