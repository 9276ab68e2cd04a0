//! Byte-budget pruning of encoded snapshots.
//!
//! The pruner does not parse JSON. It scans object spans, then greedily
//! replaces the least valuable ones with [`PRUNED_PLACEHOLDER`] until the
//! document fits. Objects already truncated for depth go first, then shallow
//! objects, then objects carrying any `notCapturedReason`, then large ones.
//! Once every child of an object has been removed, the object itself becomes
//! a candidate and replaces its children with a single placeholder.

use std::{borrow::Cow, cmp::Reverse, collections::BinaryHeap};

use crate::wire::PRUNED_PLACEHOLDER;

mod scanner;

use scanner::{Node, Scanner};

/// Queue ordering; the greatest candidate is removed first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    not_captured_depth: bool,
    level: Reverse<usize>,
    not_captured: bool,
    span: usize,
    start: Reverse<usize>,
    index: usize,
}

impl Candidate {
    fn of(index: usize, node: &Node) -> Self {
        Self {
            not_captured_depth: node.not_captured_depth,
            level: Reverse(node.level),
            not_captured: node.not_captured,
            span: node.span(),
            start: Reverse(node.start),
            index,
        }
    }
}

/// Shrinks `document` toward `max_size` bytes.
///
/// Objects nested shallower than `min_level` are never replaced. Returns the
/// input untouched when it already fits; otherwise the result is never longer
/// than the input, but may still exceed `max_size` when nothing else can be
/// removed.
///
/// ```rust
/// let document = r#"{"a":{"notCapturedReason":"depth"},"b":{"c":1,"d":2}}"#;
/// let pruned = probe_snapshot::prune(document, document.len() - 10, 1);
/// assert_eq!(pruned, r#"{"a":{"pruned":true},"b":{"c":1,"d":2}}"#);
/// ```
pub fn prune(document: &str, max_size: usize, min_level: usize) -> Cow<'_, str> {
    if document.len() <= max_size {
        return Cow::Borrowed(document);
    }
    let delta = document.len() - max_size;
    let mut nodes = Scanner::new(document).scan();
    let selected = select(&mut nodes, delta, min_level);
    if selected.is_empty() {
        tracing::debug!(
            size = document.len(),
            max_size,
            "snapshot over budget but nothing could be pruned"
        );
        return Cow::Borrowed(document);
    }

    let mut pruned = String::with_capacity(document.len());
    let mut cursor = 0;
    for index in selected {
        let node = &nodes[index];
        let Some(end) = node.end else {
            continue;
        };
        pruned.push_str(&document[cursor..node.start]);
        pruned.push_str(PRUNED_PLACEHOLDER);
        cursor = end + 1;
    }
    pruned.push_str(&document[cursor..]);

    tracing::debug!(
        size = document.len(),
        max_size,
        pruned_size = pruned.len(),
        "pruned snapshot"
    );
    Cow::Owned(pruned)
}

/// Runs the removal queue; returns selected node indices in document order.
fn select(nodes: &mut [Node], delta: usize, min_level: usize) -> Vec<usize> {
    let mut queue: BinaryHeap<Candidate> = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_closed() && node.children.is_empty() && node.level >= min_level)
        .map(|(index, node)| Candidate::of(index, node))
        .collect();

    // bytes saved by each currently selected node
    let mut savings = vec![0; nodes.len()];
    let mut selected = vec![false; nodes.len()];
    let mut saved = 0;

    while saved < delta {
        let Some(candidate) = queue.pop() else {
            break;
        };
        let index = candidate.index;
        // spans no larger than the placeholder stay in place
        let gain = nodes[index].span().saturating_sub(PRUNED_PLACEHOLDER.len());
        if gain > 0 {
            selected[index] = true;
            savings[index] = gain;
            saved += gain;
        }
        if saved >= delta {
            break;
        }

        let Some(parent) = nodes[index].parent else {
            continue;
        };
        nodes[parent].pruned_children += 1;
        let node = &nodes[parent];
        if node.is_closed()
            && node.level >= min_level
            && node.pruned_children == node.children.len()
        {
            for &child in &node.children {
                saved -= savings[child];
                savings[child] = 0;
                selected[child] = false;
            }
            let node = &mut nodes[parent];
            node.not_captured = true;
            node.not_captured_depth = true;
            queue.push(Candidate::of(parent, node));
        }
    }

    selected
        .iter()
        .enumerate()
        .filter_map(|(index, &selected)| selected.then_some(index))
        .collect()
}
