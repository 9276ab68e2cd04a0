//! Capture budgets.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Default number of reference hops followed from the captured root.
pub const DEFAULT_REFERENCE_DEPTH: usize = 3;
/// Default number of elements emitted per array, collection or map.
pub const DEFAULT_COLLECTION_SIZE: usize = 100;
/// Default number of characters kept per string.
pub const DEFAULT_LENGTH: usize = 255;
/// Default number of fields emitted per object, across its whole hierarchy.
pub const DEFAULT_FIELD_COUNT: usize = 20;

/// The four independent budgets bounding one serialization call.
///
/// `Limits` is immutable: descending one reference hop produces a new value
/// through [`Limits::dec_depth`], which only touches `max_reference_depth`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "json",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Limits {
    /// Remaining reference hops. At zero, composites and objects are not
    /// descended into.
    pub max_reference_depth: usize,
    /// Maximum number of elements emitted per array, collection or map.
    pub max_collection_size: usize,
    /// Maximum number of characters emitted per string.
    pub max_length: usize,
    /// Maximum number of fields emitted per object.
    pub max_field_count: usize,
}

impl Limits {
    #[must_use]
    pub const fn new(
        max_reference_depth: usize,
        max_collection_size: usize,
        max_length: usize,
        max_field_count: usize,
    ) -> Self {
        Self {
            max_reference_depth,
            max_collection_size,
            max_length,
            max_field_count,
        }
    }

    /// Returns a copy with one reference hop consumed.
    #[must_use]
    pub const fn dec_depth(&self) -> Self {
        Self {
            max_reference_depth: self.max_reference_depth.saturating_sub(1),
            ..*self
        }
    }

    /// Whether composites and objects may still be descended into.
    pub const fn can_descend(&self) -> bool {
        self.max_reference_depth > 0
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(
            DEFAULT_REFERENCE_DEPTH,
            DEFAULT_COLLECTION_SIZE,
            DEFAULT_LENGTH,
            DEFAULT_FIELD_COUNT,
        )
    }
}
