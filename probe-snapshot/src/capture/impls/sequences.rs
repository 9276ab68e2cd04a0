//! Slices, arrays and the std sequence collections.

use std::collections::{BTreeSet, BinaryHeap, HashSet, LinkedList, VecDeque};

use super::{as_captured, borrowed};
use crate::capture::traits::{
    AlienError, Captured, CapturedArray, CapturedCollection, Elements, ValueKind,
};

// =============================================================================
// Slices and fixed-size arrays
// =============================================================================

/// Array view over a borrowed slice.
struct SliceArray<'a, T>(&'a [T]);

impl<T: Captured> CapturedArray for SliceArray<'_, T> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn element(&self, index: usize) -> Option<&dyn Captured> {
        self.0.get(index).map(as_captured)
    }
}

impl<T: Captured> Captured for [T] {
    fn kind(&self) -> ValueKind<'_> {
        match T::primitive_slice(self) {
            Some(array) => ValueKind::PrimitiveArray(array),
            None => ValueKind::Array(Box::new(SliceArray(self))),
        }
    }
}

impl<T: Captured, const N: usize> Captured for [T; N] {
    fn kind(&self) -> ValueKind<'_> {
        self.as_slice().kind()
    }
}

// =============================================================================
// Collections
// =============================================================================

macro_rules! impl_captured_collection {
    ($($ty:ident<T $(, $param:ident)*>),* $(,)?) => {
        $(
            impl<T: Captured $(, $param)*> Captured for $ty<T $(, $param)*> {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Collection(self)
                }
            }

            impl<T: Captured $(, $param)*> CapturedCollection for $ty<T $(, $param)*> {
                fn size(&self) -> Result<usize, AlienError> {
                    Ok(self.len())
                }

                fn elements(&self) -> Result<Elements<'_>, AlienError> {
                    Ok(Box::new(self.iter().map(borrowed)))
                }
            }
        )*
    };
}

impl_captured_collection! {
    Vec<T>,
    VecDeque<T>,
    LinkedList<T>,
    BinaryHeap<T>,
    BTreeSet<T>,
    HashSet<T, S>,
}
