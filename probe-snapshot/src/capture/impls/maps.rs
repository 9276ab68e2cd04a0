//! `HashMap` and `BTreeMap`.

use std::collections::{BTreeMap, HashMap};

use super::borrowed_entry;
use crate::capture::traits::{AlienError, Captured, CapturedMap, Entries, ValueKind};

impl<K: Captured, V: Captured, S> Captured for HashMap<K, V, S> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Map(self)
    }
}

impl<K: Captured, V: Captured, S> CapturedMap for HashMap<K, V, S> {
    fn size(&self) -> Result<usize, AlienError> {
        Ok(self.len())
    }

    fn entries(&self) -> Result<Entries<'_>, AlienError> {
        Ok(Box::new(self.iter().map(borrowed_entry)))
    }
}

impl<K: Captured, V: Captured> Captured for BTreeMap<K, V> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Map(self)
    }
}

impl<K: Captured, V: Captured> CapturedMap for BTreeMap<K, V> {
    fn size(&self) -> Result<usize, AlienError> {
        Ok(self.len())
    }

    fn entries(&self) -> Result<Entries<'_>, AlienError> {
        Ok(Box::new(self.iter().map(borrowed_entry)))
    }
}
