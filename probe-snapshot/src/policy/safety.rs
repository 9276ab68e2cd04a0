//! Which containers may be iterated.
//!
//! Iterating a collection runs the container's own code. Only containers whose
//! iteration is known to be side-effect free are walked element by element;
//! every other container is captured through its reflected fields instead.

use std::{
    any::type_name,
    collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque},
    sync::LazyLock,
};

/// Decides whether a collection or map type may be iterated.
pub trait ContainerSafety {
    fn is_safe_collection(&self, type_name: &str) -> bool;

    fn is_safe_map(&self, type_name: &str) -> bool;
}

impl<S: ContainerSafety + ?Sized> ContainerSafety for &S {
    fn is_safe_collection(&self, type_name: &str) -> bool {
        (**self).is_safe_collection(type_name)
    }

    fn is_safe_map(&self, type_name: &str) -> bool {
        (**self).is_safe_map(type_name)
    }
}

static SAFE_COLLECTIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut names = vec![
        base_type_name(type_name::<Vec<()>>()),
        base_type_name(type_name::<VecDeque<()>>()),
        base_type_name(type_name::<LinkedList<()>>()),
        base_type_name(type_name::<BinaryHeap<()>>()),
        base_type_name(type_name::<BTreeSet<()>>()),
        base_type_name(type_name::<HashSet<()>>()),
    ];
    #[cfg(feature = "json")]
    names.push(type_name::<serde_json::Value>());
    names
});

static SAFE_MAPS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut names = vec![
        base_type_name(type_name::<BTreeMap<(), ()>>()),
        base_type_name(type_name::<HashMap<(), ()>>()),
    ];
    #[cfg(feature = "json")]
    names.extend([
        base_type_name(type_name::<serde_json::Map<String, serde_json::Value>>()),
        type_name::<serde_json::Value>(),
    ]);
    names
});

/// Allows the std collections and maps plus `serde_json` containers.
///
/// Types are matched on their base name, so `alloc::vec::Vec<app::User>` is
/// safe regardless of its element type.
#[derive(Clone, Copy, Debug, Default)]
pub struct WellKnownTypes;

impl ContainerSafety for WellKnownTypes {
    fn is_safe_collection(&self, type_name: &str) -> bool {
        SAFE_COLLECTIONS.contains(&base_type_name(type_name))
    }

    fn is_safe_map(&self, type_name: &str) -> bool {
        SAFE_MAPS.contains(&base_type_name(type_name))
    }
}

/// Strips generic arguments: `alloc::vec::Vec<i32>` becomes `alloc::vec::Vec`.
pub fn base_type_name(type_name: &str) -> &str {
    match type_name.find('<') {
        Some(index) => &type_name[..index],
        None => type_name,
    }
}
