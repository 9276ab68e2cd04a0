use std::{collections::BTreeMap, marker::PhantomData};

use probe_snapshot::{Capture, Captured};

struct Opaque;

#[derive(Capture)]
struct Envelope<'a, T, K: Ord, M> {
    payload: T,
    headers: BTreeMap<K, &'a str>,
    marker: PhantomData<M>,
}

fn assert_captured<T: Captured>(_: &T) {}

fn main() {
    let envelope: Envelope<'_, Vec<u8>, String, Opaque> = Envelope {
        payload: vec![1, 2],
        headers: BTreeMap::new(),
        marker: PhantomData,
    };
    assert_captured(&envelope);
}
