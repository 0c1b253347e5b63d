use bit_set::BitSet;
use fnv::FnvHasher;
use std::{
    collections::HashSet,
    hash::{BuildHasherDefault, Hash}
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;

/// Hash set with room for `capacity` items using the fnv hasher, which is quick on
/// the small integer keys grid coordinates are made of.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    HashSet::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}

/// Cleared bit per grid cell, keyed by row-major index.
pub fn cell_bitset(cells_count: usize) -> BitSet {
    BitSet::with_capacity(cells_count)
}
