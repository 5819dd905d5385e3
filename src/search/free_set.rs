//! Dynamic subset of cell indices with O(1) random draw.
//!
//! All indices in `[0, capacity)` live in one dense array. The first `len`
//! slots are the members; the rest are the complement. A reverse index maps
//! each value to its slot, so membership, insertion, and removal are a
//! comparison and a swap with the boundary slot.

use super::rng::FastRng;

/// Swap-based set over `[0, capacity)`.
#[derive(Debug, Clone)]
pub struct FreeSet {
    len: usize,
    values: Vec<usize>,
    slots: Vec<usize>,
}

impl FreeSet {
    /// Creates an empty set able to hold values in `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        FreeSet {
            len: 0,
            values: (0..capacity).collect(),
            slots: (0..capacity).collect(),
        }
    }

    /// Largest value the set can hold, plus one.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.slots[v] < self.len
    }

    /// Adds `v`; no-op if already present.
    #[inline]
    pub fn insert(&mut self, v: usize) {
        let i = self.slots[v];
        if i < self.len {
            return;
        }
        self.swap_slots(i, self.len);
        self.len += 1;
    }

    /// Removes `v`; no-op if absent.
    #[inline]
    pub fn remove(&mut self, v: usize) {
        let i = self.slots[v];
        if i >= self.len {
            return;
        }
        self.len -= 1;
        self.swap_slots(i, self.len);
    }

    /// Member at slot `i`, for `i < len()`.
    #[inline]
    pub fn get(&self, i: usize) -> usize {
        debug_assert!(i < self.len);
        self.values[i]
    }

    /// Uniformly random member, or `None` when empty.
    #[inline]
    pub fn random(&self, rng: &mut FastRng) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.get(rng.next(self.len)))
        }
    }

    /// Iterates over current members in slot order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.values[..self.len].iter().copied()
    }

    fn swap_slots(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
        self.slots[self.values[i]] = i;
        self.slots[self.values[j]] = j;
    }
}
