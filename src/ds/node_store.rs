//! Parallel slot buffers (payload, next, prev) and the capacity grower.
//!
//! Slots `[0, len)` are always occupied; there is no free list. Removal
//! relocates the highest occupied slot into the hole (`swap_remove`), which
//! keeps the occupied prefix dense.
//!
//! ```text
//!   index:   0      1      2      3      (capacity 4, len 3)
//!   values: [A]    [B]    [C]    [ ]
//!   next:   [1]    [2]    [NIL]  [ ]
//!   prev:   [NIL]  [0]    [1]    [ ]
//! ```
//!
//! Growth policy: when room is needed for `k` more slots, the store grows to
//! `max(2 * len, len + k)` (never below [`MIN_CAPACITY`]) and never shrinks.

use tracing::debug;

use crate::error::ListError;

/// Link sentinel meaning "no node".
pub(crate) const NIL: u32 = u32::MAX;

/// Largest slot count addressable by `u32` links (`NIL` is reserved).
pub const MAX_SLOTS: usize = NIL as usize;

/// Smallest capacity a store is ever created with.
pub const MIN_CAPACITY: usize = 4;

#[derive(Debug)]
pub(crate) struct NodeStore<T> {
    values: Vec<T>,
    next: Vec<u32>,
    prev: Vec<u32>,
    capacity: usize,
}

impl<T> NodeStore<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(MIN_CAPACITY, MAX_SLOTS);
        Self {
            values: Vec::with_capacity(capacity),
            next: Vec::with_capacity(capacity),
            prev: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, ListError> {
        let mut store = Self {
            values: Vec::new(),
            next: Vec::new(),
            prev: Vec::new(),
            capacity: 0,
        };
        store.grow_to(capacity.max(MIN_CAPACITY))?;
        Ok(store)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capacity the growth policy picks when `additional` slots must fit.
    pub(crate) fn growth_target(&self, additional: usize) -> usize {
        let len = self.len();
        (len.saturating_mul(2))
            .max(len.saturating_add(additional))
            .max(MIN_CAPACITY)
    }

    /// Grows (never shrinks) so that `additional` more slots fit.
    pub(crate) fn ensure_room(&mut self, additional: usize) -> Result<(), ListError> {
        if self.len().saturating_add(additional) <= self.capacity {
            return Ok(());
        }
        self.grow_to(self.growth_target(additional))
    }

    /// Reallocates all three buffers to hold `new_capacity` slots.
    ///
    /// A request at or below the current capacity is a no-op. Either all three
    /// buffers grow or the logical capacity is left unchanged.
    pub(crate) fn grow_to(&mut self, new_capacity: usize) -> Result<(), ListError> {
        if new_capacity <= self.capacity {
            return Ok(());
        }
        let failure = ListError::AllocationFailure {
            requested: new_capacity,
        };
        if new_capacity > MAX_SLOTS {
            return Err(failure);
        }
        let additional = new_capacity - self.len();
        self.values
            .try_reserve_exact(additional)
            .map_err(|_| failure.clone())?;
        self.next
            .try_reserve_exact(additional)
            .map_err(|_| failure.clone())?;
        self.prev
            .try_reserve_exact(additional)
            .map_err(|_| failure)?;

        debug!(
            len = self.len(),
            old_capacity = self.capacity,
            new_capacity,
            "grew node store"
        );
        self.capacity = new_capacity;
        Ok(())
    }

    /// Appends a slot; the caller has already ensured room.
    pub(crate) fn push(&mut self, value: T, prev: u32, next: u32) -> u32 {
        debug_assert!(self.len() < self.capacity);
        let index = self.len() as u32;
        self.values.push(value);
        self.prev.push(prev);
        self.next.push(next);
        index
    }

    #[inline]
    pub(crate) fn value(&self, index: u32) -> &T {
        &self.values[index as usize]
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, index: u32) -> &mut T {
        &mut self.values[index as usize]
    }

    #[inline]
    pub(crate) fn next(&self, index: u32) -> u32 {
        self.next[index as usize]
    }

    #[inline]
    pub(crate) fn prev(&self, index: u32) -> u32 {
        self.prev[index as usize]
    }

    #[inline]
    pub(crate) fn set_next(&mut self, index: u32, next: u32) {
        self.next[index as usize] = next;
    }

    #[inline]
    pub(crate) fn set_prev(&mut self, index: u32, prev: u32) {
        self.prev[index as usize] = prev;
    }

    /// Removes slot `index`, moving the highest occupied slot into it.
    ///
    /// Links of the moved slot travel with it; fixing its neighbours is the
    /// caller's job.
    pub(crate) fn swap_remove(&mut self, index: u32) -> T {
        let index = index as usize;
        self.next.swap_remove(index);
        self.prev.swap_remove(index);
        self.values.swap_remove(index)
    }

    #[inline]
    pub(crate) fn swap_values(&mut self, a: u32, b: u32) {
        self.values.swap(a as usize, b as usize);
    }

    /// Rewrites every link so physical order is the chain order.
    pub(crate) fn relink_sequential(&mut self) {
        let len = self.len();
        for i in 0..len {
            self.prev[i] = if i == 0 { NIL } else { (i - 1) as u32 };
            self.next[i] = if i + 1 == len { NIL } else { (i + 1) as u32 };
        }
    }

    pub(crate) fn values(&self) -> &[T] {
        &self.values
    }

    /// Splits the store into mutable payloads and shared links.
    pub(crate) fn split_mut(&mut self) -> (&mut [T], &[u32], &[u32]) {
        (&mut self.values, &self.next, &self.prev)
    }

    /// Drops every slot but keeps the allocation.
    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.next.clear();
        self.prev.clear();
    }

    /// Drops every slot and frees the buffers.
    pub(crate) fn release(&mut self) {
        self.values = Vec::new();
        self.next = Vec::new();
        self.prev = Vec::new();
        self.capacity = 0;
    }

    pub(crate) fn approx_bytes(&self) -> usize {
        self.values.capacity() * std::mem::size_of::<T>()
            + (self.next.capacity() + self.prev.capacity()) * std::mem::size_of::<u32>()
    }
}

impl<T: Clone> NodeStore<T> {
    /// Bulk-copies every slot of `source` to the end, shifting its links by
    /// the current length. Returns the offset applied.
    pub(crate) fn extend_from_store(&mut self, source: &NodeStore<T>) -> u32 {
        debug_assert!(self.len() + source.len() <= self.capacity);
        let base = self.len() as u32;
        let shift = |link: &u32| if *link == NIL { NIL } else { *link + base };
        self.values.extend_from_slice(&source.values);
        self.next.extend(source.next.iter().map(shift));
        self.prev.extend(source.prev.iter().map(shift));
        base
    }
}
