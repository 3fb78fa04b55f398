//! Index-addressed doubly linked list over parallel slot buffers.
//!
//! Nodes live in a [`NodeStore`]: payloads, next links and prev links are
//! three parallel buffers indexed by slot, with `NIL` standing in for a null
//! link. Structural edits are O(1): pushes and inserts append a fresh slot and
//! thread it into the chain, and removal unlinks a node then moves the
//! highest occupied slot into the hole so `[0, len)` stays dense.
//!
//! ## Architecture
//!
//! ```text
//!   store (NodeStore<T>)
//!   ┌──────┬───────┬──────┬──────┐
//!   │ slot │ value │ prev │ next │
//!   ├──────┼───────┼──────┼──────┤
//!   │  0   │  A    │ NIL  │  2   │
//!   │  1   │  C    │  2   │ NIL  │
//!   │  2   │  B    │  0   │  1   │
//!   └──────┴───────┴──────┴──────┘
//!
//!   head ─► [0:A] ◄──► [2:B] ◄──► [1:C] ◄── tail      generation: 4
//! ```
//!
//! Physical order and logical order only coincide after construction by
//! appends, or right after
//! [`sort_node_memory_addresses`](SlotList::sort_node_memory_addresses).
//!
//! ## Handles
//!
//! Every node reference is a [`NodeHandle`] stamped with the list's
//! generation. Removal, sort, clear and dispose bump the generation and so
//! invalidate every outstanding handle; pushes, inserts and splices do not.
//! The insert/remove family treats a stale handle as a no-op and returns
//! [`NodeHandle::INVALID`], so cursor-walking code composes without special
//! cases at the ends.
//!
//! ## Access gate
//!
//! Each call is validated against the list's [`AccessGate`] before anything
//! is mutated. Structural operations need write permission over the whole
//! occupied range; handle and index reads need read permission for the
//! touched slot.
//!
//! ## Performance
//! - `push_front` / `push_back` / `insert_after` / `insert_before`: O(1) amortized
//! - `remove` / `pop_front` / `pop_back`: O(1)
//! - `at` / `value` / `next` / `prev`: O(1)
//! - `iter` / `to_vec` / `sort_node_memory_addresses`: O(n)
//!
//! ## Example
//!
//! ```
//! use nodekit::ds::SlotList;
//!
//! let mut list = SlotList::new(2);
//! list.push_back(10).unwrap();
//! let twenty = list.push_back(20).unwrap();
//! list.push_back(30).unwrap();
//! assert_eq!(list.capacity(), 4);
//!
//! let ten = list.remove(twenty).unwrap();
//! assert_eq!(list.value(ten).unwrap(), Some(&10));
//! assert_eq!(list.to_vec().unwrap(), vec![10, 30]);
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use crate::ds::gate::{Access, AccessGate};
use crate::ds::handle::{ListId, NodeHandle};
use crate::ds::node_store::{NIL, NodeStore};
use crate::error::{InvariantError, ListError};

/// Index-addressed doubly linked list with generation-stamped handles.
pub struct SlotList<T> {
    pub(crate) store: NodeStore<T>,
    pub(crate) head: u32,
    pub(crate) tail: u32,
    pub(crate) generation: u64,
    pub(crate) id: ListId,
    pub(crate) gate: AccessGate,
    pub(crate) disposed: bool,
}

impl<T> SlotList<T> {
    /// Creates an empty list with room for `capacity` nodes.
    ///
    /// Capacity is clamped up to [`MIN_CAPACITY`](crate::ds::MIN_CAPACITY).
    pub fn new(capacity: usize) -> Self {
        Self::from_store(NodeStore::with_capacity(capacity), AccessGate::full())
    }

    /// Creates an empty list, reporting allocation failure instead of aborting.
    pub fn try_new(capacity: usize) -> Result<Self, ListError> {
        Ok(Self::from_store(
            NodeStore::try_with_capacity(capacity)?,
            AccessGate::full(),
        ))
    }

    /// Creates an empty list governed by `gate`.
    pub fn with_gate(capacity: usize, gate: AccessGate) -> Self {
        Self::from_store(NodeStore::with_capacity(capacity), gate)
    }

    fn from_store(store: NodeStore<T>, gate: AccessGate) -> Self {
        Self {
            store,
            head: NIL,
            tail: NIL,
            generation: 1,
            id: ListId::fresh(),
            gate,
            disposed: false,
        }
    }

    /// Returns the number of nodes (0 once disposed).
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the list holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Returns the number of slots allocated (0 once disposed).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns the current generation; handles stamped with any other value are stale.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns this list's identity.
    #[inline]
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Returns the access gate in force.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Mutable access to the gate, for the partition authority.
    pub fn gate_mut(&mut self) -> &mut AccessGate {
        &mut self.gate
    }

    /// Replaces the access gate.
    pub fn set_gate(&mut self, gate: AccessGate) {
        self.gate = gate;
    }

    /// Returns `true` if `handle` currently names a node of this list.
    pub fn is_valid(&self, handle: NodeHandle) -> bool {
        !self.disposed && self.resolve(handle).is_some()
    }

    /// Returns a handle to the first node (invalid when empty).
    pub fn head(&self) -> Result<NodeHandle, ListError> {
        self.ensure_live()?;
        self.gate.check_permission(Access::ReadOnly)?;
        Ok(self.stamp(self.head))
    }

    /// Returns a handle to the last node (invalid when empty).
    pub fn tail(&self) -> Result<NodeHandle, ListError> {
        self.ensure_live()?;
        self.gate.check_permission(Access::ReadOnly)?;
        Ok(self.stamp(self.tail))
    }

    /// Returns a handle to whatever node occupies physical slot `index`.
    pub fn handle_at(&self, index: usize) -> Result<NodeHandle, ListError> {
        self.ensure_live()?;
        self.gate.check_index(index, self.len(), Access::ReadOnly)?;
        Ok(self.stamp(index as u32))
    }

    /// Returns the payload named by `handle`, or `None` if it is stale.
    pub fn value(&self, handle: NodeHandle) -> Result<Option<&T>, ListError> {
        self.ensure_live()?;
        self.read_handle(&self.gate, handle)
    }

    /// Returns the payload named by `handle` mutably, or `None` if it is stale.
    pub fn value_mut(&mut self, handle: NodeHandle) -> Result<Option<&mut T>, ListError> {
        self.ensure_live()?;
        self.gate.check_permission(Access::ReadWrite)?;
        let Some(index) = self.resolve(handle) else {
            return Ok(None);
        };
        self.gate
            .check_index(index as usize, self.len(), Access::ReadWrite)?;
        Ok(Some(self.store.value_mut(index)))
    }

    /// Moves a cursor one node towards the tail.
    ///
    /// Returns an invalid handle past the tail or for a stale cursor.
    pub fn next(&self, handle: NodeHandle) -> Result<NodeHandle, ListError> {
        self.ensure_live()?;
        self.step(&self.gate, handle, true)
    }

    /// Moves a cursor one node towards the head.
    ///
    /// Returns an invalid handle past the head or for a stale cursor.
    pub fn prev(&self, handle: NodeHandle) -> Result<NodeHandle, ListError> {
        self.ensure_live()?;
        self.step(&self.gate, handle, false)
    }

    /// Direct slot access by physical index.
    ///
    /// Matches logical position only after append-only construction or a
    /// compaction pass; any removal breaks the correspondence.
    pub fn at(&self, index: usize) -> Result<&T, ListError> {
        self.ensure_live()?;
        self.gate.check_index(index, self.len(), Access::ReadOnly)?;
        Ok(self.store.value(index as u32))
    }

    /// Mutable direct slot access by physical index.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ListError> {
        self.ensure_live()?;
        self.gate.check_index(index, self.len(), Access::ReadWrite)?;
        Ok(self.store.value_mut(index as u32))
    }

    /// Returns the first payload, if any.
    pub fn front(&self) -> Result<Option<&T>, ListError> {
        let head = self.head()?;
        self.value(head)
    }

    /// Returns the last payload, if any.
    pub fn back(&self) -> Result<Option<&T>, ListError> {
        let tail = self.tail()?;
        self.value(tail)
    }

    /// Appends a node after the tail and returns its handle.
    pub fn push_back(&mut self, value: T) -> Result<NodeHandle, ListError> {
        self.check_structural()?;
        self.store.ensure_room(1)?;
        let old_tail = self.tail;
        let index = self.store.push(value, old_tail, NIL);
        if old_tail == NIL {
            self.head = index;
        } else {
            self.store.set_next(old_tail, index);
        }
        self.tail = index;
        Ok(self.stamp(index))
    }

    /// Prepends a node before the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> Result<NodeHandle, ListError> {
        self.check_structural()?;
        self.store.ensure_room(1)?;
        let old_head = self.head;
        let index = self.store.push(value, NIL, old_head);
        if old_head == NIL {
            self.tail = index;
        } else {
            self.store.set_prev(old_head, index);
        }
        self.head = index;
        Ok(self.stamp(index))
    }

    /// Inserts a node right after `at`.
    ///
    /// A stale `at` is a no-op: `value` is dropped and the invalid handle is
    /// returned.
    pub fn insert_after(&mut self, at: NodeHandle, value: T) -> Result<NodeHandle, ListError> {
        self.check_structural()?;
        let Some(anchor) = self.resolve(at) else {
            return Ok(NodeHandle::INVALID);
        };
        self.store.ensure_room(1)?;
        let after = self.store.next(anchor);
        let index = self.store.push(value, anchor, after);
        self.store.set_next(anchor, index);
        if after == NIL {
            self.tail = index;
        } else {
            self.store.set_prev(after, index);
        }
        Ok(self.stamp(index))
    }

    /// Inserts a node right before `at`.
    ///
    /// A stale `at` is a no-op: `value` is dropped and the invalid handle is
    /// returned.
    pub fn insert_before(&mut self, at: NodeHandle, value: T) -> Result<NodeHandle, ListError> {
        self.check_structural()?;
        let Some(anchor) = self.resolve(at) else {
            return Ok(NodeHandle::INVALID);
        };
        self.store.ensure_room(1)?;
        let before = self.store.prev(anchor);
        let index = self.store.push(value, before, anchor);
        self.store.set_prev(anchor, index);
        if before == NIL {
            self.head = index;
        } else {
            self.store.set_next(before, index);
        }
        Ok(self.stamp(index))
    }

    /// Removes the node named by `handle`.
    ///
    /// Returns the successor when the head was removed, the predecessor
    /// otherwise, and an invalid handle once the list is empty. Always bumps
    /// the generation, because the highest occupied slot may have been moved
    /// into the freed one. A stale `handle` is a no-op.
    pub fn remove(&mut self, handle: NodeHandle) -> Result<NodeHandle, ListError> {
        self.check_structural()?;
        let Some(index) = self.resolve(handle) else {
            return Ok(NodeHandle::INVALID);
        };
        let (_, neighbour) = self.remove_slot(index);
        Ok(self.stamp(neighbour))
    }

    /// Removes the node named by `handle` and returns its payload alongside
    /// the neighbour handle [`remove`](Self::remove) would return.
    pub fn take(&mut self, handle: NodeHandle) -> Result<Option<(T, NodeHandle)>, ListError> {
        self.check_structural()?;
        let Some(index) = self.resolve(handle) else {
            return Ok(None);
        };
        let (value, neighbour) = self.remove_slot(index);
        Ok(Some((value, self.stamp(neighbour))))
    }

    /// Removes and returns the first payload.
    pub fn pop_front(&mut self) -> Result<Option<T>, ListError> {
        self.check_structural()?;
        if self.head == NIL {
            return Ok(None);
        }
        Ok(Some(self.remove_slot(self.head).0))
    }

    /// Removes and returns the last payload.
    pub fn pop_back(&mut self) -> Result<Option<T>, ListError> {
        self.check_structural()?;
        if self.tail == NIL {
            return Ok(None);
        }
        Ok(Some(self.remove_slot(self.tail).0))
    }

    /// Grows capacity so `additional` more nodes fit without reallocating.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ListError> {
        self.check_structural()?;
        self.store.ensure_room(additional)
    }

    /// Grows capacity to exactly `new_capacity` slots; never shrinks.
    pub fn grow_to(&mut self, new_capacity: usize) -> Result<(), ListError> {
        self.check_structural()?;
        self.store.grow_to(new_capacity)
    }

    /// Drops every node, keeping the allocation. Bumps the generation.
    pub fn clear(&mut self) -> Result<(), ListError> {
        self.check_structural()?;
        self.store.clear();
        self.head = NIL;
        self.tail = NIL;
        self.bump_generation();
        Ok(())
    }

    /// Releases all storage. Irreversible: every later call on the list
    /// fails with [`ListError::UseAfterDispose`] and every handle is stale.
    pub fn dispose(&mut self) -> Result<(), ListError> {
        self.check_structural()?;
        debug!(
            list = self.id.get(),
            len = self.len(),
            capacity = self.capacity(),
            "disposing list"
        );
        self.store.release();
        self.head = NIL;
        self.tail = NIL;
        self.bump_generation();
        self.disposed = true;
        Ok(())
    }

    /// Returns an iterator in logical order. Double-ended: `.rev()` walks
    /// from the tail.
    pub fn iter(&self) -> Result<Iter<'_, T>, ListError> {
        self.ensure_live()?;
        self.gate.check_whole(self.len(), Access::ReadOnly)?;
        Ok(Iter {
            store: &self.store,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        })
    }

    /// Returns an approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.store.approx_bytes()
    }

    /// Walks the chain in both directions and checks every structural
    /// invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.len();
        if len > self.capacity() {
            return Err(InvariantError::new(format!(
                "length {} exceeds capacity {}",
                len,
                self.capacity()
            )));
        }
        if len == 0 {
            if self.head != NIL || self.tail != NIL {
                return Err(InvariantError::new("empty list has a head or tail"));
            }
            return Ok(());
        }
        if self.head == NIL || self.tail == NIL {
            return Err(InvariantError::new("non-empty list is missing head or tail"));
        }

        let mut seen = vec![false; len];
        let mut current = self.head;
        let mut prev = NIL;
        for step in 0..len {
            if current == NIL || current as usize >= len {
                return Err(InvariantError::new(format!(
                    "forward walk left the occupied range at step {}",
                    step
                )));
            }
            if std::mem::replace(&mut seen[current as usize], true) {
                return Err(InvariantError::new(format!(
                    "slot {} reached twice on forward walk",
                    current
                )));
            }
            if self.store.prev(current) != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has prev {} but was reached from {}",
                    current,
                    self.store.prev(current),
                    prev
                )));
            }
            prev = current;
            current = self.store.next(current);
        }
        if current != NIL {
            return Err(InvariantError::new("forward walk did not end after len steps"));
        }
        if prev != self.tail {
            return Err(InvariantError::new("forward walk did not end at tail"));
        }

        let mut current = self.tail;
        for _ in 0..len {
            if current == NIL {
                return Err(InvariantError::new("backward walk ended early"));
            }
            current = self.store.prev(current);
        }
        if current != NIL {
            return Err(InvariantError::new("backward walk did not end after len steps"));
        }
        Ok(())
    }

    // -- internals ----------------------------------------------------------

    #[inline]
    pub(crate) fn ensure_live(&self) -> Result<(), ListError> {
        if self.disposed {
            Err(ListError::UseAfterDispose)
        } else {
            Ok(())
        }
    }

    /// Liveness plus whole-range write permission.
    #[inline]
    pub(crate) fn check_structural(&self) -> Result<(), ListError> {
        self.ensure_live()?;
        self.gate.check_whole(self.len(), Access::ReadWrite)
    }

    #[inline]
    pub(crate) fn resolve(&self, handle: NodeHandle) -> Option<u32> {
        handle.resolve(self.len(), self.generation, self.id)
    }

    #[inline]
    pub(crate) fn stamp(&self, index: u32) -> NodeHandle {
        NodeHandle::new(index, self.generation, self.id)
    }

    #[inline]
    pub(crate) fn bump_generation(&mut self) {
        self.generation += 1;
    }

    /// Handle read validated against an arbitrary gate (list or partition).
    pub(crate) fn read_handle(
        &self,
        gate: &AccessGate,
        handle: NodeHandle,
    ) -> Result<Option<&T>, ListError> {
        gate.check_permission(Access::ReadOnly)?;
        let Some(index) = self.resolve(handle) else {
            return Ok(None);
        };
        gate.check_index(index as usize, self.len(), Access::ReadOnly)?;
        Ok(Some(self.store.value(index)))
    }

    /// One cursor step validated against `gate`; both the current and the
    /// destination slot must be readable.
    pub(crate) fn step(
        &self,
        gate: &AccessGate,
        handle: NodeHandle,
        forward: bool,
    ) -> Result<NodeHandle, ListError> {
        gate.check_permission(Access::ReadOnly)?;
        let Some(index) = self.resolve(handle) else {
            return Ok(NodeHandle::INVALID);
        };
        let len = self.len();
        gate.check_index(index as usize, len, Access::ReadOnly)?;
        let target = if forward {
            self.store.next(index)
        } else {
            self.store.prev(index)
        };
        if target != NIL {
            gate.check_index(target as usize, len, Access::ReadOnly)?;
        }
        Ok(self.stamp(target))
    }

    /// Unlinks slot `index`, compacts the store, and returns the payload with
    /// the slot of the neighbour to hand back (post-compaction numbering).
    fn remove_slot(&mut self, index: u32) -> (T, u32) {
        let prev = self.store.prev(index);
        let next = self.store.next(index);
        let mut neighbour = if index == self.head { next } else { prev };

        if prev == NIL {
            self.head = next;
        } else {
            self.store.set_next(prev, next);
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.store.set_prev(next, prev);
        }

        let last = (self.store.len() - 1) as u32;
        let value = self.store.swap_remove(index);
        if index != last {
            // slot `index` now holds the node that lived at `last`
            let moved_prev = self.store.prev(index);
            let moved_next = self.store.next(index);
            if moved_prev == NIL {
                self.head = index;
            } else {
                self.store.set_next(moved_prev, index);
            }
            if moved_next == NIL {
                self.tail = index;
            } else {
                self.store.set_prev(moved_next, index);
            }
            if neighbour == last {
                neighbour = index;
            }
            trace!(freed = index, moved = last, "relocated highest slot");
        }

        self.bump_generation();
        (value, neighbour)
    }
}

impl<T: Clone> SlotList<T> {
    /// Copies the payloads into a new vector, head to tail.
    pub fn to_vec(&self) -> Result<Vec<T>, ListError> {
        Ok(self.iter()?.cloned().collect())
    }

    /// Copies the payloads into a new vector, tail to head.
    pub fn to_vec_reverse(&self) -> Result<Vec<T>, ListError> {
        Ok(self.iter()?.rev().cloned().collect())
    }

    /// Copies the payloads head to tail into the front of `out`.
    ///
    /// Returns the number of elements written. A buffer shorter than the
    /// list is rejected before anything is written.
    pub fn copy_to_slice(&self, out: &mut [T]) -> Result<usize, ListError> {
        let iter = self.iter()?;
        check_buffer(self.len(), out.len())?;
        for (slot, value) in out.iter_mut().zip(iter) {
            slot.clone_from(value);
        }
        Ok(self.len())
    }

    /// Copies the payloads tail to head into the front of `out`.
    pub fn copy_to_slice_reverse(&self, out: &mut [T]) -> Result<usize, ListError> {
        let iter = self.iter()?;
        check_buffer(self.len(), out.len())?;
        for (slot, value) in out.iter_mut().zip(iter.rev()) {
            slot.clone_from(value);
        }
        Ok(self.len())
    }
}

fn check_buffer(len: usize, available: usize) -> Result<(), ListError> {
    if available < len {
        Err(ListError::OutOfRange {
            requested: 0..len,
            allowed: 0..available,
        })
    } else {
        Ok(())
    }
}

impl<T> Default for SlotList<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> Index<usize> for SlotList<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the gate rejects the access. See [`SlotList::at`].
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<usize> for SlotList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iter() {
            Ok(iter) => f.debug_list().entries(iter).finish(),
            Err(_) => f
                .debug_struct("SlotList")
                .field("len", &self.len())
                .field("capacity", &self.capacity())
                .field("generation", &self.generation)
                .field("disposed", &self.disposed)
                .finish_non_exhaustive(),
        }
    }
}

/// Logical-order iterator over a [`SlotList`].
pub struct Iter<'a, T> {
    store: &'a NodeStore<T>,
    front: u32,
    back: u32,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front;
        self.front = self.store.next(index);
        self.remaining -= 1;
        Some(self.store.value(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back;
        self.back = self.store.prev(index);
        self.remaining -= 1;
        Some(self.store.value(index))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
