//! Lock-sequenced wrapper around [`SlotList`].
//!
//! [`SlotList`] performs no locking: callers sequence structural operations
//! against partitioned workers themselves (fork-join). When that discipline is
//! inconvenient, [`ConcurrentSlotList`] sequences them with a
//! `parking_lot::RwLock`: structural operations take the write lock, reads
//! take the read lock, and `try_*` variants never block.
//!
//! The inner list's [`AccessGate`](crate::ds::AccessGate) still applies under
//! the lock.

use parking_lot::RwLock;

use crate::ds::gate::AccessGate;
use crate::ds::handle::NodeHandle;
use crate::ds::slot_list::SlotList;
use crate::error::ListError;

#[derive(Debug)]
/// Thread-safe wrapper around `SlotList` using a `parking_lot::RwLock`.
pub struct ConcurrentSlotList<T> {
    inner: RwLock<SlotList<T>>,
}

impl<T> ConcurrentSlotList<T> {
    /// Creates an empty concurrent list with room for `capacity` nodes.
    pub fn new(capacity: usize) -> Self {
        Self::from_list(SlotList::new(capacity))
    }

    /// Creates an empty concurrent list governed by `gate`.
    pub fn with_gate(capacity: usize, gate: AccessGate) -> Self {
        Self::from_list(SlotList::with_gate(capacity, gate))
    }

    /// Wraps an existing list.
    pub fn from_list(list: SlotList<T>) -> Self {
        Self {
            inner: RwLock::new(list),
        }
    }

    /// Unwraps the inner list.
    pub fn into_inner(self) -> SlotList<T> {
        self.inner.into_inner()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        let list = self.inner.read();
        list.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        let list = self.inner.read();
        list.is_empty()
    }

    /// Returns the number of allocated slots.
    pub fn capacity(&self) -> usize {
        let list = self.inner.read();
        list.capacity()
    }

    /// Returns the current handle generation.
    pub fn generation(&self) -> u64 {
        let list = self.inner.read();
        list.generation()
    }

    /// Returns `true` if `handle` currently names a node.
    pub fn is_valid(&self, handle: NodeHandle) -> bool {
        let list = self.inner.read();
        list.is_valid(handle)
    }

    /// Replaces the inner list's access gate.
    pub fn set_gate(&self, gate: AccessGate) {
        let mut list = self.inner.write();
        list.set_gate(gate);
    }

    /// Appends a value and returns its handle.
    pub fn push_back(&self, value: T) -> Result<NodeHandle, ListError> {
        let mut list = self.inner.write();
        list.push_back(value)
    }

    /// Tries to append a value without blocking.
    pub fn try_push_back(&self, value: T) -> Option<Result<NodeHandle, ListError>> {
        let mut list = self.inner.try_write()?;
        Some(list.push_back(value))
    }

    /// Prepends a value and returns its handle.
    pub fn push_front(&self, value: T) -> Result<NodeHandle, ListError> {
        let mut list = self.inner.write();
        list.push_front(value)
    }

    /// Tries to prepend a value without blocking.
    pub fn try_push_front(&self, value: T) -> Option<Result<NodeHandle, ListError>> {
        let mut list = self.inner.try_write()?;
        Some(list.push_front(value))
    }

    /// Inserts a value after `at`.
    pub fn insert_after(&self, at: NodeHandle, value: T) -> Result<NodeHandle, ListError> {
        let mut list = self.inner.write();
        list.insert_after(at, value)
    }

    /// Inserts a value before `at`.
    pub fn insert_before(&self, at: NodeHandle, value: T) -> Result<NodeHandle, ListError> {
        let mut list = self.inner.write();
        list.insert_before(at, value)
    }

    /// Removes the node named by `handle`.
    pub fn remove(&self, handle: NodeHandle) -> Result<NodeHandle, ListError> {
        let mut list = self.inner.write();
        list.remove(handle)
    }

    /// Tries to remove the node named by `handle` without blocking.
    pub fn try_remove(&self, handle: NodeHandle) -> Option<Result<NodeHandle, ListError>> {
        let mut list = self.inner.try_write()?;
        Some(list.remove(handle))
    }

    /// Removes and returns the first payload.
    pub fn pop_front(&self) -> Result<Option<T>, ListError> {
        let mut list = self.inner.write();
        list.pop_front()
    }

    /// Removes and returns the last payload.
    pub fn pop_back(&self) -> Result<Option<T>, ListError> {
        let mut list = self.inner.write();
        list.pop_back()
    }

    /// Runs the compaction pass.
    pub fn sort_node_memory_addresses(&self) -> Result<usize, ListError> {
        let mut list = self.inner.write();
        list.sort_node_memory_addresses()
    }

    /// Runs `f` on the payload named by `handle`, if valid.
    pub fn value_with<R>(
        &self,
        handle: NodeHandle,
        f: impl FnOnce(&T) -> R,
    ) -> Result<Option<R>, ListError> {
        let list = self.inner.read();
        Ok(list.value(handle)?.map(f))
    }

    /// Tries to run `f` on the payload named by `handle` without blocking.
    pub fn try_value_with<R>(
        &self,
        handle: NodeHandle,
        f: impl FnOnce(&T) -> R,
    ) -> Option<Result<Option<R>, ListError>> {
        let list = self.inner.try_read()?;
        Some(list.value(handle).map(|value| value.map(f)))
    }

    /// Runs `f` on a mutable reference to the payload named by `handle`.
    pub fn value_mut_with<R>(
        &self,
        handle: NodeHandle,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<Option<R>, ListError> {
        let mut list = self.inner.write();
        Ok(list.value_mut(handle)?.map(f))
    }

    /// Runs `f` on physical slot `index`.
    pub fn at_with<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Result<R, ListError> {
        let list = self.inner.read();
        list.at(index).map(f)
    }

    /// Runs `f` with shared access to the whole list.
    pub fn read_with<R>(&self, f: impl FnOnce(&SlotList<T>) -> R) -> R {
        let list = self.inner.read();
        f(&list)
    }

    /// Runs `f` with exclusive access to the whole list.
    pub fn write_with<R>(&self, f: impl FnOnce(&mut SlotList<T>) -> R) -> R {
        let mut list = self.inner.write();
        f(&mut list)
    }

    /// Clears the list.
    pub fn clear(&self) -> Result<(), ListError> {
        let mut list = self.inner.write();
        list.clear()
    }

    /// Tries to clear the list without blocking.
    pub fn try_clear(&self) -> Option<Result<(), ListError>> {
        let mut list = self.inner.try_write()?;
        Some(list.clear())
    }

    /// Disposes the inner list.
    pub fn dispose(&self) -> Result<(), ListError> {
        let mut list = self.inner.write();
        list.dispose()
    }
}

impl<T: Clone> ConcurrentSlotList<T> {
    /// Snapshot of the payloads in logical order.
    pub fn to_vec(&self) -> Result<Vec<T>, ListError> {
        let list = self.inner.read();
        list.to_vec()
    }
}

impl<T> Default for ConcurrentSlotList<T> {
    fn default() -> Self {
        Self::from_list(SlotList::default())
    }
}
