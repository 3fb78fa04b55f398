//! Worker partitioning: disjoint index ranges handed to concurrent workers.
//!
//! The list itself never locks. Instead, the partition authority splits the
//! occupied slots into disjoint contiguous ranges and gives each worker a view
//! whose [`AccessGate`] is restricted to its range:
//!
//! ```text
//!   slots:      0  1  2 │ 3  4  5 │ 6  7
//!               ────────┼─────────┼─────
//!   worker 0:   0..3    │         │
//!   worker 1:           │  3..6   │
//!   worker 2:           │         │ 6..8
//! ```
//!
//! - [`ReadPartition`]s share `&SlotList` and may be read concurrently.
//! - [`WritePartition`]s own disjoint `&mut` chunks of the payload buffer
//!   (split with `split_at_mut`, so disjointness is borrow-checked) and share
//!   the link buffers read-only.
//!
//! Any access outside a view's range fails with
//! [`ListError::OutOfRange`]. Structural operations are unreachable while
//! views exist, because the views borrow the list.
//!
//! ## Example
//!
//! ```
//! use nodekit::ds::SlotList;
//!
//! let mut list = SlotList::new(8);
//! for v in 0..8 {
//!     list.push_back(v).unwrap();
//! }
//!
//! std::thread::scope(|s| {
//!     for mut part in list.partitions_mut(3).unwrap() {
//!         s.spawn(move || {
//!             for (_, v) in part.iter_mut() {
//!                 *v *= 10;
//!             }
//!         });
//!     }
//! });
//! assert_eq!(list.to_vec().unwrap(), vec![0, 10, 20, 30, 40, 50, 60, 70]);
//! ```

use std::ops::Range;

use tracing::debug;

use crate::ds::gate::{Access, AccessGate};
use crate::ds::handle::{ListId, NodeHandle};
use crate::ds::node_store::NIL;
use crate::ds::slot_list::SlotList;
use crate::error::ListError;

/// Splits `[0, len)` into `workers` disjoint contiguous ranges.
///
/// Sizes differ by at most one; earlier ranges get the remainder. The worker
/// count is clamped to at least 1, and trailing ranges may be empty when
/// there are more workers than slots.
pub fn partition_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = len / workers;
    let extra = len % workers;
    let mut start = 0;
    (0..workers)
        .map(|i| {
            let size = base + usize::from(i < extra);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}

impl<T> SlotList<T> {
    /// Hands out read-only views over `workers` disjoint slot ranges.
    ///
    /// Requires read access over the whole occupied range.
    pub fn partitions(&self, workers: usize) -> Result<Vec<ReadPartition<'_, T>>, ListError> {
        self.ensure_live()?;
        self.gate.check_whole(self.len(), Access::ReadOnly)?;
        let ranges = partition_ranges(self.len(), workers);
        debug!(list = self.id.get(), len = self.len(), workers = ranges.len(), "read partitions");
        Ok(ranges
            .into_iter()
            .map(|range| ReadPartition {
                list: self,
                gate: AccessGate::new(Access::ReadOnly, Some(range)),
            })
            .collect())
    }

    /// Hands out read-write views over `workers` disjoint slot ranges.
    ///
    /// Requires write access over the whole occupied range.
    pub fn partitions_mut(
        &mut self,
        workers: usize,
    ) -> Result<Vec<WritePartition<'_, T>>, ListError> {
        self.check_structural()?;
        let len = self.len();
        let generation = self.generation;
        let list = self.id;
        let ranges = partition_ranges(len, workers);
        debug!(list = list.get(), len, workers = ranges.len(), "write partitions");

        let (mut values, next, prev) = self.store.split_mut();
        let mut parts = Vec::with_capacity(ranges.len());
        for range in ranges {
            let (chunk, rest) = std::mem::take(&mut values).split_at_mut(range.len());
            values = rest;
            parts.push(WritePartition {
                values: chunk,
                next,
                prev,
                len,
                generation,
                list,
                gate: AccessGate::new(Access::ReadWrite, Some(range)),
            });
        }
        Ok(parts)
    }
}

/// Read-only view of one worker's slot range.
#[derive(Debug)]
pub struct ReadPartition<'a, T> {
    list: &'a SlotList<T>,
    gate: AccessGate,
}

impl<'a, T> ReadPartition<'a, T> {
    /// Slot indices this view may touch.
    pub fn range(&self) -> Range<usize> {
        self.gate.allowed(self.list.len())
    }

    /// The gate enforced by this view.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Reads physical slot `index`.
    pub fn get(&self, index: usize) -> Result<&'a T, ListError> {
        self.gate
            .check_index(index, self.list.len(), Access::ReadOnly)?;
        Ok(self.list.store.value(index as u32))
    }

    /// Reads the node named by `handle`.
    pub fn value(&self, handle: NodeHandle) -> Result<Option<&'a T>, ListError> {
        self.list.read_handle(&self.gate, handle)
    }

    /// Cursor step towards the tail, confined to this view's range.
    pub fn next(&self, handle: NodeHandle) -> Result<NodeHandle, ListError> {
        self.list.step(&self.gate, handle, true)
    }

    /// Cursor step towards the head, confined to this view's range.
    pub fn prev(&self, handle: NodeHandle) -> Result<NodeHandle, ListError> {
        self.list.step(&self.gate, handle, false)
    }

    /// Handle for physical slot `index`.
    pub fn handle_at(&self, index: usize) -> Result<NodeHandle, ListError> {
        self.gate
            .check_index(index, self.list.len(), Access::ReadOnly)?;
        Ok(self.list.stamp(index as u32))
    }

    /// Iterates `(slot index, payload)` over this view's range.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a T)> + 'a {
        let range = self.range();
        let start = range.start;
        self.list.store.values()[range]
            .iter()
            .enumerate()
            .map(move |(i, v)| (start + i, v))
    }
}

/// Read-write view of one worker's slot range.
///
/// Owns a disjoint chunk of the payload buffer; links are shared read-only,
/// so cursor navigation works but the chain cannot be edited.
#[derive(Debug)]
pub struct WritePartition<'a, T> {
    values: &'a mut [T],
    next: &'a [u32],
    prev: &'a [u32],
    len: usize,
    generation: u64,
    list: ListId,
    gate: AccessGate,
}

impl<'a, T> WritePartition<'a, T> {
    /// Slot indices this view may touch.
    pub fn range(&self) -> Range<usize> {
        self.gate.allowed(self.len)
    }

    /// The gate enforced by this view.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    fn offset(&self) -> usize {
        self.range().start
    }

    /// Reads physical slot `index`.
    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        self.gate.check_index(index, self.len, Access::ReadOnly)?;
        Ok(&self.values[index - self.offset()])
    }

    /// Writes physical slot `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ListError> {
        self.gate.check_index(index, self.len, Access::ReadWrite)?;
        let offset = self.offset();
        Ok(&mut self.values[index - offset])
    }

    /// Reads the node named by `handle`, or `None` if it is stale.
    pub fn value(&self, handle: NodeHandle) -> Result<Option<&T>, ListError> {
        match self.resolve(handle) {
            Some(index) => self.get(index).map(Some),
            None => Ok(None),
        }
    }

    /// Writes the node named by `handle`, or `None` if it is stale.
    pub fn value_mut(&mut self, handle: NodeHandle) -> Result<Option<&mut T>, ListError> {
        match self.resolve(handle) {
            Some(index) => self.get_mut(index).map(Some),
            None => Ok(None),
        }
    }

    /// Cursor step towards the tail, confined to this view's range.
    pub fn next(&self, handle: NodeHandle) -> Result<NodeHandle, ListError> {
        self.step(handle, self.next)
    }

    /// Cursor step towards the head, confined to this view's range.
    pub fn prev(&self, handle: NodeHandle) -> Result<NodeHandle, ListError> {
        self.step(handle, self.prev)
    }

    /// Handle for physical slot `index`.
    pub fn handle_at(&self, index: usize) -> Result<NodeHandle, ListError> {
        self.gate.check_index(index, self.len, Access::ReadOnly)?;
        Ok(NodeHandle::new(index as u32, self.generation, self.list))
    }

    /// Iterates `(slot index, payload)` mutably over this view's range.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        let start = self.offset();
        self.values
            .iter_mut()
            .enumerate()
            .map(move |(i, v)| (start + i, v))
    }

    fn resolve(&self, handle: NodeHandle) -> Option<usize> {
        handle
            .resolve(self.len, self.generation, self.list)
            .map(|index| index as usize)
    }

    fn step(&self, handle: NodeHandle, links: &[u32]) -> Result<NodeHandle, ListError> {
        self.gate.check_permission(Access::ReadOnly)?;
        let Some(index) = self.resolve(handle) else {
            return Ok(NodeHandle::INVALID);
        };
        self.gate.check_index(index, self.len, Access::ReadOnly)?;
        let target = links[index];
        if target != NIL {
            self.gate
                .check_index(target as usize, self.len, Access::ReadOnly)?;
        }
        Ok(NodeHandle::new(target, self.generation, self.list))
    }
}
