//! Bulk splicing of a foreign list, or a sub-range of one, next to a node.
//!
//! The source nodes are copied to the end of this list's store (links shifted
//! by the current length), and then only the two boundary links are rewired.
//! Cost is O(k) in the number of spliced nodes; the generation is untouched,
//! so existing handles stay valid.
//!
//! ```text
//!   dest:   [a0] ◄─► [a1] ◄─► [a2]         splice B after a1
//!   source: [b0] ◄─► [b1]
//!
//!   store:  a0 a1 a2 │ b0 b1                (copied, offset by 3)
//!   chain:  a0 ─► a1 ─► b0 ─► b1 ─► a2
//! ```

use crate::ds::gate::Access;
use crate::ds::handle::NodeHandle;
use crate::ds::node_store::NIL;
use crate::ds::slot_list::SlotList;
use crate::error::ListError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    After,
    Before,
}

impl<T: Clone> SlotList<T> {
    /// Copies all of `source` in after `at`; returns the first spliced node.
    ///
    /// An empty `source` is a no-op returning `at` (or this list's head when
    /// this list is empty). A stale `at` on a non-empty list is a no-op
    /// returning the invalid handle.
    pub fn insert_list_after(
        &mut self,
        at: NodeHandle,
        source: &SlotList<T>,
    ) -> Result<NodeHandle, ListError> {
        self.splice_list(at, source, Side::After)
    }

    /// Copies all of `source` in before `at`; returns the first spliced node.
    pub fn insert_list_before(
        &mut self,
        at: NodeHandle,
        source: &SlotList<T>,
    ) -> Result<NodeHandle, ListError> {
        self.splice_list(at, source, Side::Before)
    }

    /// Copies the logical run `first..=last` of `source` in after `at`.
    ///
    /// `first` and `last` must be valid handles into `source` with `last`
    /// reachable from `first`; otherwise the call is a no-op returning the
    /// invalid handle.
    pub fn insert_range_after(
        &mut self,
        at: NodeHandle,
        source: &SlotList<T>,
        first: NodeHandle,
        last: NodeHandle,
    ) -> Result<NodeHandle, ListError> {
        self.splice_range(at, source, first, last, Side::After)
    }

    /// Copies the logical run `first..=last` of `source` in before `at`.
    pub fn insert_range_before(
        &mut self,
        at: NodeHandle,
        source: &SlotList<T>,
        first: NodeHandle,
        last: NodeHandle,
    ) -> Result<NodeHandle, ListError> {
        self.splice_range(at, source, first, last, Side::Before)
    }

    fn splice_list(
        &mut self,
        at: NodeHandle,
        source: &SlotList<T>,
        side: Side,
    ) -> Result<NodeHandle, ListError> {
        self.check_structural()?;
        source.ensure_live()?;
        source.gate.check_whole(source.len(), Access::ReadOnly)?;

        let anchor = match self.splice_anchor(at) {
            Ok(anchor) => anchor,
            Err(early) => return Ok(early),
        };
        if source.is_empty() {
            return Ok(self.empty_splice_result(at));
        }

        self.store.ensure_room(source.len())?;
        let base = self.store.extend_from_store(&source.store);
        let first = source.head + base;
        let last = source.tail + base;
        self.wire(anchor, first, last, side);
        Ok(self.stamp(first))
    }

    fn splice_range(
        &mut self,
        at: NodeHandle,
        source: &SlotList<T>,
        first: NodeHandle,
        last: NodeHandle,
        side: Side,
    ) -> Result<NodeHandle, ListError> {
        self.check_structural()?;
        source.ensure_live()?;
        source.gate.check_whole(source.len(), Access::ReadOnly)?;

        let anchor = match self.splice_anchor(at) {
            Ok(anchor) => anchor,
            Err(early) => return Ok(early),
        };
        let (Some(from), Some(to)) = (source.resolve(first), source.resolve(last)) else {
            return Ok(NodeHandle::INVALID);
        };
        let Some(count) = run_length(source, from, to) else {
            return Ok(NodeHandle::INVALID);
        };

        self.store.ensure_room(count)?;
        let base = self.len() as u32;
        let mut cursor = from;
        for offset in 0..count as u32 {
            let prev = if offset == 0 { NIL } else { base + offset - 1 };
            let next = if offset + 1 == count as u32 {
                NIL
            } else {
                base + offset + 1
            };
            self.store
                .push(source.store.value(cursor).clone(), prev, next);
            cursor = source.store.next(cursor);
        }
        let head = base;
        let tail = base + count as u32 - 1;
        self.wire(anchor, head, tail, side);
        Ok(self.stamp(head))
    }

    /// `Ok(None)` means "destination empty, splice becomes the whole list";
    /// `Err(handle)` is an early no-op result.
    fn splice_anchor(&self, at: NodeHandle) -> Result<Option<u32>, NodeHandle> {
        if self.is_empty() {
            return Ok(None);
        }
        match self.resolve(at) {
            Some(anchor) => Ok(Some(anchor)),
            None => Err(NodeHandle::INVALID),
        }
    }

    fn empty_splice_result(&self, at: NodeHandle) -> NodeHandle {
        if self.is_empty() {
            self.stamp(self.head)
        } else {
            at
        }
    }

    /// Connects the detached chain `first..=last` next to `anchor`.
    fn wire(&mut self, anchor: Option<u32>, first: u32, last: u32, side: Side) {
        self.store.set_prev(first, NIL);
        self.store.set_next(last, NIL);
        let Some(anchor) = anchor else {
            self.head = first;
            self.tail = last;
            return;
        };
        match side {
            Side::After => {
                let after = self.store.next(anchor);
                self.store.set_next(anchor, first);
                self.store.set_prev(first, anchor);
                self.store.set_next(last, after);
                if after == NIL {
                    self.tail = last;
                } else {
                    self.store.set_prev(after, last);
                }
            },
            Side::Before => {
                let before = self.store.prev(anchor);
                self.store.set_prev(anchor, last);
                self.store.set_next(last, anchor);
                self.store.set_prev(first, before);
                if before == NIL {
                    self.head = first;
                } else {
                    self.store.set_next(before, first);
                }
            },
        }
    }
}

/// Number of nodes in the run `from..=to`, or `None` if `to` is not reachable.
fn run_length<T>(source: &SlotList<T>, from: u32, to: u32) -> Option<usize> {
    let mut cursor = from;
    for count in 1..=source.len() {
        if cursor == to {
            return Some(count);
        }
        cursor = source.store.next(cursor);
        if cursor == NIL {
            return None;
        }
    }
    None
}
