//! Generation-stamped node handles.
//!
//! A [`NodeHandle`] is an `(index, generation, list id)` triple. It names a
//! logical node of one [`SlotList`](crate::ds::SlotList) and is valid only
//! while the list's generation matches the stamp. The list bumps its
//! generation whenever slot identities may have been permuted (remove, sort,
//! clear, dispose), so a handle never silently points at a relocated node.
//!
//! ```text
//!   handle { index: 2, generation: 7, list: #3 }
//!                │              │          │
//!                │              │          └── must equal list.id()
//!                │              └───────────── must equal list.generation()
//!                └──────────────────────────── must be < list.len()
//! ```
//!
//! Invalid is absorbing: once the generation moves on, the handle never
//! becomes valid again.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::ds::node_store::NIL;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a list instance; handles carry it to reject cross-list use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(u64);

impl ListId {
    /// Identity carried by [`NodeHandle::INVALID`]; no list ever owns it.
    pub const NONE: ListId = ListId(0);

    pub(crate) fn fresh() -> Self {
        ListId(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identity value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Opaque reference to a logical list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: u32,
    generation: u64,
    list: ListId,
}

impl NodeHandle {
    /// A handle that is invalid for every list.
    pub const INVALID: NodeHandle = NodeHandle {
        index: NIL,
        generation: 0,
        list: ListId::NONE,
    };

    pub(crate) fn new(index: u32, generation: u64, list: ListId) -> Self {
        if index == NIL {
            return Self::INVALID;
        }
        Self {
            index,
            generation,
            list,
        }
    }

    /// Physical slot index at issue time, or `None` for a null handle.
    pub fn index(&self) -> Option<usize> {
        (self.index != NIL).then_some(self.index as usize)
    }

    /// Generation stamp at issue time.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Identity of the issuing list.
    pub fn list_id(&self) -> ListId {
        self.list
    }

    /// Returns `true` if this handle refers to no slot at all.
    ///
    /// A non-null handle may still be stale; only the list can tell.
    pub fn is_null(&self) -> bool {
        self.index == NIL
    }

    /// Resolves the handle against a list state, returning its slot index.
    #[inline]
    pub(crate) fn resolve(&self, len: usize, generation: u64, list: ListId) -> Option<u32> {
        if self.index != NIL
            && (self.index as usize) < len
            && self.generation == generation
            && self.list == list
        {
            Some(self.index)
        } else {
            None
        }
    }
}

impl Default for NodeHandle {
    fn default() -> Self {
        Self::INVALID
    }
}
