//! Runtime access gate: read/write permission plus an index-range restriction.
//!
//! Every [`SlotList`](crate::ds::SlotList) operation consults a gate before it
//! touches storage. The gate models static partitioning of one list across
//! concurrently scheduled workers: each worker gets a disjoint index range and
//! a permission, and the gate turns violations into errors instead of data
//! races. It performs no locking.
//!
//! ## Architecture
//!
//! ```text
//!   AccessGate { access: ReadWrite, range: Some(4..8) }
//!
//!   slots:   0   1   2   3 │ 4   5   6   7 │ 8   9
//!                          └───── allowed ─┘
//!
//!   per-element  check_index(5)   ─► Ok
//!   per-element  check_index(9)   ─► OutOfRange { 9..10, 4..8 }
//!   whole        check_whole(10)  ─► OutOfRange { 0..10, 4..8 }
//! ```
//!
//! ## Rules
//! - Permission is checked first; a missing permission is an
//!   [`AccessViolation`](crate::error::ListError::AccessViolation).
//! - Whole-structure operations (growth, insertion, removal, sort, dispose,
//!   traversal copies) require the restriction to equal `0..len`, or no
//!   restriction at all.
//! - Per-element operations require the touched index to be occupied and,
//!   when restricted, to fall inside the range.

use std::fmt;
use std::ops::Range;

use crate::error::ListError;

/// Permission level granted by an [`AccessGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Access {
    /// Nothing may be read or written.
    None,
    /// Reads only.
    ReadOnly,
    /// Reads and writes.
    #[default]
    ReadWrite,
}

impl Access {
    /// Returns `true` if this level permits reads.
    #[inline]
    pub fn can_read(self) -> bool {
        !matches!(self, Access::None)
    }

    /// Returns `true` if this level permits writes.
    #[inline]
    pub fn can_write(self) -> bool {
        matches!(self, Access::ReadWrite)
    }

    /// Returns `true` if this level grants everything `required` needs.
    #[inline]
    pub fn permits(self, required: Access) -> bool {
        match required {
            Access::None => true,
            Access::ReadOnly => self.can_read(),
            Access::ReadWrite => self.can_write(),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Access::None => "no",
            Access::ReadOnly => "read",
            Access::ReadWrite => "read-write",
        })
    }
}

/// Permission and index-range restriction consulted by every list operation.
///
/// `range` is half-open. `None` means the full occupied range is in force.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessGate {
    access: Access,
    range: Option<Range<usize>>,
}

impl AccessGate {
    /// Full read-write access with no range restriction.
    pub const fn full() -> Self {
        Self {
            access: Access::ReadWrite,
            range: None,
        }
    }

    /// Unrestricted read-only access.
    pub const fn read_only() -> Self {
        Self {
            access: Access::ReadOnly,
            range: None,
        }
    }

    /// Creates a gate with the given permission and optional restriction.
    pub fn new(access: Access, range: Option<Range<usize>>) -> Self {
        Self { access, range }
    }

    /// Returns the granted permission.
    #[inline]
    pub fn access(&self) -> Access {
        self.access
    }

    /// Replaces the granted permission.
    pub fn set_access(&mut self, access: Access) {
        self.access = access;
    }

    /// Returns the range restriction, if any.
    #[inline]
    pub fn range(&self) -> Option<&Range<usize>> {
        self.range.as_ref()
    }

    /// Restricts per-element access to `range`.
    pub fn restrict(&mut self, range: Range<usize>) {
        self.range = Some(range);
    }

    /// Lifts any range restriction.
    pub fn unrestrict(&mut self) {
        self.range = None;
    }

    /// Returns `true` when no range restriction is in force.
    #[inline]
    pub fn is_unrestricted(&self) -> bool {
        self.range.is_none()
    }

    /// Indices currently allowed for a structure holding `len` slots.
    pub fn allowed(&self, len: usize) -> Range<usize> {
        match &self.range {
            Some(range) => range.clone(),
            None => 0..len,
        }
    }

    /// Fails unless the permission covers `required`.
    #[inline]
    pub fn check_permission(&self, required: Access) -> Result<(), ListError> {
        if self.access.permits(required) {
            Ok(())
        } else {
            Err(ListError::AccessViolation { required })
        }
    }

    /// Validates a whole-structure operation over `len` occupied slots.
    pub fn check_whole(&self, len: usize, required: Access) -> Result<(), ListError> {
        self.check_permission(required)?;
        match &self.range {
            None => Ok(()),
            Some(range) if covers_exactly(range, len) => Ok(()),
            Some(range) => Err(ListError::OutOfRange {
                requested: 0..len,
                allowed: range.clone(),
            }),
        }
    }

    /// Validates a per-element access to `index` among `len` occupied slots.
    pub fn check_index(&self, index: usize, len: usize, required: Access) -> Result<(), ListError> {
        self.check_permission(required)?;
        let allowed = self.allowed(len);
        if index < len && allowed.contains(&index) {
            Ok(())
        } else {
            Err(ListError::OutOfRange {
                requested: index..index.saturating_add(1),
                allowed,
            })
        }
    }
}

fn covers_exactly(range: &Range<usize>, len: usize) -> bool {
    if len == 0 {
        range.is_empty()
    } else {
        range.start == 0 && range.end == len
    }
}
