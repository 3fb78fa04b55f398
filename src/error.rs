//! Error types for the nodekit library.
//!
//! ## Key Components
//!
//! - [`ListError`]: Returned by [`SlotList`](crate::ds::SlotList) operations
//!   that the access gate rejects, that run out of memory, or that touch a
//!   disposed list.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//! - [`ConfigError`]: Returned when list configuration parameters are invalid
//!   (e.g. capacity beyond the index space, inverted ranges).
//!
//! A stale or default [`NodeHandle`](crate::ds::NodeHandle) is deliberately
//! *not* an error: the insert/remove family treats it as a no-op and hands
//! back [`NodeHandle::INVALID`](crate::ds::NodeHandle::INVALID).
//!
//! ## Example Usage
//!
//! ```
//! use nodekit::ds::{Access, SlotList};
//! use nodekit::error::ListError;
//!
//! let mut list = SlotList::new(4);
//! list.push_back(1).unwrap();
//!
//! list.gate_mut().set_access(Access::ReadOnly);
//! let err = list.push_back(2).unwrap_err();
//! assert!(matches!(err, ListError::AccessViolation { .. }));
//! ```

use std::fmt;
use std::ops::Range;

use crate::ds::gate::Access;

// ---------------------------------------------------------------------------
// ListError
// ---------------------------------------------------------------------------

/// Error returned by list operations.
///
/// Every variant is raised before any mutation takes place, so a failed call
/// leaves the list exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The requested indices fall outside the range the access gate permits.
    ///
    /// Per-element accesses request `i..i + 1`; whole-structure operations
    /// request `0..len`.
    #[error("index range {requested:?} is outside the permitted range {allowed:?}")]
    OutOfRange {
        /// Indices the operation needed.
        requested: Range<usize>,
        /// Indices the gate currently allows.
        allowed: Range<usize>,
    },

    /// The gate's permission does not allow the attempted access.
    #[error("access violation: operation requires {required} permission")]
    AccessViolation {
        /// Permission the operation needed.
        required: Access,
    },

    /// The backing store could not grow to the requested slot count.
    #[error("allocation failure: could not grow to {requested} slots")]
    AllocationFailure {
        /// Slot count that could not be allocated.
        requested: usize,
    },

    /// The list has been disposed.
    #[error("list used after dispose")]
    UseAfterDispose,
}

impl ListError {
    /// Returns `true` for [`ListError::OutOfRange`].
    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// A broken link chain found by
/// [`SlotList::check_invariants`](crate::ds::SlotList::check_invariants).
///
/// The message names the first failure of the two-way walk: length above
/// capacity, a head or tail that disagrees with the length, a walk that leaves
/// the occupied slots `0..len`, a slot reached twice, a `prev` link that does
/// not point back at the slot it was reached from, or a walk that fails to end
/// at the opposite end after `len` steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Rejected [`ListConfig`](crate::builder::ListConfig) from
/// [`SlotListBuilder::try_build`](crate::builder::SlotListBuilder::try_build).
///
/// Raised when `initial_capacity` does not fit the `u32` slot index space,
/// when the gate range is inverted, or when the initial node store cannot be
/// allocated (converted from [`ListError::AllocationFailure`]).
///
/// # Example
///
/// ```
/// use nodekit::builder::SlotListBuilder;
///
/// let err = SlotListBuilder::new().range(5..2).try_build::<u32>().unwrap_err();
/// assert!(err.to_string().contains("range"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

impl From<ListError> for ConfigError {
    fn from(err: ListError) -> Self {
        Self(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
