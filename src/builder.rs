//! Builder and plain-data configuration for [`SlotList`].
//!
//! [`ListConfig`] captures the construction parameters (initial capacity and
//! the access gate) as plain data, optionally (de)serializable with the
//! `serde` feature. [`SlotListBuilder`] validates them and builds the list.
//!
//! ## Example
//!
//! ```rust
//! use nodekit::builder::SlotListBuilder;
//! use nodekit::ds::Access;
//!
//! let mut list = SlotListBuilder::new()
//!     .capacity(16)
//!     .access(Access::ReadWrite)
//!     .build::<u64>();
//! list.push_back(7).unwrap();
//! assert_eq!(list.capacity(), 16);
//! ```

use std::ops::Range;

use crate::ds::gate::{Access, AccessGate};
use crate::ds::node_store::{MAX_SLOTS, MIN_CAPACITY};
use crate::ds::slot_list::SlotList;
use crate::error::ConfigError;

/// Construction parameters for a [`SlotList`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    /// Number of slots to allocate up front. Clamped up to `MIN_CAPACITY`.
    pub initial_capacity: usize,
    /// Permission granted to callers.
    pub access: Access,
    /// Optional restriction to a half-open slot range.
    pub range: Option<Range<usize>>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            initial_capacity: MIN_CAPACITY,
            access: Access::ReadWrite,
            range: None,
        }
    }
}

impl ListConfig {
    /// Checks the parameters without allocating.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity > MAX_SLOTS {
            return Err(ConfigError::new(format!(
                "initial_capacity {} exceeds the maximum of {} slots",
                self.initial_capacity, MAX_SLOTS
            )));
        }
        if let Some(range) = &self.range {
            if range.start > range.end {
                return Err(ConfigError::new(format!(
                    "range {:?} is inverted (start > end)",
                    range
                )));
            }
        }
        Ok(())
    }

    /// Access gate described by this configuration.
    pub fn gate(&self) -> AccessGate {
        AccessGate::new(self.access, self.range.clone())
    }
}

/// Builder for [`SlotList`].
#[derive(Debug, Clone, Default)]
pub struct SlotListBuilder {
    config: ListConfig,
}

impl SlotListBuilder {
    /// Creates a builder with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: ListConfig) -> Self {
        Self { config }
    }

    /// Sets the initial capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Sets the access permission.
    pub fn access(mut self, access: Access) -> Self {
        self.config.access = access;
        self
    }

    /// Restricts the list to `range`.
    pub fn range(mut self, range: Range<usize>) -> Self {
        self.config.range = Some(range);
        self
    }

    /// Returns the configuration assembled so far.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Builds the list.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid or the initial allocation
    /// fails. Use [`try_build`](Self::try_build) to handle either case.
    pub fn build<T>(self) -> SlotList<T> {
        match self.try_build() {
            Ok(list) => list,
            Err(err) => panic!("invalid list configuration: {}", err),
        }
    }

    /// Builds the list, returning an error for invalid parameters.
    pub fn try_build<T>(self) -> Result<SlotList<T>, ConfigError> {
        self.config.validate()?;
        let mut list = SlotList::try_new(self.config.initial_capacity)?;
        list.set_gate(self.config.gate());
        Ok(list)
    }
}
