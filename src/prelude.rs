pub use crate::builder::{ListConfig, SlotListBuilder};
#[cfg(feature = "concurrency")]
pub use crate::ds::ConcurrentSlotList;
pub use crate::ds::{
    Access, AccessGate, ListId, NodeHandle, ReadPartition, SlotList, WritePartition,
};
pub use crate::error::{ConfigError, InvariantError, ListError};
