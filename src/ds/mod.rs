pub mod compact;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod gate;
pub mod handle;
pub(crate) mod node_store;
pub mod partition;
pub mod slot_list;
pub mod splice;

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentSlotList;
pub use gate::{Access, AccessGate};
pub use handle::{ListId, NodeHandle};
pub use node_store::{MAX_SLOTS, MIN_CAPACITY};
pub use partition::{ReadPartition, WritePartition, partition_ranges};
pub use slot_list::{Iter, SlotList};
