//! nodekit: an index-addressed doubly linked list with generation-stamped
//! handles, access gating and partitioned parallel access.
//!
//! The central type is [`SlotList`](ds::SlotList). Nodes live in dense
//! parallel buffers; links are slot indices, so the whole structure can be
//! compacted into logical order, spliced in bulk, and split into disjoint
//! slot ranges for worker threads.
//!
//! ```
//! use nodekit::prelude::*;
//!
//! let mut list = SlotListBuilder::new().capacity(8).build::<&str>();
//! let b = list.push_back("b").unwrap();
//! list.push_front("a").unwrap();
//! list.insert_after(b, "c").unwrap();
//! assert_eq!(list.to_vec().unwrap(), vec!["a", "b", "c"]);
//!
//! list.sort_node_memory_addresses().unwrap();
//! assert_eq!(list[0], "a");
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod prelude;
