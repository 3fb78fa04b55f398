// ==============================================
// SLOT LIST SCENARIO TESTS (integration)
// ==============================================
//
// End-to-end behaviour of the public surface: growth, removal return
// handles, gating of whole-structure operations, disposal, compaction and
// splicing, exercised only through `nodekit`'s exported API.

use nodekit::builder::SlotListBuilder;
use nodekit::ds::{Access, AccessGate, NodeHandle, SlotList};
use nodekit::error::ListError;

/// Routes list events to the test output; `RUST_LOG=nodekit=trace` shows
/// slot relocations.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn list_of(values: &[i32]) -> SlotList<i32> {
    let mut list = SlotList::new(values.len());
    for &v in values {
        list.push_back(v).unwrap();
    }
    list
}

// ==============================================
// Growth and removal
// ==============================================

mod growth_and_removal {
    use super::*;

    #[test]
    fn push_past_capacity_doubles_and_remove_head_returns_successor() {
        let mut list = SlotList::new(2);
        let head = list.push_back(10).unwrap();
        list.push_back(20).unwrap();
        list.push_back(30).unwrap();
        assert_eq!(list.capacity(), 4);
        assert_eq!(list.to_vec().unwrap(), vec![10, 20, 30]);

        let next = list.remove(head).unwrap();
        assert_eq!(list.to_vec().unwrap(), vec![20, 30]);
        assert_eq!(list.value(next).unwrap(), Some(&20));
    }

    #[test]
    fn remove_interior_returns_predecessor() {
        let mut list = SlotList::new(4);
        list.push_back(10).unwrap();
        let twenty = list.push_back(20).unwrap();
        list.push_back(30).unwrap();
        list.push_back(40).unwrap();

        let prev = list.remove(twenty).unwrap();
        assert_eq!(list.value(prev).unwrap(), Some(&10));
        assert_eq!(list.to_vec().unwrap(), vec![10, 30, 40]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_tail_returns_new_tail() {
        let mut list = list_of(&[1, 2, 3]);
        let tail = list.tail().unwrap();
        let prev = list.remove(tail).unwrap();
        assert_eq!(list.value(prev).unwrap(), Some(&2));
        assert_eq!(list.back().unwrap(), Some(&2));
    }

    #[test]
    fn removing_sole_node_empties_the_list() {
        let mut list = list_of(&[7]);
        let only = list.head().unwrap();
        let result = list.remove(only).unwrap();
        assert!(result.is_null());
        assert!(list.is_empty());
        assert!(list.head().unwrap().is_null());
        assert!(list.tail().unwrap().is_null());
    }

    #[test]
    fn removal_preserves_relative_order() {
        let mut list = list_of(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let mut cursor = list.head().unwrap();
        // drop every odd value while walking forward
        while !cursor.is_null() {
            let value = *list.value(cursor).unwrap().unwrap();
            if value % 2 == 1 {
                let prev = list.remove(cursor).unwrap();
                cursor = list.next(prev).unwrap();
            } else {
                cursor = list.next(cursor).unwrap();
            }
        }
        assert_eq!(list.to_vec().unwrap(), vec![0, 2, 4, 6]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn capacity_always_covers_length() {
        let mut list = SlotList::new(1);
        for i in 0..100 {
            if i % 3 == 0 {
                list.push_front(i).unwrap();
            } else {
                list.push_back(i).unwrap();
            }
            assert_eq!(list.len(), i as usize + 1);
            assert!(list.capacity() >= list.len());
        }
    }
}

// ==============================================
// Handles
// ==============================================

mod handles {
    use super::*;

    #[test]
    fn stale_handles_are_no_ops() {
        let mut list = list_of(&[1, 2, 3]);
        let stale = list.head().unwrap();
        list.pop_back().unwrap();
        assert!(!list.is_valid(stale));

        assert_eq!(list.insert_after(stale, 99).unwrap(), NodeHandle::INVALID);
        assert_eq!(list.remove(stale).unwrap(), NodeHandle::INVALID);
        assert_eq!(list.value(stale).unwrap(), None);
        assert_eq!(list.to_vec().unwrap(), vec![1, 2]);
    }

    #[test]
    fn handles_from_another_list_are_rejected() {
        let mut a = list_of(&[1, 2]);
        let b = list_of(&[1, 2]);
        let foreign = b.head().unwrap();
        assert!(!a.is_valid(foreign));
        assert_eq!(a.remove(foreign).unwrap(), NodeHandle::INVALID);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn inserts_keep_handles_valid() {
        let mut list = list_of(&[1, 3]);
        let one = list.head().unwrap();
        let three = list.tail().unwrap();
        list.insert_after(one, 2).unwrap();
        list.push_front(0).unwrap();
        assert!(list.is_valid(one));
        assert!(list.is_valid(three));
        assert_eq!(list.value(three).unwrap(), Some(&3));
    }

    #[test]
    fn traversal_takes_exactly_len_steps() {
        let list = list_of(&[5, 6, 7, 8]);
        let mut forward = Vec::new();
        let mut cursor = list.head().unwrap();
        while !cursor.is_null() {
            forward.push(*list.value(cursor).unwrap().unwrap());
            cursor = list.next(cursor).unwrap();
        }
        assert_eq!(forward, list.to_vec().unwrap());

        let mut backward = Vec::new();
        let mut cursor = list.tail().unwrap();
        while !cursor.is_null() {
            backward.push(*list.value(cursor).unwrap().unwrap());
            cursor = list.prev(cursor).unwrap();
        }
        assert_eq!(backward, list.to_vec_reverse().unwrap());
    }
}

// ==============================================
// Access gate
// ==============================================

mod gating {
    use super::*;

    fn restricted() -> SlotList<i32> {
        let mut list = list_of(&[1, 2, 3, 4]);
        list.set_gate(AccessGate::new(Access::ReadWrite, Some(1..3)));
        list
    }

    #[test]
    fn whole_structure_ops_reject_a_strict_sub_range() {
        let mut list = restricted();
        assert!(list.sort_node_memory_addresses().unwrap_err().is_out_of_range());
        assert!(list.reserve(16).unwrap_err().is_out_of_range());
        assert!(list.grow_to(64).unwrap_err().is_out_of_range());
        assert!(list.push_back(5).unwrap_err().is_out_of_range());
        assert!(list.dispose().unwrap_err().is_out_of_range());
        assert!(!list.is_disposed());
    }

    #[test]
    fn element_access_respects_the_range() {
        let mut list = restricted();
        assert_eq!(list.at(1).unwrap(), &2);
        *list.at_mut(2).unwrap() = 30;
        assert!(list.at(0).unwrap_err().is_out_of_range());
        assert!(list.at(3).unwrap_err().is_out_of_range());

        list.gate_mut().unrestrict();
        assert_eq!(list.to_vec().unwrap(), vec![1, 2, 30, 4]);
    }

    #[test]
    fn read_only_gate_blocks_every_write() {
        let mut list = list_of(&[1, 2]);
        list.gate_mut().set_access(Access::ReadOnly);
        let head = list.head().unwrap();
        let denied = ListError::AccessViolation {
            required: Access::ReadWrite,
        };
        assert_eq!(list.push_back(3), Err(denied.clone()));
        assert_eq!(list.remove(head), Err(denied.clone()));
        assert_eq!(list.at_mut(0).map(|_| ()), Err(denied));
        assert_eq!(list.to_vec().unwrap(), vec![1, 2]);
    }

    #[test]
    fn no_access_blocks_reads() {
        let list = SlotListBuilder::new().access(Access::None).build::<i32>();
        assert_eq!(
            list.head(),
            Err(ListError::AccessViolation {
                required: Access::ReadOnly
            })
        );
    }

    #[test]
    fn failed_calls_leave_state_untouched() {
        let mut list = restricted();
        let generation = list.generation();
        let head = list.head().unwrap();
        assert!(list.remove(head).is_err());
        assert!(list.pop_front().is_err());
        assert_eq!(list.generation(), generation);
        list.gate_mut().unrestrict();
        assert_eq!(list.to_vec().unwrap(), vec![1, 2, 3, 4]);
    }
}

// ==============================================
// Disposal
// ==============================================

mod disposal {
    use super::*;

    #[test]
    fn every_call_after_dispose_fails() {
        init_tracing();
        let mut list = list_of(&[1, 2, 3]);
        let head = list.head().unwrap();
        list.dispose().unwrap();

        assert!(list.is_disposed());
        assert!(!list.is_valid(head));
        assert_eq!(list.len(), 0);
        assert_eq!(list.push_back(4), Err(ListError::UseAfterDispose));
        assert_eq!(list.head(), Err(ListError::UseAfterDispose));
        assert_eq!(list.to_vec(), Err(ListError::UseAfterDispose));
        assert_eq!(list.dispose(), Err(ListError::UseAfterDispose));
        assert_eq!(
            list.sort_node_memory_addresses(),
            Err(ListError::UseAfterDispose)
        );
    }
}

// ==============================================
// Compaction and splicing
// ==============================================

mod compaction_and_splice {
    use super::*;

    #[test]
    fn sort_aligns_slots_with_logical_order_after_mixed_history() {
        init_tracing();
        let mut list = SlotList::new(4);
        let mut handles = Vec::new();
        for v in 0..12 {
            handles.push(if v % 2 == 0 {
                list.push_back(v).unwrap()
            } else {
                list.push_front(v).unwrap()
            });
        }
        let h = list.handle_at(5).unwrap();
        list.insert_before(h, 100).unwrap();
        let h = list.handle_at(2).unwrap();
        list.remove(h).unwrap();

        let logical = list.to_vec().unwrap();
        list.sort_node_memory_addresses().unwrap();
        assert_eq!(list.to_vec().unwrap(), logical);
        for (i, v) in logical.iter().enumerate() {
            assert_eq!(&list[i], v);
        }
        assert_eq!(list.sort_node_memory_addresses().unwrap(), 0);
    }

    #[test]
    fn splice_whole_list_after_handle() {
        let mut a = list_of(&[1, 2, 3]);
        let b = list_of(&[10, 20]);
        let two = a.handle_at(1).unwrap();
        let first = a.insert_list_after(two, &b).unwrap();
        assert_eq!(a.value(first).unwrap(), Some(&10));
        assert_eq!(a.to_vec().unwrap(), vec![1, 2, 10, 20, 3]);
        assert_eq!(b.to_vec().unwrap(), vec![10, 20]);
        a.check_invariants().unwrap();
    }

    #[test]
    fn splice_sub_range_before_head() {
        let mut a = list_of(&[1, 2]);
        let b = list_of(&[5, 6, 7, 8]);
        let first = b.handle_at(1).unwrap();
        let last = b.handle_at(2).unwrap();
        let head = a.head().unwrap();
        a.insert_range_before(head, &b, first, last).unwrap();
        assert_eq!(a.to_vec().unwrap(), vec![6, 7, 1, 2]);
        assert_eq!(a.front().unwrap(), Some(&6));
    }

    #[test]
    fn empty_splice_is_a_no_op() {
        let mut a = list_of(&[1]);
        let empty: SlotList<i32> = SlotList::new(4);
        let head = a.head().unwrap();
        assert_eq!(a.insert_list_after(head, &empty).unwrap(), head);
        assert_eq!(a.to_vec().unwrap(), vec![1]);
    }

    #[test]
    fn splice_into_empty_list_uses_invalid_anchor() {
        let mut a: SlotList<i32> = SlotList::new(4);
        let b = list_of(&[3, 4]);
        let first = a.insert_list_after(NodeHandle::INVALID, &b).unwrap();
        assert_eq!(a.value(first).unwrap(), Some(&3));
        assert_eq!(a.to_vec().unwrap(), vec![3, 4]);
    }

    #[test]
    fn repeated_snapshots_are_equal() {
        let list = list_of(&[4, 5, 6]);
        assert_eq!(list.to_vec().unwrap(), list.to_vec().unwrap());
        let mut out = [0; 3];
        assert_eq!(list.copy_to_slice(&mut out).unwrap(), 3);
        assert_eq!(out, [4, 5, 6]);
    }
}
