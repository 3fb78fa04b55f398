//! Compaction pass: makes physical slot order equal logical list order.
//!
//! Walks the chain from the head. At logical position `i` the current node
//! sits at some slot `cur >= i` (the prefix `[0, i)` is already placed). If
//! `cur != i` the node occupying slot `i` is evicted to `cur` and the walk's
//! view of the remaining chain is patched to follow it. Once the walk is done
//! every link is rewritten to `i - 1` / `i + 1`.
//!
//! ```text
//!   before:  slot  0   1   2   3          chain: C ─► A ─► D ─► B
//!                  A   B   C   D
//!   i=0: C at 2 ─ swap(0, 2) ─►  C B A D
//!   i=1: A at 2 ─ swap(1, 2) ─►  C A B D
//!   i=2: D at 3 ─ swap(2, 3) ─►  C A D B
//!   i=3: B at 3 ─ in place
//! ```

use tracing::debug;

use crate::ds::node_store::NIL;
use crate::ds::slot_list::SlotList;
use crate::error::ListError;

impl<T> SlotList<T> {
    /// Reorders slots so that `list[i]` is the `i`-th node in logical order.
    ///
    /// O(n), whole-structure. Returns the number of slots whose payload
    /// moved; a second consecutive call moves nothing. Always bumps the
    /// generation.
    pub fn sort_node_memory_addresses(&mut self) -> Result<usize, ListError> {
        self.check_structural()?;
        let len = self.len();
        let mut relocated = 0usize;
        let mut current = self.head;

        for i in 0..len as u32 {
            let mut next = self.store.next(current);
            if current != i {
                // the node at slot `i` is not placed yet; it moves to `current`
                let evicted_prev = self.store.prev(i);
                let evicted_next = self.store.next(i);
                self.store.swap_values(i, current);
                self.store.set_prev(current, evicted_prev);
                self.store.set_next(current, evicted_next);

                if evicted_prev == current {
                    self.store.set_prev(current, i);
                } else if evicted_prev != NIL {
                    self.store.set_next(evicted_prev, current);
                }
                if evicted_next != NIL {
                    self.store.set_prev(evicted_next, current);
                }
                if next == i {
                    next = current;
                }
                relocated += 1;
            }
            current = next;
        }

        self.store.relink_sequential();
        if len == 0 {
            self.head = NIL;
            self.tail = NIL;
        } else {
            self.head = 0;
            self.tail = (len - 1) as u32;
        }
        self.bump_generation();
        debug!(list = self.id.get(), len, relocated, "compacted node order");
        Ok(relocated)
    }
}

#[cfg(test)]
mod tests {
    use crate::ds::gate::Access;
    use crate::ds::slot_list::SlotList;

    fn assert_positional(list: &SlotList<i32>) {
        let logical = list.to_vec().unwrap();
        for (i, v) in logical.iter().enumerate() {
            assert_eq!(&list[i], v, "slot {} out of order", i);
        }
        list.check_invariants().unwrap();
    }

    #[test]
    fn sort_restores_positional_order_after_front_pushes() {
        let mut list = SlotList::new(4);
        for v in 0..10 {
            list.push_front(v).unwrap();
        }
        assert_eq!(list[0], 0);
        list.sort_node_memory_addresses().unwrap();
        assert_eq!(list.to_vec().unwrap(), (0..10).rev().collect::<Vec<_>>());
        assert_positional(&list);
    }

    #[test]
    fn sort_handles_the_documented_permutation() {
        // chain C, A, D, B over slots A=0, B=1, C=2, D=3
        let mut list = SlotList::new(4);
        let a = list.push_back(0).unwrap();
        let b = list.push_back(1).unwrap();
        list.insert_before(a, 2).unwrap();
        list.insert_before(b, 3).unwrap();
        assert_eq!(list.to_vec().unwrap(), vec![2, 0, 3, 1]);

        let moved = list.sort_node_memory_addresses().unwrap();
        assert_eq!(moved, 3);
        assert_positional(&list);
    }

    #[test]
    fn sort_after_removals_and_inserts() {
        let mut list = SlotList::new(4);
        let mut handles = Vec::new();
        for v in 0..8 {
            handles.push(list.push_back(v).unwrap());
        }
        let mid = list.insert_after(handles[3], 100).unwrap();
        list.insert_before(mid, 99).unwrap();
        let h = list.handle_at(0).unwrap();
        let h = list.remove(h).unwrap();
        let h = list.next(h).unwrap();
        list.remove(h).unwrap();

        let expected = list.to_vec().unwrap();
        list.sort_node_memory_addresses().unwrap();
        assert_eq!(list.to_vec().unwrap(), expected);
        assert_positional(&list);
    }

    #[test]
    fn second_sort_moves_nothing_but_bumps_generation() {
        let mut list = SlotList::new(4);
        for v in 0..6 {
            list.push_front(v).unwrap();
        }
        assert!(list.sort_node_memory_addresses().unwrap() > 0);
        let generation = list.generation();
        let head = list.head().unwrap();
        assert_eq!(list.sort_node_memory_addresses().unwrap(), 0);
        assert_eq!(list.generation(), generation + 1);
        assert!(!list.is_valid(head));
    }

    #[test]
    fn sort_on_empty_and_single() {
        let mut list: SlotList<i32> = SlotList::new(4);
        assert_eq!(list.sort_node_memory_addresses().unwrap(), 0);
        list.check_invariants().unwrap();
        list.push_back(1).unwrap();
        assert_eq!(list.sort_node_memory_addresses().unwrap(), 0);
        assert_positional(&list);
    }

    #[test]
    fn sort_requires_whole_write_access() {
        let mut list = SlotList::new(4);
        list.push_back(1).unwrap();
        list.push_back(2).unwrap();
        list.gate_mut().restrict(0..1);
        assert!(list.sort_node_memory_addresses().unwrap_err().is_out_of_range());
        list.gate_mut().unrestrict();
        list.gate_mut().set_access(Access::ReadOnly);
        assert!(list.sort_node_memory_addresses().is_err());
        assert_eq!(list.generation(), 1);
    }
}
