#![no_main]

use libfuzzer_sys::fuzz_target;
use nodekit::ds::{Access, SlotList};

// Fuzz arbitrary operation sequences on SlotList
//
// Tests random sequences of push_front, push_back, insert_after,
// insert_before, remove, pop_front, pop_back, sort, clear, gate toggles and
// cursor walks. Handles are collected as issued; most of them go stale, which
// must always be a silent no-op.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: SlotList<u32> = SlotList::new(4);
    let mut handles = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 12;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                // push_front
                let h = list.push_front(value).unwrap();
                handles.push(h);
                assert_eq!(list.front().unwrap(), Some(&value));
                assert!(list.is_valid(h));
            }
            1 => {
                // push_back
                let h = list.push_back(value).unwrap();
                handles.push(h);
                assert_eq!(list.back().unwrap(), Some(&value));
                assert!(list.is_valid(h));
            }
            2 => {
                // insert_after
                if !handles.is_empty() {
                    let at = handles[(value as usize) % handles.len()];
                    let old_len = list.len();
                    let h = list.insert_after(at, value).unwrap();
                    if list.is_valid(at) {
                        assert_eq!(list.len(), old_len + 1);
                        assert_eq!(list.next(at).unwrap(), h);
                        handles.push(h);
                    } else {
                        assert!(h.is_null());
                        assert_eq!(list.len(), old_len);
                    }
                }
            }
            3 => {
                // insert_before
                if !handles.is_empty() {
                    let at = handles[(value as usize) % handles.len()];
                    let old_len = list.len();
                    let h = list.insert_before(at, value).unwrap();
                    if list.is_valid(at) {
                        assert_eq!(list.len(), old_len + 1);
                        assert_eq!(list.prev(at).unwrap(), h);
                        handles.push(h);
                    } else {
                        assert!(h.is_null());
                        assert_eq!(list.len(), old_len);
                    }
                }
            }
            4 => {
                // remove
                if !handles.is_empty() {
                    let h = handles[(value as usize) % handles.len()];
                    let old_len = list.len();
                    let was_valid = list.is_valid(h);
                    let returned = list.remove(h).unwrap();
                    if was_valid {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.is_valid(h));
                        if !list.is_empty() {
                            assert!(list.is_valid(returned));
                            handles.push(returned);
                        }
                    } else {
                        assert_eq!(list.len(), old_len);
                    }
                }
            }
            5 => {
                // pop_front
                let old_len = list.len();
                let popped = list.pop_front().unwrap();
                if popped.is_some() {
                    assert_eq!(list.len(), old_len - 1);
                } else {
                    assert_eq!(list.len(), 0);
                }
            }
            6 => {
                // pop_back
                let old_len = list.len();
                let popped = list.pop_back().unwrap();
                if popped.is_some() {
                    assert_eq!(list.len(), old_len - 1);
                } else {
                    assert_eq!(list.len(), 0);
                }
            }
            7 => {
                // sort_node_memory_addresses
                let before = list.to_vec().unwrap();
                list.sort_node_memory_addresses().unwrap();
                assert_eq!(list.to_vec().unwrap(), before);
                for (i, v) in before.iter().enumerate() {
                    assert_eq!(&list[i], v);
                }
            }
            8 => {
                // read-only gate rejects writes without mutating
                list.gate_mut().set_access(Access::ReadOnly);
                let old_len = list.len();
                assert!(list.push_back(value).is_err());
                assert!(list.pop_front().is_err());
                assert_eq!(list.len(), old_len);
                list.gate_mut().set_access(Access::ReadWrite);
            }
            9 => {
                // forward cursor walk
                let mut steps = 0;
                let mut cursor = list.head().unwrap();
                while !cursor.is_null() {
                    steps += 1;
                    cursor = list.next(cursor).unwrap();
                }
                assert_eq!(steps, list.len());
            }
            10 => {
                // backward cursor walk
                let mut steps = 0;
                let mut cursor = list.tail().unwrap();
                while !cursor.is_null() {
                    steps += 1;
                    cursor = list.prev(cursor).unwrap();
                }
                assert_eq!(steps, list.len());
            }
            11 => {
                // clear
                list.clear().unwrap();
                for h in &handles {
                    assert!(!list.is_valid(*h));
                }
                handles.clear();
                assert!(list.is_empty());
                assert_eq!(list.front().unwrap(), None);
                assert_eq!(list.back().unwrap(), None);
            }
            _ => unreachable!(),
        }

        assert!(list.capacity() >= list.len());
        assert!(list.check_invariants().is_ok());

        idx += 2;
    }
});
