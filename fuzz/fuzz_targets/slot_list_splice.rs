#![no_main]

use libfuzzer_sys::fuzz_target;
use nodekit::ds::{NodeHandle, SlotList};

// Fuzz splicing between two lists
//
// Builds a destination and a source list from the input, then splices the
// whole source or a sub-range of it next to a chosen node, comparing the
// result with the same splice performed on plain vectors.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let split = usize::from(data[0]) % (data.len() - 3) + 1;
    let (dest_bytes, source_bytes) = data[4..].split_at(split.min(data.len() - 4));
    let selector = data[1];
    let lo = usize::from(data[2]);
    let span = usize::from(data[3]);

    let mut dest: SlotList<u8> = SlotList::new(4);
    for &b in dest_bytes {
        dest.push_back(b).unwrap();
    }
    let mut source: SlotList<u8> = SlotList::new(4);
    for &b in source_bytes {
        source.push_back(b).unwrap();
    }

    let mut expected: Vec<u8> = dest_bytes.to_vec();
    let at_pos = if dest_bytes.is_empty() {
        0
    } else {
        usize::from(selector) % dest_bytes.len()
    };
    let at = if dest_bytes.is_empty() {
        NodeHandle::INVALID
    } else {
        dest.handle_at(at_pos).unwrap()
    };
    let after = selector & 0x80 != 0;
    let whole = selector & 0x40 != 0 || source_bytes.is_empty();

    let (inserted, first): (Vec<u8>, NodeHandle) = if whole {
        let first = if after {
            dest.insert_list_after(at, &source).unwrap()
        } else {
            dest.insert_list_before(at, &source).unwrap()
        };
        (source_bytes.to_vec(), first)
    } else {
        let from = lo % source_bytes.len();
        let to = from + span % (source_bytes.len() - from);
        let fh = source.handle_at(from).unwrap();
        let th = source.handle_at(to).unwrap();
        let first = if after {
            dest.insert_range_after(at, &source, fh, th).unwrap()
        } else {
            dest.insert_range_before(at, &source, fh, th).unwrap()
        };
        (source_bytes[from..=to].to_vec(), first)
    };

    let insert_pos = if expected.is_empty() {
        0
    } else if after {
        at_pos + 1
    } else {
        at_pos
    };
    expected.splice(insert_pos..insert_pos, inserted.iter().copied());

    assert_eq!(dest.to_vec().unwrap(), expected);
    assert_eq!(source.to_vec().unwrap(), source_bytes.to_vec());
    if !inserted.is_empty() {
        assert_eq!(dest.value(first).unwrap(), Some(&inserted[0]));
    }
    if !dest_bytes.is_empty() {
        assert!(dest.is_valid(at));
    }
    assert!(dest.check_invariants().is_ok());
});
