//! Binary search over keyed tables, checked against a linear scan.
//!
//! Sizes 0, 1 and 2 get their own tests: the two-entry window is the case
//! where a floor midpoint can stall on the lower bound.

use proptest::prelude::*;
use std::cell::Cell;
use std::collections::BTreeSet;
use wikindex::binary::{binary_search_by, KeyedTable, TableWriter};

fn keyed_table(keys: &[u32]) -> KeyedTable<Vec<u8>> {
    let mut writer = TableWriter::new(Vec::new(), Vec::new());
    for &key in keys {
        writer.push_keyed(key, &[key.wrapping_mul(3), key]).unwrap();
    }
    let (atlas, data) = writer.finish().unwrap();
    KeyedTable::open(atlas, data).unwrap()
}

fn search(sorted: &[u32], target: u32) -> (Option<usize>, usize) {
    let probes = Cell::new(0);
    let found = binary_search_by(sorted.len(), |i| {
        probes.set(probes.get() + 1);
        Ok(sorted[i].cmp(&target))
    })
    .unwrap();
    (found, probes.get())
}

#[test]
fn test_empty_table() {
    assert_eq!(search(&[], 5).0, None);
    assert!(keyed_table(&[]).find(5).unwrap().is_empty());
}

#[test]
fn test_single_entry() {
    assert_eq!(search(&[5], 5).0, Some(0));
    assert_eq!(search(&[5], 4).0, None);
    assert_eq!(search(&[5], 6).0, None);
}

#[test]
fn test_two_entries_terminate() {
    for target in 0..6 {
        let (found, probes) = search(&[2, 4], target);
        let expected = match target {
            2 => Some(0),
            4 => Some(1),
            _ => None,
        };
        assert_eq!(found, expected, "target {}", target);
        assert!(probes <= 2, "two entries need at most two probes");
    }
}

#[test]
fn test_upper_of_two_found_in_keyed_table() {
    let table = keyed_table(&[10, 20]);
    assert_eq!(table.find(20).unwrap(), BTreeSet::from([20, 60]));
    assert_eq!(table.find(10).unwrap(), BTreeSet::from([10, 30]));
}

proptest! {
    /// Property: every present key is found at its position, every absent key is not
    #[test]
    fn prop_matches_linear_scan(
        keys in prop::collection::btree_set(0u32..1000, 0..200),
        target in 0u32..1000,
    ) {
        let sorted: Vec<u32> = keys.iter().copied().collect();
        let (found, probes) = search(&sorted, target);

        prop_assert_eq!(found, sorted.iter().position(|&k| k == target));
        // log2(200) plus the two-entry check
        prop_assert!(probes <= 12, "{} probes for {} entries", probes, sorted.len());
    }

    /// Property: keyed table finds exactly the members written for a key
    #[test]
    fn prop_keyed_table_lookup(
        keys in prop::collection::btree_set(0u32..500, 0..100),
        target in 0u32..500,
    ) {
        let sorted: Vec<u32> = keys.iter().copied().collect();
        let table = keyed_table(&sorted);
        let found = table.find(target).unwrap();

        if keys.contains(&target) {
            prop_assert_eq!(found, BTreeSet::from([target, target.wrapping_mul(3)]));
        } else {
            prop_assert!(found.is_empty());
        }
    }

    /// Property: Less always means "look right"
    #[test]
    fn prop_probe_order_consistent(len in 1usize..300) {
        let target = len / 3;
        let found = binary_search_by(len, |i| Ok::<_, std::io::Error>(i.cmp(&target))).unwrap();
        prop_assert_eq!(found, Some(target));
    }
}
