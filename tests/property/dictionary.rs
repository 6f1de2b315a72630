//! Dictionary round trips through the on-disk string table.

use proptest::prelude::*;
use std::collections::BTreeSet;
use wikindex::binary::{CaseMode, StringTable, TableWriter};
use wikindex::build::Dictionary;

fn string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z0-9]{1,12}",
        1 => "[A-Z][a-z]{1,6}[A-Z][a-z]{1,6}",
        1 => "\\PC{0,8}",
    ]
}

fn table_for(dict: &Dictionary) -> StringTable<Vec<u8>> {
    let mut writer = TableWriter::new(Vec::new(), Vec::new());
    dict.write(&mut writer).unwrap();
    let (atlas, data) = writer.finish().unwrap();
    StringTable::open(atlas, data).unwrap()
}

proptest! {
    /// Property: lookup by value then by position gives back the value
    #[test]
    fn prop_value_position_round_trip(
        strings in prop::collection::btree_set(string_strategy(), 0..60)
    ) {
        let dict = Dictionary::from_strings(strings.iter().cloned()).unwrap();
        let table = table_for(&dict);
        prop_assert_eq!(table.len(), strings.len());

        for value in &strings {
            let key = table.find(value, CaseMode::Exact).unwrap();
            prop_assert!(key.is_some(), "{:?} not found", value);
            prop_assert_eq!(&table.get(key.unwrap()).unwrap(), value);
        }
    }

    /// Property: strings that were never inserted are not found
    #[test]
    fn prop_absent_strings_not_found(
        strings in prop::collection::btree_set("[a-m]{1,6}", 0..40),
        probes in prop::collection::vec("[a-z]{1,6}", 1..20),
    ) {
        let dict = Dictionary::from_strings(strings.iter().cloned()).unwrap();
        let table = table_for(&dict);

        for probe in probes {
            let found = table.find(&probe, CaseMode::Exact).unwrap();
            prop_assert_eq!(found.is_some(), strings.contains(&probe));
        }
    }

    /// Property: keys are dense sort ranks
    #[test]
    fn prop_keys_are_sort_ranks(
        strings in prop::collection::vec(string_strategy(), 0..40)
    ) {
        let dict = Dictionary::from_strings(strings.iter().cloned()).unwrap();
        let sorted: BTreeSet<&String> = strings.iter().collect();
        for (rank, value) in sorted.into_iter().enumerate() {
            prop_assert_eq!(dict.key(value), Some(rank as u32));
        }
    }
}
