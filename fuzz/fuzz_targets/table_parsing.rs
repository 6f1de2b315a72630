// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Table readers under adversarial atlas and data files.
//!
//! A truncated or hand-edited index should produce an error from `find` or
//! `get`, never a panic, an out-of-bounds read or a search that never ends.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wikindex::binary::{CaseMode, KeyedTable, StringTable};

#[derive(Arbitrary, Debug)]
struct Input {
    atlas: Vec<u8>,
    data: Vec<u8>,
    key: u32,
    value: String,
}

fuzz_target!(|input: Input| {
    if let Ok(table) = StringTable::open(input.atlas.clone(), input.data.clone()) {
        let _ = table.get(input.key);
        let _ = table.find(&input.value, CaseMode::Exact);
        let _ = table.find(&input.value, CaseMode::Fold);
    }

    if let Ok(table) = KeyedTable::open(input.atlas, input.data) {
        let _ = table.find(input.key);
        for index in 0..table.len().min(16) {
            let _ = table.entry(index);
        }
    }
});
