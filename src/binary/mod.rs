// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk format for wiki indexes.
//!
//! An index directory holds three independent tables, each an atlas/data file
//! pair:
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────┐
//! │ str.atlas / str.idx      │ every term and page name, sorted by byte │
//! │                          │ value; key = position                    │
//! ├──────────────────────────┼──────────────────────────────────────────┤
//! │ term.atlas / term.idx    │ term key → page keys containing the term │
//! ├──────────────────────────┼──────────────────────────────────────────┤
//! │ link.atlas / link.idx    │ page key → page keys linking to it       │
//! └──────────────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian. Atlas entries are 8-byte signed offsets,
//! keyed entries use 4-byte fields, and strings carry a 7-bit varint length.
//! Tables are immutable once written; a rebuild rewrites every file.

mod encoding;
mod source;
mod table;

pub use encoding::{
    decode_offset, decode_string, decode_varint, encode_keyed_entry, encode_string,
    encode_varint, write_offset, write_u32, ATLAS_ENTRY_SIZE, KEY_SIZE, MAX_VARINT_BYTES,
};
pub use source::ByteSource;
pub use table::{binary_search_by, CaseMode, KeyedTable, StringTable, Table, TableWriter};
