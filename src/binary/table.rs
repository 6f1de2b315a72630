// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Atlas/data table pairs: the writer used at build time and the readers used
//! at query time.
//!
//! Every table is two files. The data file holds the entries back to back.
//! The atlas holds one 8-byte offset per entry, so entry `i` starts at
//! `atlas[i]` and the entry count is `atlas_len / 8`. Entries are written in
//! strictly ascending key order, which is what lets the readers binary search
//! without ever scanning the data file.
//!
//! ```text
//! atlas:  [off_0][off_1][off_2] ...          8 bytes each, i64 LE
//!            │      │      └──────────────┐
//!            ▼      ▼                     ▼
//! data:   [entry_0][entry_1 ............][entry_2] ...
//!
//! string entry:  varint(len) utf8[len]
//! keyed entry:   key:u32 count:u32 member:u32 × count
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::io::{self, Write};

use super::encoding::{
    decode_offset, decode_varint, encode_keyed_entry, encode_string, write_offset,
    ATLAS_ENTRY_SIZE, KEY_SIZE, MAX_VARINT_BYTES,
};
use super::source::ByteSource;

// ============================================================================
// BINARY SEARCH
// ============================================================================

/// Binary search over `len` sorted entries.
///
/// `probe(i)` compares entry `i` against the target and reports whether the
/// entry is `Less`, `Equal` or `Greater`. The window bounds are inclusive and
/// a miss moves a bound onto the midpoint rather than past it, so a window of
/// exactly two candidates is checked explicitly: floor division would keep
/// picking the lower one forever when the match is the upper bound.
pub fn binary_search_by<F>(len: usize, mut probe: F) -> io::Result<Option<usize>>
where
    F: FnMut(usize) -> io::Result<Ordering>,
{
    if len == 0 {
        return Ok(None);
    }

    let mut lower = 0;
    let mut upper = len - 1;

    loop {
        if lower == upper {
            return Ok((probe(lower)? == Ordering::Equal).then_some(lower));
        }

        if lower == upper - 1 {
            if probe(lower)? == Ordering::Equal {
                return Ok(Some(lower));
            }
            return Ok((probe(upper)? == Ordering::Equal).then_some(upper));
        }

        let mid = lower + (upper - lower) / 2;
        match probe(mid)? {
            Ordering::Equal => return Ok(Some(mid)),
            Ordering::Less => lower = mid,
            Ordering::Greater => upper = mid,
        }
    }
}

// ============================================================================
// WRITER
// ============================================================================

/// Streams entries into an atlas/data pair.
///
/// Rejects out-of-order entries: a table that is not strictly ascending would
/// silently break every binary search against it.
pub struct TableWriter<W: Write> {
    atlas: W,
    data: W,
    offset: u64,
    entries: usize,
    last_key: Option<u32>,
    last_string: Option<String>,
    buf: Vec<u8>,
}

impl<W: Write> TableWriter<W> {
    pub fn new(atlas: W, data: W) -> Self {
        Self {
            atlas,
            data,
            offset: 0,
            entries: 0,
            last_key: None,
            last_string: None,
            buf: Vec::new(),
        }
    }

    /// Append a string entry. Strings must arrive in ascending byte order.
    pub fn push_string(&mut self, value: &str) -> io::Result<()> {
        if let Some(last) = &self.last_string {
            if last.as_bytes() >= value.as_bytes() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("String entry {:?} is not after {:?}", value, last),
                ));
            }
        }

        self.buf.clear();
        encode_string(value, &mut self.buf)?;
        self.write_entry()?;
        self.last_string = Some(value.to_string());
        Ok(())
    }

    /// Append a keyed entry. Keys must arrive in ascending numeric order.
    pub fn push_keyed(&mut self, key: u32, members: &[u32]) -> io::Result<()> {
        if let Some(last) = self.last_key {
            if last >= key {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Key {} is not after {}", key, last),
                ));
            }
        }

        self.buf.clear();
        encode_keyed_entry(key, members, &mut self.buf)?;
        self.write_entry()?;
        self.last_key = Some(key);
        Ok(())
    }

    fn write_entry(&mut self) -> io::Result<()> {
        write_offset(&mut self.atlas, self.offset)?;
        self.data.write_all(&self.buf)?;
        self.offset += self.buf.len() as u64;
        self.entries += 1;
        Ok(())
    }

    /// Number of entries written so far.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Flush both outputs and hand them back.
    pub fn finish(mut self) -> io::Result<(W, W)> {
        self.atlas.flush()?;
        self.data.flush()?;
        Ok((self.atlas, self.data))
    }
}

// ============================================================================
// READERS
// ============================================================================

/// Raw access to an atlas/data pair.
#[derive(Debug)]
pub struct Table<S> {
    atlas: S,
    data: S,
    len: usize,
    data_len: u64,
}

impl<S: ByteSource> Table<S> {
    pub fn open(atlas: S, data: S) -> io::Result<Self> {
        let atlas_len = atlas.byte_len()?;
        if atlas_len % ATLAS_ENTRY_SIZE != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Atlas length {} is not a multiple of {}",
                    atlas_len, ATLAS_ENTRY_SIZE
                ),
            ));
        }
        let len = usize::try_from(atlas_len / ATLAS_ENTRY_SIZE)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Atlas too large"))?;
        let data_len = data.byte_len()?;

        Ok(Self {
            atlas,
            data,
            len,
            data_len,
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the data file in bytes.
    pub fn data_len(&self) -> u64 {
        self.data_len
    }

    /// Byte offset of entry `index` in the data file.
    pub fn entry_offset(&self, index: usize) -> io::Result<u64> {
        if index >= self.len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Entry {} out of range (table has {})", index, self.len),
            ));
        }

        let mut raw = [0u8; 8];
        self.atlas
            .read_exact_at(index as u64 * ATLAS_ENTRY_SIZE, &mut raw)?;
        let offset = decode_offset(raw)?;
        if offset >= self.data_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Atlas entry {} points at {} past data end {}",
                    index, offset, self.data_len
                ),
            ));
        }
        Ok(offset)
    }

    fn read_u32_at(&self, offset: u64) -> io::Result<u32> {
        let mut raw = [0u8; 4];
        self.data.read_exact_at(offset, &mut raw)?;
        Ok(u32::from_le_bytes(raw))
    }

    /// Raw bytes of the string entry starting at `offset`.
    fn read_string_at(&self, offset: u64) -> io::Result<Vec<u8>> {
        let available = (self.data_len - offset).min(MAX_VARINT_BYTES as u64) as usize;
        let mut prefix = [0u8; MAX_VARINT_BYTES];
        self.data.read_exact_at(offset, &mut prefix[..available])?;
        let (len, consumed) = decode_varint(&prefix[..available])?;

        let start = offset + consumed as u64;
        if start + len as u64 > self.data_len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("String at {} runs past end of data", offset),
            ));
        }

        let mut bytes = vec![0u8; len as usize];
        self.data.read_exact_at(start, &mut bytes)?;
        Ok(bytes)
    }

    /// Key and members of the keyed entry starting at `offset`.
    fn read_keyed_at(&self, offset: u64) -> io::Result<(u32, Vec<u32>)> {
        let key = self.read_u32_at(offset)?;
        let count = self.read_u32_at(offset + KEY_SIZE)? as u64;

        let start = offset + 2 * KEY_SIZE;
        let needed = count * KEY_SIZE;
        if start + needed > self.data_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Entry for key {} claims {} members past end of data", key, count),
            ));
        }

        let mut raw = vec![0u8; needed as usize];
        self.data.read_exact_at(start, &mut raw)?;
        let members = raw
            .chunks_exact(KEY_SIZE as usize)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok((key, members))
    }
}

/// How a string lookup treats the case of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    /// Compare the query as given (page names).
    Exact,
    /// Lowercase the query before comparing (search terms).
    Fold,
}

/// The string dictionary: entry `k` is the string with key `k`.
#[derive(Debug)]
pub struct StringTable<S> {
    table: Table<S>,
}

impl<S: ByteSource> StringTable<S> {
    pub fn open(atlas: S, data: S) -> io::Result<Self> {
        Ok(Self {
            table: Table::open(atlas, data)?,
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &Table<S> {
        &self.table
    }

    /// The string stored under `key` (lookup by position).
    pub fn get(&self, key: u32) -> io::Result<String> {
        let offset = self.table.entry_offset(key as usize).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidInput {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Dictionary key {} out of range", key),
                )
            } else {
                e
            }
        })?;
        let bytes = self.table.read_string_at(offset)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// The key of `value` (lookup by value), or `None` when it is absent.
    pub fn find(&self, value: &str, mode: CaseMode) -> io::Result<Option<u32>> {
        let folded;
        let target = match mode {
            CaseMode::Exact => value.as_bytes(),
            CaseMode::Fold => {
                folded = value.to_ascii_lowercase();
                folded.as_bytes()
            }
        };

        let found = binary_search_by(self.table.len(), |index| {
            let offset = self.table.entry_offset(index)?;
            let stored = self.table.read_string_at(offset)?;
            Ok(stored.as_slice().cmp(target))
        })?;
        Ok(found.map(|index| index as u32))
    }
}

/// A table of `key → set of keys` entries sorted by key (postings, backlinks).
#[derive(Debug)]
pub struct KeyedTable<S> {
    table: Table<S>,
}

impl<S: ByteSource> KeyedTable<S> {
    pub fn open(atlas: S, data: S) -> io::Result<Self> {
        Ok(Self {
            table: Table::open(atlas, data)?,
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &Table<S> {
        &self.table
    }

    /// Entry at position `index`: its key and member keys as stored.
    pub fn entry(&self, index: usize) -> io::Result<(u32, Vec<u32>)> {
        let offset = self.table.entry_offset(index)?;
        self.table.read_keyed_at(offset)
    }

    /// Members stored under `key`; empty when the key has no entry.
    pub fn find(&self, key: u32) -> io::Result<BTreeSet<u32>> {
        let found = binary_search_by(self.table.len(), |index| {
            let offset = self.table.entry_offset(index)?;
            Ok(self.table.read_u32_at(offset)?.cmp(&key))
        })?;

        match found {
            Some(index) => Ok(self.entry(index)?.1.into_iter().collect()),
            None => Ok(BTreeSet::new()),
        }
    }
}
