// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String dictionary: every term and page name, keyed by sort rank.
//!
//! Terms and page names share one key space. Sorting the union by byte value
//! and numbering in that order means a key is just a position in the table,
//! and iterating terms in string order visits their keys in ascending order.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::binary::{ByteSource, CaseMode, StringTable, TableWriter};
use crate::error::{Error, Result};

use super::PageTerms;

/// Sorted, deduplicated strings. Key `k` is `strings[k]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    strings: Vec<String>,
}

impl Dictionary {
    /// Dictionary of every page name and every term in `pages`.
    pub fn build(pages: &[PageTerms]) -> Result<Self> {
        let mut strings: BTreeSet<&str> = BTreeSet::new();
        for page in pages {
            strings.insert(page.name.as_str());
            strings.extend(page.terms.iter().map(String::as_str));
        }
        Self::from_sorted(strings.into_iter().map(str::to_string).collect())
    }

    /// Dictionary of arbitrary strings.
    pub fn from_strings<I, S>(strings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = strings.into_iter().map(Into::into).collect();
        Self::from_sorted(set.into_iter().collect())
    }

    fn from_sorted(strings: Vec<String>) -> Result<Self> {
        if u32::try_from(strings.len()).is_err() {
            return Err(Error::DictionaryOverflow(strings.len()));
        }
        Ok(Self { strings })
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Key of `value`, if present.
    pub fn key(&self, value: &str) -> Option<u32> {
        self.strings
            .binary_search_by(|probe| probe.as_str().cmp(value))
            .ok()
            .map(|index| index as u32)
    }

    /// String stored under `key`.
    pub fn get(&self, key: u32) -> Option<&str> {
        self.strings.get(key as usize).map(String::as_str)
    }

    /// Write every string in key order.
    pub fn write<W: Write>(&self, writer: &mut TableWriter<W>) -> io::Result<()> {
        for value in &self.strings {
            writer.push_string(value)?;
        }
        Ok(())
    }
}

/// Exact-case string → key resolution, in memory or on disk.
pub trait KeyResolver {
    fn resolve(&self, value: &str) -> io::Result<Option<u32>>;
}

impl KeyResolver for Dictionary {
    fn resolve(&self, value: &str) -> io::Result<Option<u32>> {
        Ok(self.key(value))
    }
}

impl<S: ByteSource> KeyResolver for StringTable<S> {
    fn resolve(&self, value: &str) -> io::Result<Option<u32>> {
        self.find(value, CaseMode::Exact)
    }
}
