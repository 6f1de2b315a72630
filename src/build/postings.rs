// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term postings: which pages contain each term.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use crate::binary::TableWriter;

use super::Dictionary;

/// The distinct terms of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTerms {
    pub name: String,
    pub terms: BTreeSet<String>,
}

/// Term → pages containing it, keyed by term string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postings {
    by_term: BTreeMap<String, BTreeSet<String>>,
}

impl Postings {
    pub fn build(pages: &[PageTerms]) -> Self {
        let mut by_term: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for page in pages {
            for term in &page.terms {
                by_term
                    .entry(term.clone())
                    .or_default()
                    .insert(page.name.clone());
            }
        }
        Self { by_term }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.by_term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_term.is_empty()
    }

    pub fn pages(&self, term: &str) -> Option<&BTreeSet<String>> {
        self.by_term.get(term)
    }

    /// Write one entry per term, visiting terms in string order.
    ///
    /// Dictionary keys are sort ranks, so string order is key order and the
    /// table comes out ascending without a second sort. Every term and page
    /// must be in `dict`.
    pub fn write<W: Write>(&self, dict: &Dictionary, writer: &mut TableWriter<W>) -> io::Result<()> {
        let mut members = Vec::new();
        for (term, pages) in &self.by_term {
            let key = dict_key(dict, term)?;
            members.clear();
            for page in pages {
                members.push(dict_key(dict, page)?);
            }
            members.sort_unstable();
            writer.push_keyed(key, &members)?;
        }
        Ok(())
    }
}

fn dict_key(dict: &Dictionary, value: &str) -> io::Result<u32> {
    dict.key(value).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{:?} is missing from the dictionary", value),
        )
    })
}
