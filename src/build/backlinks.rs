// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Backlinks: the outbound link graph, reversed.
//!
//! Each page contributes the wiki links it makes. Inverting gives, for every
//! target, the pages that reference it. Targets that are not known titles,
//! or that the dictionary cannot resolve, are dropped when the table is
//! written. Dead links are normal on a wiki.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use tracing::debug;

use crate::binary::TableWriter;

use super::KeyResolver;

/// The outbound wiki links of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub name: String,
    pub links: BTreeSet<String>,
}

/// Counts reported after writing the backlink table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BacklinkStats {
    pub written: usize,
    pub dropped_targets: usize,
    pub dropped_referrers: usize,
}

/// Target page → pages linking to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backlinks {
    inbound: BTreeMap<String, BTreeSet<String>>,
}

impl Backlinks {
    pub fn build(pages: &[PageLinks]) -> Self {
        let mut inbound: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for page in pages {
            for target in &page.links {
                inbound
                    .entry(target.clone())
                    .or_default()
                    .insert(page.name.clone());
            }
        }
        Self { inbound }
    }

    /// Number of distinct link targets, known or not.
    pub fn len(&self) -> usize {
        self.inbound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inbound.is_empty()
    }

    pub fn referrers(&self, target: &str) -> Option<&BTreeSet<String>> {
        self.inbound.get(target)
    }

    /// Write one entry per resolvable target, ascending by target key.
    pub fn write<W, R>(
        &self,
        dict: &R,
        titles: &BTreeSet<String>,
        writer: &mut TableWriter<W>,
    ) -> io::Result<BacklinkStats>
    where
        W: Write,
        R: KeyResolver + ?Sized,
    {
        let mut stats = BacklinkStats::default();
        let mut entries: Vec<(u32, Vec<u32>)> = Vec::new();

        for (target, referrers) in &self.inbound {
            let key = if titles.contains(target) {
                dict.resolve(target)?
            } else {
                None
            };
            let Some(key) = key else {
                stats.dropped_targets += 1;
                continue;
            };

            let mut members = Vec::with_capacity(referrers.len());
            for referrer in referrers {
                match dict.resolve(referrer)? {
                    Some(referrer_key) => members.push(referrer_key),
                    None => {
                        debug!(page = %referrer, "referrer not in dictionary, skipped");
                        stats.dropped_referrers += 1;
                    }
                }
            }
            members.sort_unstable();
            entries.push((key, members));
        }

        entries.sort_unstable_by_key(|(key, _)| *key);
        for (key, members) in &entries {
            writer.push_keyed(*key, members)?;
        }
        stats.written = entries.len();
        Ok(stats)
    }
}
