// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query engine over an opened index.
//!
//! Nothing is loaded up front beyond the atlas lengths. Each query is a few
//! binary searches into the string table plus one keyed lookup per term, all
//! as positioned reads, so a single [`IndexHandle`] can serve any number of
//! threads at once.
//!
//! Missing terms and unknown pages are answers, not errors: they produce an
//! empty set. Errors mean a table file could not be read or does not decode.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::binary::{ByteSource, CaseMode, KeyedTable, StringTable, Table, ATLAS_ENTRY_SIZE};
use crate::config::{IndexPaths, TablePaths};
use crate::error::{Error, Result};
use crate::tokenize::tokenize;

/// The tables of an index, opened read-only.
///
/// The link table is absent when the handle came from [`open_text_index`].
#[derive(Debug)]
pub struct IndexHandle<S = File> {
    strings: StringTable<S>,
    terms: KeyedTable<S>,
    links: Option<KeyedTable<S>>,
}

/// Open all three tables in `index_dir`.
pub fn open_index(index_dir: &Path) -> Result<IndexHandle> {
    let mut handle = open_text_index(index_dir)?;
    let (atlas, data) = open_pair(&IndexPaths::new(index_dir).links())?;
    let links = KeyedTable::open(atlas, data).map_err(Error::corrupt("link"))?;
    debug!(links = links.len(), "opened link table");

    handle.links = Some(links);
    Ok(handle)
}

/// Open only the string and term tables of `index_dir`.
///
/// Enough for [`query_fulltext`], and works right after the full-text phase.
pub fn open_text_index(index_dir: &Path) -> Result<IndexHandle> {
    let paths = IndexPaths::new(index_dir);
    let (atlas, data) = open_pair(&paths.strings())?;
    let strings = StringTable::open(atlas, data).map_err(Error::corrupt("string"))?;
    let (atlas, data) = open_pair(&paths.terms())?;
    let terms = KeyedTable::open(atlas, data).map_err(Error::corrupt("term"))?;

    debug!(
        strings = strings.len(),
        terms = terms.len(),
        dir = %index_dir.display(),
        "opened index"
    );

    Ok(IndexHandle::text_only(strings, terms))
}

pub(crate) fn open_pair(paths: &TablePaths) -> Result<(File, File)> {
    if !paths.exists() {
        let missing = if paths.atlas.is_file() {
            &paths.data
        } else {
            &paths.atlas
        };
        return Err(Error::MissingTable {
            table: paths.name,
            path: missing.clone(),
        });
    }
    let atlas = File::open(&paths.atlas).map_err(|e| Error::io(&paths.atlas, e))?;
    let data = File::open(&paths.data).map_err(|e| Error::io(&paths.data, e))?;
    Ok((atlas, data))
}

impl<S: ByteSource> IndexHandle<S> {
    /// Assemble a handle from already-opened tables.
    pub fn from_tables(strings: StringTable<S>, terms: KeyedTable<S>, links: KeyedTable<S>) -> Self {
        Self {
            strings,
            terms,
            links: Some(links),
        }
    }

    /// Assemble a handle that can answer full-text queries only.
    pub fn text_only(strings: StringTable<S>, terms: KeyedTable<S>) -> Self {
        Self {
            strings,
            terms,
            links: None,
        }
    }

    pub fn strings(&self) -> &StringTable<S> {
        &self.strings
    }

    pub fn terms(&self) -> &KeyedTable<S> {
        &self.terms
    }

    pub fn links(&self) -> Option<&KeyedTable<S>> {
        self.links.as_ref()
    }

    fn resolve_names(&self, keys: BTreeSet<u32>) -> Result<BTreeSet<String>> {
        keys.into_iter()
            .map(|key| self.strings.get(key).map_err(Error::corrupt("string")))
            .collect()
    }
}

/// Pages containing every term of `query_text`.
///
/// The query goes through the same tokenizer as page text. A term the
/// dictionary does not know can never match, so one unknown term empties the
/// whole result. Postings are intersected starting from the smallest term key.
pub fn query_fulltext<S: ByteSource>(
    handle: &IndexHandle<S>,
    query_text: &str,
) -> Result<BTreeSet<String>> {
    let mut keys = Vec::new();
    for term in tokenize(query_text) {
        match handle
            .strings
            .find(&term, CaseMode::Fold)
            .map_err(Error::corrupt("string"))?
        {
            Some(key) => keys.push(key),
            None => {
                debug!(%term, "unknown term, no matches");
                return Ok(BTreeSet::new());
            }
        }
    }

    keys.sort_unstable();
    let Some((&first, rest)) = keys.split_first() else {
        return Ok(BTreeSet::new());
    };

    let mut pages = handle.terms.find(first).map_err(Error::corrupt("term"))?;
    for &key in rest {
        if pages.is_empty() {
            break;
        }
        let postings = handle.terms.find(key).map_err(Error::corrupt("term"))?;
        pages.retain(|page| postings.contains(page));
    }

    handle.resolve_names(pages)
}

/// Pages that link to `page_name` (exact case).
///
/// Fails with [`Error::MissingTable`] on a handle opened without links.
pub fn query_backlinks<S: ByteSource>(
    handle: &IndexHandle<S>,
    page_name: &str,
) -> Result<BTreeSet<String>> {
    let Some(links) = &handle.links else {
        return Err(Error::MissingTable {
            table: "link",
            path: PathBuf::from("link.atlas"),
        });
    };

    let key = handle
        .strings
        .find(page_name, CaseMode::Exact)
        .map_err(Error::corrupt("string"))?;
    let Some(key) = key else {
        return Ok(BTreeSet::new());
    };

    let referrers = links.find(key).map_err(Error::corrupt("link"))?;
    handle.resolve_names(referrers)
}

/// Size of one table on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub name: &'static str,
    pub entries: usize,
    pub atlas_bytes: u64,
    pub data_bytes: u64,
}

/// Entry counts and file sizes for whichever tables exist in `index_dir`.
///
/// Unlike [`open_index`] a missing table is skipped, so this works between
/// the full-text and links phases.
pub fn inspect_index(index_dir: &Path) -> Result<Vec<TableInfo>> {
    let mut infos = Vec::new();
    for paths in IndexPaths::new(index_dir).all() {
        if !paths.exists() {
            continue;
        }
        let (atlas, data) = open_pair(&paths)?;
        let table = Table::open(atlas, data).map_err(Error::corrupt(paths.name))?;
        let atlas_bytes = table.len() as u64 * ATLAS_ENTRY_SIZE;
        infos.push(TableInfo {
            name: paths.name,
            entries: table.len(),
            atlas_bytes,
            data_bytes: table.data_len(),
        });
    }
    Ok(infos)
}
