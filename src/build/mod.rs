// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline index construction.
//!
//! Two phases, runnable separately:
//!
//! 1. **full-text**: tokenize every page, build the string dictionary and the
//!    term postings table (`str.*`, `term.*`).
//! 2. **links**: extract every page's wiki links, invert them and write the
//!    backlink table (`link.*`), resolving names through the string table the
//!    first phase left on disk.
//!
//! Pages are read and scanned in parallel when the `parallel` feature is on.
//! Everything is sorted before it is written, so the order pages come back
//! from the filesystem (or from the thread pool) never changes the output and
//! rebuilding an unchanged corpus gives byte-identical files.
//!
//! Any I/O failure aborts the build. Each table file is truncated and fully
//! rewritten, so a failed run is fixed by running it again.

pub mod backlinks;
pub mod corpus;
pub mod dictionary;
pub mod postings;

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufWriter};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::binary::{StringTable, TableWriter};
use crate::config::{IndexPaths, TablePaths};
use crate::error::{Error, Result};
use crate::html::{extract_links, extract_terms};
use crate::query::open_pair;
use crate::title::is_title;

pub use backlinks::{BacklinkStats, Backlinks, PageLinks};
pub use corpus::{Corpus, Page};
pub use dictionary::{Dictionary, KeyResolver};
pub use postings::{PageTerms, Postings};

/// Counts from a build run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub strings: usize,
    pub terms: usize,
    pub links: Option<BacklinkStats>,
}

/// Create a progress style for the build progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Read every page and run `scan` over its source.
#[cfg(feature = "parallel")]
fn scan_pages<T, F>(pages: &[Page], label: &str, scan: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Page, &str) -> T + Sync + Send,
{
    let progress = ProgressBar::new(pages.len() as u64);
    progress.set_style(create_progress_style());
    progress.set_prefix(label.to_string());

    let result = pages
        .par_iter()
        .map(|page| {
            let html = page.read()?;
            let out = scan(page, &html);
            progress.inc(1);
            Ok(out)
        })
        .collect::<Result<Vec<T>>>();

    progress.finish_with_message(format!("{} pages", pages.len()));
    result
}

/// Read every page and run `scan` over its source.
#[cfg(not(feature = "parallel"))]
fn scan_pages<T, F>(pages: &[Page], _label: &str, scan: F) -> Result<Vec<T>>
where
    F: Fn(&Page, &str) -> T,
{
    pages
        .iter()
        .map(|page| {
            let html = page.read()?;
            Ok(scan(page, &html))
        })
        .collect()
}

/// Per-page term sets for the whole corpus.
pub fn collect_terms(pages: &[Page]) -> Result<Vec<PageTerms>> {
    scan_pages(pages, "Indexing", |page, html| PageTerms {
        name: page.name.clone(),
        terms: extract_terms(html),
    })
}

/// Per-page outbound link sets for the whole corpus.
pub fn collect_links(pages: &[Page]) -> Result<Vec<PageLinks>> {
    scan_pages(pages, "Linking", |page, html| PageLinks {
        name: page.name.clone(),
        links: extract_links(html),
    })
}

/// Truncate and rewrite one table pair, filling it with `fill`.
fn write_table<T, F>(paths: &TablePaths, fill: F) -> Result<(T, usize)>
where
    F: FnOnce(&mut TableWriter<BufWriter<File>>) -> io::Result<T>,
{
    let atlas = File::create(&paths.atlas).map_err(|e| Error::io(&paths.atlas, e))?;
    let data = File::create(&paths.data).map_err(|e| Error::io(&paths.data, e))?;
    let mut writer = TableWriter::new(BufWriter::new(atlas), BufWriter::new(data));

    let out = fill(&mut writer).map_err(|e| Error::io(&paths.data, e))?;
    let entries = writer.len();
    writer.finish().map_err(|e| Error::io(&paths.data, e))?;

    info!(table = paths.name, entries, "wrote table");
    Ok((out, entries))
}

fn create_index_dir(index: &IndexPaths) -> Result<()> {
    fs::create_dir_all(index.dir()).map_err(|e| Error::io(index.dir(), e))
}

/// Phase 1: string dictionary and term postings.
pub fn run_full_text(corpus: &Corpus, index: &IndexPaths) -> Result<BuildSummary> {
    let pages = corpus.pages()?;
    info!(pages = pages.len(), corpus = %corpus.dir().display(), "indexing page text");

    let page_terms = collect_terms(&pages)?;
    let dict = Dictionary::build(&page_terms)?;
    let postings = Postings::build(&page_terms);

    create_index_dir(index)?;
    let ((), strings) = write_table(&index.strings(), |writer| dict.write(writer))?;
    let ((), terms) = write_table(&index.terms(), |writer| postings.write(&dict, writer))?;

    Ok(BuildSummary {
        pages: pages.len(),
        strings,
        terms,
        links: None,
    })
}

/// Phase 2: backlinks. Needs the string table from phase 1.
pub fn run_links(corpus: &Corpus, index: &IndexPaths) -> Result<BuildSummary> {
    let strings_paths = index.strings();
    let (atlas, data) = open_pair(&strings_paths)?;
    let dict = StringTable::open(atlas, data).map_err(Error::corrupt("string"))?;

    let pages = corpus.pages()?;
    info!(pages = pages.len(), corpus = %corpus.dir().display(), "indexing page links");

    let titles: BTreeSet<String> = pages
        .iter()
        .map(|page| page.name.clone())
        .filter(|name| is_title(name))
        .collect();
    let page_links = collect_links(&pages)?;
    let backlinks = Backlinks::build(&page_links);

    create_index_dir(index)?;
    let (stats, _) = write_table(&index.links(), |writer| {
        backlinks.write(&dict, &titles, writer)
    })?;
    info!(
        written = stats.written,
        dropped_targets = stats.dropped_targets,
        dropped_referrers = stats.dropped_referrers,
        "backlinks resolved"
    );

    Ok(BuildSummary {
        pages: pages.len(),
        strings: dict.len(),
        terms: 0,
        links: Some(stats),
    })
}

/// Single-pass build: phase 1, then phase 2 when `with_links` is set.
pub fn run_build(corpus: &Corpus, index: &IndexPaths, with_links: bool) -> Result<BuildSummary> {
    let mut summary = run_full_text(corpus, index)?;
    if with_links {
        summary.links = run_links(corpus, index)?.links;
    }
    Ok(summary)
}
