// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Wiki titles: page names made of two or more CamelCase words.
//!
//! Title search and random page selection work on the title list in memory;
//! neither needs the on-disk tables.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::build::Corpus;
use crate::error::Result;

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z][a-z]+){2,}$").expect("title pattern is valid")
});

/// `WikiWiki` and `FrontPage` are titles; `Wiki`, `wiki` and `HTMLPage` are not.
pub fn is_title(name: &str) -> bool {
    TITLE.is_match(name)
}

/// Names of the corpus pages that are titles.
pub fn build_titles(corpus: &Corpus) -> Result<BTreeSet<String>> {
    Ok(corpus
        .pages()?
        .into_iter()
        .map(|page| page.name)
        .filter(|name| is_title(name))
        .collect())
}

/// Titles containing `substring`, ignoring case.
pub fn query_titles(titles: &BTreeSet<String>, substring: &str) -> BTreeSet<String> {
    let needle = substring.to_lowercase();
    titles
        .iter()
        .filter(|title| title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Pick a title with equal probability mass per title.
///
/// One uniform draw in `[0, 1)` is spent down by `1/n` per title in order; the
/// title that takes it below zero wins. If rounding leaves the draw
/// unspent after the last title, the smallest title is returned. `None` only
/// for an empty set.
pub fn random_title<R: Rng + ?Sized>(titles: &BTreeSet<String>, rng: &mut R) -> Option<String> {
    if titles.is_empty() {
        return None;
    }

    let mass = 1.0 / titles.len() as f64;
    let mut remaining: f64 = rng.random();
    for title in titles {
        remaining -= mass;
        if remaining < 0.0 {
            return Some(title.clone());
        }
    }

    titles.first().cloned()
}
