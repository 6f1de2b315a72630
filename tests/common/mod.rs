//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wikindex::build::{run_build, Corpus};
use wikindex::config::IndexPaths;
use wikindex::testing::{wiki_link, wiki_page, write_corpus};

// ============================================================================
// SAMPLE WIKI
// ============================================================================

/// Five pages, four of them titles.
///
/// ```text
/// FrontPage          → WikiWiki, RecentChanges
/// WikiWiki           → ExtremeProgramming, NoSuchPage, http://example.com/x
/// RecentChanges      → WikiWiki, FrontPage, wiki
/// ExtremeProgramming → FrontPage
/// notes              → WikiWiki
/// ```
pub fn sample_pages() -> Vec<(&'static str, String)> {
    vec![
        (
            "FrontPage",
            wiki_page(
                "FrontPage",
                &format!(
                    "Welcome to the {}. See {} for the latest edits.",
                    wiki_link("WikiWiki"),
                    wiki_link("RecentChanges")
                ),
            ),
        ),
        (
            "WikiWiki",
            wiki_page(
                "WikiWiki",
                &format!(
                    "The wiki about {}. Also see {} and \
                     <a href=\"http://example.com/x\">elsewhere</a>.",
                    wiki_link("ExtremeProgramming"),
                    wiki_link("NoSuchPage")
                ),
            ),
        ),
        (
            "RecentChanges",
            wiki_page(
                "RecentChanges",
                &format!(
                    "Latest edits: {}, {}. <a href=\"wiki\">lowercase</a>",
                    wiki_link("WikiWiki"),
                    wiki_link("FrontPage")
                ),
            ),
        ),
        (
            "ExtremeProgramming",
            wiki_page(
                "ExtremeProgramming",
                &format!(
                    "RefactoringDatabases is hard work. Back to {}.",
                    wiki_link("FrontPage")
                ),
            ),
        ),
        (
            "notes",
            wiki_page("notes", &format!("Scratch notes on {}.", wiki_link("WikiWiki"))),
        ),
    ]
}

/// A temp directory holding `wiki/` (the corpus) and `index/`.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn corpus_dir(&self) -> PathBuf {
        self.dir.path().join("wiki")
    }

    pub fn index_dir(&self) -> PathBuf {
        self.dir.path().join("index")
    }

    pub fn corpus(&self) -> Corpus {
        Corpus::new(self.corpus_dir())
    }

    pub fn index(&self) -> IndexPaths {
        IndexPaths::new(self.index_dir())
    }
}

/// Corpus written, nothing built.
pub fn sample_wiki() -> Fixture {
    let fixture = Fixture {
        dir: TempDir::new().unwrap(),
    };
    let pages: Vec<(&str, String)> = sample_pages();
    write_corpus(&fixture.corpus_dir(), &pages).unwrap();
    // not pages
    fs::write(fixture.corpus_dir().join("style.css"), "h1 { color: red }").unwrap();
    fs::create_dir(fixture.corpus_dir().join("static")).unwrap();
    fixture
}

/// Corpus written and fully indexed, backlinks included.
pub fn built_wiki() -> Fixture {
    let fixture = sample_wiki();
    run_build(&fixture.corpus(), &fixture.index(), true).unwrap();
    fixture
}

// ============================================================================
// HELPERS
// ============================================================================

pub fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Every table file in `index`, name and contents.
pub fn table_bytes(index: &Path) -> Vec<(String, Vec<u8>)> {
    IndexPaths::new(index)
        .all()
        .iter()
        .flat_map(|paths| [paths.atlas.clone(), paths.data.clone()])
        .filter(|path| path.exists())
        .map(|path| {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            (name, fs::read(&path).unwrap())
        })
        .collect()
}
