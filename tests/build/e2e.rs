//! End-to-end tests for the build workflow.

use super::common::{built_wiki, sample_pages, sample_wiki, table_bytes};
use std::fs;
use tempfile::TempDir;
use wikindex::build::{run_build, Corpus};
use wikindex::config::IndexPaths;
use wikindex::testing::write_corpus;
use wikindex::{open_index, Error};

#[test]
fn test_build_writes_string_and_term_tables() {
    let wiki = sample_wiki();
    let summary = run_build(&wiki.corpus(), &wiki.index(), false).unwrap();

    assert_eq!(summary.pages, 5, "style.css and static/ are not pages");
    assert!(summary.links.is_none());

    let index = wiki.index();
    assert!(index.strings().exists());
    assert!(index.terms().exists());
    assert!(!index.links().exists(), "links phase was not requested");
}

#[test]
fn test_build_with_links_writes_all_tables() {
    let wiki = built_wiki();
    for table in wiki.index().all() {
        assert!(table.exists(), "{} table should be written", table.name);
    }
}

#[test]
fn test_string_table_is_sorted_union_of_names_and_terms() {
    let wiki = built_wiki();
    let handle = open_index(&wiki.index_dir()).unwrap();
    let strings = handle.strings();

    let all: Vec<String> = (0..strings.len() as u32)
        .map(|key| strings.get(key).unwrap())
        .collect();

    assert!(
        all.windows(2).all(|w| w[0].as_bytes() < w[1].as_bytes()),
        "dictionary must be strictly ascending by byte value"
    );
    for name in ["FrontPage", "WikiWiki", "RecentChanges", "ExtremeProgramming", "notes"] {
        assert!(all.iter().any(|s| s == name), "page name {} missing", name);
    }
    for term in ["refactoring", "database", "edit", "latest"] {
        assert!(all.iter().any(|s| s == term), "term {} missing", term);
    }
    assert!(!all.iter().any(|s| s == "edits"), "plural should be stemmed");
}

#[test]
fn test_rebuild_is_byte_identical() {
    let wiki = built_wiki();
    let first = table_bytes(&wiki.index_dir());
    assert_eq!(first.len(), 6);

    run_build(&wiki.corpus(), &wiki.index(), true).unwrap();
    let second = table_bytes(&wiki.index_dir());

    assert_eq!(first, second);
}

#[test]
fn test_page_order_does_not_change_output() {
    let dir = TempDir::new().unwrap();
    let forward = sample_pages();
    let mut reversed = sample_pages();
    reversed.reverse();

    write_corpus(&dir.path().join("a"), &forward).unwrap();
    write_corpus(&dir.path().join("b"), &reversed).unwrap();

    run_build(
        &Corpus::new(dir.path().join("a")),
        &IndexPaths::new(dir.path().join("index-a")),
        true,
    )
    .unwrap();
    run_build(
        &Corpus::new(dir.path().join("b")),
        &IndexPaths::new(dir.path().join("index-b")),
        true,
    )
    .unwrap();

    assert_eq!(
        table_bytes(&dir.path().join("index-a")),
        table_bytes(&dir.path().join("index-b"))
    );
}

#[test]
fn test_rebuild_truncates_old_tables() {
    let wiki = built_wiki();
    let before = fs::metadata(wiki.index().strings().data).unwrap().len();

    // shrink the corpus to one page
    for (name, _) in sample_pages().iter().skip(1) {
        fs::remove_file(wiki.corpus_dir().join(format!("{}.html", name))).unwrap();
    }
    run_build(&wiki.corpus(), &wiki.index(), false).unwrap();

    let after = fs::metadata(wiki.index().strings().data).unwrap().len();
    assert!(after < before);
}

#[test]
fn test_empty_corpus_builds_empty_tables() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("wiki")).unwrap();
    let index = IndexPaths::new(dir.path().join("index"));

    let summary = run_build(&Corpus::new(dir.path().join("wiki")), &index, true).unwrap();
    assert_eq!(summary.pages, 0);
    assert_eq!(summary.strings, 0);

    for table in index.all() {
        assert_eq!(fs::metadata(&table.atlas).unwrap().len(), 0);
        assert_eq!(fs::metadata(&table.data).unwrap().len(), 0);
    }
}

#[test]
fn test_missing_corpus_fails() {
    let dir = TempDir::new().unwrap();
    let result = run_build(
        &Corpus::new(dir.path().join("nope")),
        &IndexPaths::new(dir.path().join("index")),
        false,
    );
    assert!(matches!(result, Err(Error::Io { .. })));
}
