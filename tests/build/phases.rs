//! Tests for the two-phase `full-text` then `links` workflow.

use super::common::{sample_wiki, set};
use std::fs;
use wikindex::build::{run_full_text, run_links};
use wikindex::testing::{wiki_link, wiki_page};
use wikindex::{open_index, open_text_index, query_backlinks, query_fulltext, Error};

#[test]
fn test_links_before_full_text_fails() {
    let wiki = sample_wiki();
    let err = run_links(&wiki.corpus(), &wiki.index()).unwrap_err();

    match &err {
        Error::MissingTable { table, path } => {
            assert_eq!(*table, "string");
            assert!(path.ends_with("str.atlas"));
        }
        other => panic!("expected MissingTable, got {:?}", other),
    }
    assert!(err.to_string().contains("full-text"));
    assert!(!wiki.index().links().exists(), "nothing should be written");
}

#[test]
fn test_links_with_half_a_string_table_fails() {
    let wiki = sample_wiki();
    run_full_text(&wiki.corpus(), &wiki.index()).unwrap();
    fs::remove_file(wiki.index().strings().data).unwrap();

    let err = run_links(&wiki.corpus(), &wiki.index()).unwrap_err();
    assert!(matches!(err, Error::MissingTable { table: "string", .. }));
}

#[test]
fn test_two_phase_build() {
    let wiki = sample_wiki();

    let text = run_full_text(&wiki.corpus(), &wiki.index()).unwrap();
    assert_eq!(text.pages, 5);
    assert!(text.terms > 0);

    let links = run_links(&wiki.corpus(), &wiki.index()).unwrap();
    let stats = links.links.unwrap();
    assert_eq!(stats.written, 4);
    assert_eq!(links.strings, text.strings);

    let handle = open_index(&wiki.index_dir()).unwrap();
    assert_eq!(
        query_fulltext(&handle, "refactoring").unwrap(),
        set(&["ExtremeProgramming"])
    );
    assert_eq!(
        query_backlinks(&handle, "FrontPage").unwrap(),
        set(&["ExtremeProgramming", "RecentChanges"])
    );
}

#[test]
fn test_open_index_without_links_names_links_phase() {
    let wiki = sample_wiki();
    run_full_text(&wiki.corpus(), &wiki.index()).unwrap();

    let err = open_index(&wiki.index_dir()).unwrap_err();
    assert!(matches!(err, Error::MissingTable { table: "link", .. }));
    assert!(err.to_string().contains("links"));
}

#[test]
fn test_text_index_usable_after_full_text_phase() {
    let wiki = sample_wiki();
    run_full_text(&wiki.corpus(), &wiki.index()).unwrap();

    let handle = open_text_index(&wiki.index_dir()).unwrap();
    assert_eq!(
        query_fulltext(&handle, "refactoring").unwrap(),
        set(&["ExtremeProgramming"])
    );
    assert!(handle.links().is_none());
    assert!(matches!(
        query_backlinks(&handle, "WikiWiki").unwrap_err(),
        Error::MissingTable { table: "link", .. }
    ));
}

#[test]
fn test_links_rerun_uses_existing_dictionary() {
    let wiki = sample_wiki();
    run_full_text(&wiki.corpus(), &wiki.index()).unwrap();

    // page added after phase 1: its name has no key yet
    fs::write(
        wiki.corpus_dir().join("LatePage.html"),
        wiki_page("LatePage", &wiki_link("WikiWiki")),
    )
    .unwrap();

    let stats = run_links(&wiki.corpus(), &wiki.index()).unwrap().links.unwrap();
    assert_eq!(stats.dropped_referrers, 1);

    let handle = open_index(&wiki.index_dir()).unwrap();
    assert_eq!(
        query_backlinks(&handle, "WikiWiki").unwrap(),
        set(&["FrontPage", "RecentChanges", "notes"])
    );
}

#[test]
fn test_corrupt_string_table_detected() {
    let wiki = sample_wiki();
    run_full_text(&wiki.corpus(), &wiki.index()).unwrap();
    fs::write(wiki.index().strings().atlas, [0u8; 3]).unwrap();

    let err = run_links(&wiki.corpus(), &wiki.index()).unwrap_err();
    assert!(matches!(err, Error::CorruptTable { table: "string", .. }));
}
