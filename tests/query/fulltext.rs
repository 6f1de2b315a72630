//! Full-text AND queries.

use super::common::{built_wiki, set, Fixture};
use tempfile::TempDir;
use wikindex::build::run_build;
use wikindex::testing::{wiki_page, write_corpus};
use wikindex::{open_index, query_fulltext};

#[test]
fn test_and_semantics_two_pages() {
    let fixture = Fixture {
        dir: TempDir::new().unwrap(),
    };
    write_corpus(
        &fixture.corpus_dir(),
        &[
            ("A", "hello world".to_string()),
            ("B", "hello there".to_string()),
        ],
    )
    .unwrap();
    run_build(&fixture.corpus(), &fixture.index(), true).unwrap();
    let handle = open_index(&fixture.index_dir()).unwrap();

    assert_eq!(query_fulltext(&handle, "hello").unwrap(), set(&["A", "B"]));
    assert_eq!(query_fulltext(&handle, "world").unwrap(), set(&["A"]));
    assert_eq!(query_fulltext(&handle, "hello world").unwrap(), set(&["A"]));
    assert!(query_fulltext(&handle, "missing").unwrap().is_empty());
}

#[test]
fn test_query_terms_are_tokenized_like_pages() {
    let wiki = built_wiki();
    let handle = open_index(&wiki.index_dir()).unwrap();

    let expected = set(&["ExtremeProgramming"]);
    assert_eq!(query_fulltext(&handle, "refactoring").unwrap(), expected);
    assert_eq!(query_fulltext(&handle, "Databases").unwrap(), expected);
    assert_eq!(query_fulltext(&handle, "RefactoringDatabases").unwrap(), expected);
    assert_eq!(query_fulltext(&handle, "REFACTORING database").unwrap(), expected);
}

#[test]
fn test_plural_query_matches_singular_text() {
    let wiki = built_wiki();
    let handle = open_index(&wiki.index_dir()).unwrap();

    assert_eq!(
        query_fulltext(&handle, "latest edits").unwrap(),
        set(&["FrontPage", "RecentChanges"])
    );
    assert_eq!(
        query_fulltext(&handle, "edit").unwrap(),
        set(&["FrontPage", "RecentChanges"])
    );
}

#[test]
fn test_one_unknown_term_empties_result() {
    let wiki = built_wiki();
    let handle = open_index(&wiki.index_dir()).unwrap();

    assert!(query_fulltext(&handle, "latest zyzzyva").unwrap().is_empty());
    assert!(query_fulltext(&handle, "latest refactoring").unwrap().is_empty());
}

#[test]
fn test_empty_query_matches_nothing() {
    let wiki = built_wiki();
    let handle = open_index(&wiki.index_dir()).unwrap();

    assert!(query_fulltext(&handle, "").unwrap().is_empty());
    assert!(query_fulltext(&handle, "!!! ...").unwrap().is_empty());
}

#[test]
fn test_markup_and_entities_are_not_terms() {
    let fixture = Fixture {
        dir: TempDir::new().unwrap(),
    };
    write_corpus(
        &fixture.corpus_dir(),
        &[(
            "EntityPage",
            wiki_page("EntityPage", "<span class=\"hidden\">AT&amp;T</span>"),
        )],
    )
    .unwrap();
    run_build(&fixture.corpus(), &fixture.index(), true).unwrap();
    let handle = open_index(&fixture.index_dir()).unwrap();

    assert!(query_fulltext(&handle, "hidden").unwrap().is_empty());
    assert!(query_fulltext(&handle, "amp").unwrap().is_empty());
    assert_eq!(query_fulltext(&handle, "att").unwrap(), set(&["EntityPage"]));
}
