//! Title list, title search and random titles.

use super::common::{built_wiki, sample_wiki, set};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wikindex::{build_titles, query_titles, random_title};

#[test]
fn test_build_titles_skips_non_titles() {
    let wiki = sample_wiki();
    assert_eq!(
        build_titles(&wiki.corpus()).unwrap(),
        set(&["ExtremeProgramming", "FrontPage", "RecentChanges", "WikiWiki"])
    );
}

#[test]
fn test_title_search_ignores_case() {
    let wiki = built_wiki();
    let titles = build_titles(&wiki.corpus()).unwrap();

    assert_eq!(
        query_titles(&titles, "PAGE"),
        set(&["FrontPage"])
    );
    assert_eq!(
        query_titles(&titles, "e"),
        set(&["ExtremeProgramming", "FrontPage", "RecentChanges"])
    );
    assert!(query_titles(&titles, "notes").is_empty());
}

#[test]
fn test_random_title_is_a_title() {
    let wiki = sample_wiki();
    let titles = build_titles(&wiki.corpus()).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..50 {
        let title = random_title(&titles, &mut rng).unwrap();
        assert!(titles.contains(&title));
    }
}

#[test]
fn test_random_title_seeded_is_reproducible() {
    let wiki = sample_wiki();
    let titles = build_titles(&wiki.corpus()).unwrap();

    let pick = |seed| random_title(&titles, &mut StdRng::seed_from_u64(seed));
    assert_eq!(pick(9), pick(9));
}
