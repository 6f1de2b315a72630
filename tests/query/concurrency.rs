//! One handle, many threads.

use super::common::{built_wiki, set};
use std::sync::Arc;
use std::thread;
use wikindex::{open_index, query_backlinks, query_fulltext};

#[test]
fn test_shared_handle_answers_consistently() {
    let wiki = built_wiki();
    let handle = Arc::new(open_index(&wiki.index_dir()).unwrap());

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                for _ in 0..50 {
                    if i % 2 == 0 {
                        assert_eq!(
                            query_fulltext(&handle, "latest edits").unwrap(),
                            set(&["FrontPage", "RecentChanges"])
                        );
                    } else {
                        assert_eq!(
                            query_backlinks(&handle, "WikiWiki").unwrap(),
                            set(&["FrontPage", "RecentChanges", "notes"])
                        );
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
}
