// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The HTML scanner sees whatever is in the corpus directory.
//!
//! Unbalanced quotes, stray `<` and `&`, multibyte text split across markup:
//! extraction must terminate without panicking and only ever emit terms the
//! index can store.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wikindex::clean::clean_html;
use wikindex::html::{extract_links, extract_terms, Event, Scanner};

fuzz_target!(|html: &str| {
    // Spans cover the input exactly once
    let covered: usize = Scanner::new(html)
        .map(|event| match event {
            Event::Tag(body) => body.len() + 2,
            Event::Text(s)
            | Event::Entity(s)
            | Event::Unclosed(s) => s.len(),
        })
        .sum();
    assert_eq!(covered, html.len());

    for term in extract_terms(html) {
        assert!(!term.is_empty());
        assert!(term.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    for link in extract_links(html) {
        assert!(!link.is_empty() && !link.contains('/'));
    }

    let _ = clean_html(html, "FuzzPage");
});
