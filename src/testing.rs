// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::fs;
use std::io;
use std::path::Path;

/// A page laid out the way the cleaned wiki renders one: the title heading
/// links to the page's own backlink search, the body sits in `#wiki`.
pub fn wiki_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{title}</title></head><body>\
         <h1><a href=\"../fullSearch?search={title}\">{title}</a></h1>\
         <div id=\"wiki\">{body}</div></body></html>"
    )
}

/// Anchor to another wiki page.
pub fn wiki_link(target: &str) -> String {
    format!("<a href=\"{target}\">{target}</a>")
}

/// Write `(name, html)` pairs as `name.html` files under `dir`.
pub fn write_corpus<N: AsRef<str>>(dir: &Path, pages: &[(N, String)]) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for (name, html) in pages {
        fs::write(dir.join(format!("{}.html", name.as_ref())), html)?;
    }
    Ok(())
}

/// A generated corpus of `count` pages, each linking to the next two.
///
/// Page `i` is `PageN` spelled with CamelCase words so every page is a title.
pub fn generated_corpus(count: usize) -> Vec<(String, String)> {
    let name = |i: usize| format!("Generated{}Page", number_word(i));
    (0..count)
        .map(|i| {
            let body = format!(
                "Shared words for every page. Unique{} text here. {} {}",
                number_word(i),
                wiki_link(&name((i + 1) % count)),
                wiki_link(&name((i + 2) % count)),
            );
            (name(i), wiki_page(&name(i), &body))
        })
        .collect()
}

/// Letters-only spelling of `n`, so generated names stay valid titles.
fn number_word(mut n: usize) -> String {
    const DIGITS: [&str; 10] = [
        "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
    ];
    let mut words = Vec::new();
    loop {
        words.push(DIGITS[n % 10]);
        n /= 10;
        if n == 0 {
            break;
        }
    }
    words.reverse();
    words.concat()
}
