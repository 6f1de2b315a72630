// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus cleaner: raw c2 wiki dump → servable, indexable page directory.
//!
//! The dump names every page `wiki?PageName.html` and points all of its links
//! at absolute `http://c2.com/cgi/...` URLs. Cleaning:
//!
//! - drops the `wiki?` prefix from file names
//! - removes `<script>` elements
//! - rewrites `href`, `src` and `action` values to paths relative to the page
//! - strips control characters
//!
//! Tags without any of those attributes are copied through byte for byte;
//! only rewritten tags are re-rendered.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::html::{Event, Scanner, Tag};

const DUMP_PREFIX: &str = "wiki?";

/// Attributes holding URLs that [`map_url`] rewrites.
const URL_ATTRS: [&str; 3] = ["href", "src", "action"];

/// Map a c2.com URL to a path relative to a page in the `wiki/` directory.
///
/// Site-wide endpoints sit one level up. `page` is only used for the bare
/// full-search link, which searches for the current page.
pub fn map_url<'a>(url: &'a str, page: &str) -> Cow<'a, str> {
    match url {
        "http://c2.com/cgi/fullSearch" => {
            return Cow::Owned(format!("../fullSearch?search={}", percent_quote(page)));
        }
        "http://c2.com/sig/wiki.gif" | "http://c2.com/wiki.png" => {
            return Cow::Borrowed("../static/wiki.gif");
        }
        "http://c2.com/cgi/wiki" => return Cow::Borrowed("../wiki"),
        _ => {}
    }

    if let Some(rest) = url.strip_prefix("wiki%3F") {
        // trailing ".html" goes too
        let end = rest.len().saturating_sub(5);
        return Cow::Borrowed(rest.get(..end).unwrap_or(""));
    }
    if let Some(rest) = url
        .strip_prefix("http://c2.com/cgi/wiki?edit=")
        .or_else(|| url.strip_prefix("http://c2.com/cgi/quickDiff?"))
        .or_else(|| url.strip_prefix("http://c2.com/cgi/wiki?"))
    {
        return Cow::Borrowed(rest);
    }
    if let Some(rest) = url.strip_prefix("http://c2.com/cgi/fullSearch") {
        return Cow::Owned(format!("../fullSearch{}", rest));
    }

    Cow::Borrowed(url)
}

/// Percent-encode a path, leaving `/` separators alone.
///
/// Each segment keeps ASCII alphanumerics and `-_.~`; everything else,
/// UTF-8 bytes included, becomes `%XX`.
pub fn percent_quote(value: &str) -> String {
    value
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Drop control characters (below 0x20, and 0x7F), keeping CR and LF.
pub fn make_printable(text: &str) -> String {
    text.chars()
        .filter(|&ch| ch == '\r' || ch == '\n' || (ch >= ' ' && ch != '\u{7f}'))
        .collect()
}

/// Decode page bytes as UTF-8, or failing that as Windows-1252.
///
/// `None` when neither works: 1252 leaves five byte values undefined.
pub fn decode_page(bytes: Vec<u8>) -> Option<String> {
    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) => decode_cp1252(e.as_bytes()),
    }
}

/// Windows-1252 code points for 0x80..=0x9F. `None` marks undefined bytes.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None,             Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None,             Some('\u{017D}'), None,
    None,             Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None,             Some('\u{017E}'), Some('\u{0178}'),
];

fn decode_cp1252(bytes: &[u8]) -> Option<String> {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
            _ => Some(b as char),
        })
        .collect()
}

/// Output file name for a dump file name.
pub fn clean_file_name(name: &str) -> String {
    name.replace(DUMP_PREFIX, "")
}

/// Page name used when mapping URLs inside `file_name`.
pub fn page_name(file_name: &str) -> String {
    clean_file_name(file_name).replace(".html", "")
}

/// Clean one page's markup.
pub fn clean_html(html: &str, page: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut scanner = Scanner::new(html);

    while let Some(event) = scanner.next() {
        match event {
            Event::Tag(body) => {
                let Some(mut tag) = Tag::parse(body) else {
                    out.push('<');
                    out.push_str(body);
                    out.push('>');
                    continue;
                };

                if tag.is("script") {
                    // script bodies are code, not markup
                    if !tag.closing && !tag.self_closing {
                        scanner.skip_raw_text("script");
                    }
                    continue;
                }

                if rewrite_urls(&mut tag, page) {
                    tag.render(&mut out);
                } else {
                    out.push('<');
                    out.push_str(body);
                    out.push('>');
                }
            }
            Event::Text(span) | Event::Entity(span) | Event::Unclosed(span) => {
                out.push_str(span);
            }
        }
    }

    make_printable(&out)
}

/// Apply [`map_url`] to the URL attributes of `tag`. True if any changed.
fn rewrite_urls(tag: &mut Tag<'_>, page: &str) -> bool {
    let mut changed = false;
    for attr in &mut tag.attrs {
        if !URL_ATTRS.iter().any(|name| attr.name.eq_ignore_ascii_case(name)) {
            continue;
        }
        let Some(value) = attr.value.as_mut() else { continue };

        let mapped = match map_url(value, page) {
            Cow::Borrowed(same) if same == value.as_ref() => None,
            other => Some(other.into_owned()),
        };
        if let Some(mapped) = mapped {
            *value = Cow::Owned(mapped);
            changed = true;
        }
    }
    changed
}

/// Counts from a clean run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub written: usize,
    pub skipped: usize,
}

enum Outcome {
    Written,
    Skipped,
}

fn clean_file(src: &Path, dest_dir: &Path, file_name: &str) -> Result<Outcome> {
    let bytes = fs::read(src).map_err(|e| Error::io(src, e))?;
    let Some(html) = decode_page(bytes) else {
        warn!(file = %src.display(), "neither UTF-8 nor Windows-1252, skipped");
        return Ok(Outcome::Skipped);
    };

    debug!(file = %file_name, "cleaning");
    let cleaned = clean_html(&html, &page_name(file_name));
    let dest = dest_dir.join(clean_file_name(file_name));
    fs::write(&dest, cleaned).map_err(|e| Error::io(&dest, e))?;
    Ok(Outcome::Written)
}

/// List the regular files of `src_dir` that have UTF-8 names.
fn dump_files(src_dir: &Path) -> Result<Vec<(PathBuf, String)>> {
    let entries = fs::read_dir(src_dir).map_err(|e| Error::io(src_dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(src_dir, e))?;
        let path = entry.path();
        if !entry.file_type().map_err(|e| Error::io(&path, e))?.is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => files.push((path.clone(), name.to_string())),
            None => warn!(file = %path.display(), "file name is not UTF-8, skipped"),
        }
    }
    files.sort();
    Ok(files)
}

/// Clean every file in `src_dir` into `dest_dir`.
pub fn run_clean(src_dir: &Path, dest_dir: &Path) -> Result<CleanSummary> {
    let files = dump_files(src_dir)?;
    fs::create_dir_all(dest_dir).map_err(|e| Error::io(dest_dir, e))?;
    info!(files = files.len(), src = %src_dir.display(), dest = %dest_dir.display(), "cleaning dump");

    #[cfg(feature = "parallel")]
    let iter = files.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = files.iter();

    let outcomes = iter
        .map(|(path, name)| clean_file(path, dest_dir, name))
        .collect::<Result<Vec<Outcome>>>()?;

    let mut summary = CleanSummary::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Written => summary.written += 1,
            Outcome::Skipped => summary.skipped += 1,
        }
    }
    info!(written = summary.written, skipped = summary.skipped, "dump cleaned");
    Ok(summary)
}
