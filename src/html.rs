// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tolerant HTML scanning: text extraction for the term index and anchor
//! extraction for the backlink index.
//!
//! This is not a parser. It is a five-state scanner that knows where tags,
//! quoted attribute values and entities start and stop, and nothing else.
//! Unbalanced markup just produces odd spans; it never fails.
//!
//! ```text
//!            '<'                '"'
//!   TEXT ─────────▶ IN_TAG ─────────▶ IN_DQUOTE
//!    ▲ │◀─────────── │  ▲ ◀───────────  '"'
//!    │ │    '>'      │  │
//!    │ │'&'     '\'' │  │ '\''
//!    │ ▼             ▼  │
//!   IN_ENTITY     IN_SQUOTE
//!   (';' ends)
//! ```
//!
//! Text on either side of a tag is always tokenized separately, so a word
//! never straddles markup. Entities are dropped, not decoded: `AT&amp;T`
//! indexes as `att`.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::tokenize::Tokenizer;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Text,
    InTag,
    InSingleQuote,
    InDoubleQuote,
    InEntity,
}

/// A span of the input, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// Character data between tags and entities.
    Text(&'a str),
    /// A character reference, `&` through `;` inclusive.
    Entity(&'a str),
    /// The body of a tag, between `<` and `>`.
    Tag(&'a str),
    /// A tag still open at end of input, `<` included.
    Unclosed(&'a str),
}

/// Iterator over the [`Event`]s of an HTML document.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    state: ScanState,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            state: ScanState::Text,
        }
    }

    /// Skip raw element content through the closing tag for `name`.
    ///
    /// Call right after the opening tag. The content is not scanned, so a
    /// `<` or quote inside it cannot swallow the closing tag. Without a
    /// closing tag the rest of the input is skipped.
    pub fn skip_raw_text(&mut self, name: &str) {
        let bytes = self.src.as_bytes();
        let needle = name.len() + 2;
        let close = bytes[self.pos..]
            .windows(needle)
            .enumerate()
            .find(|&(i, window)| {
                window.starts_with(b"</")
                    && window[2..].eq_ignore_ascii_case(name.as_bytes())
                    && !bytes
                        .get(self.pos + i + needle)
                        .is_some_and(u8::is_ascii_alphanumeric)
            })
            .map(|(i, _)| self.pos + i + needle);

        self.pos = close.map_or(bytes.len(), |after| {
            bytes[after..]
                .iter()
                .position(|&b| b == b'>')
                .map_or(bytes.len(), |i| after + i + 1)
        });
        self.state = ScanState::Text;
    }

    fn scan_tag(&mut self) -> Event<'a> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut pos = start + 1;

        while pos < bytes.len() {
            let b = bytes[pos];
            self.state = match (self.state, b) {
                (ScanState::InTag, b'>') => {
                    self.pos = pos + 1;
                    self.state = ScanState::Text;
                    return Event::Tag(&self.src[start + 1..pos]);
                }
                (ScanState::InTag, b'"') => ScanState::InDoubleQuote,
                (ScanState::InTag, b'\'') => ScanState::InSingleQuote,
                (ScanState::InDoubleQuote, b'"') | (ScanState::InSingleQuote, b'\'') => {
                    ScanState::InTag
                }
                (state, _) => state,
            };
            pos += 1;
        }

        self.pos = bytes.len();
        self.state = ScanState::Text;
        Event::Unclosed(&self.src[start..])
    }

    fn scan_entity(&mut self) -> Event<'a> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut pos = start + 1;

        while pos < bytes.len() {
            match bytes[pos] {
                b';' => {
                    pos += 1;
                    break;
                }
                b'<' => break,
                b if b.is_ascii_whitespace() => break,
                _ => pos += 1,
            }
        }

        self.pos = pos;
        self.state = ScanState::Text;
        Event::Entity(&self.src[start..pos])
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        let bytes = self.src.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        match self.state {
            ScanState::Text => {
                let start = self.pos;
                let end = bytes[start..]
                    .iter()
                    .position(|&b| b == b'<' || b == b'&')
                    .map_or(bytes.len(), |i| start + i);

                if end > start {
                    self.pos = end;
                    return Some(Event::Text(&self.src[start..end]));
                }

                if bytes[start] == b'<' {
                    self.state = ScanState::InTag;
                    Some(self.scan_tag())
                } else {
                    self.state = ScanState::InEntity;
                    Some(self.scan_entity())
                }
            }
            ScanState::InEntity => Some(self.scan_entity()),
            _ => Some(self.scan_tag()),
        }
    }
}

// ============================================================================
// TAGS
// ============================================================================

/// One attribute of a tag. Values are raw (entities left encoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr<'a> {
    pub name: &'a str,
    pub value: Option<Cow<'a, str>>,
}

/// A parsed tag body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub closing: bool,
    pub self_closing: bool,
    pub attrs: Vec<Attr<'a>>,
}

impl<'a> Tag<'a> {
    /// Parse a tag body as produced by [`Event::Tag`].
    ///
    /// Returns `None` for comments, doctypes, processing instructions and
    /// anything else that does not start with an element name.
    pub fn parse(body: &'a str) -> Option<Self> {
        let bytes = body.as_bytes();
        let mut pos = skip_whitespace(bytes, 0);

        let closing = bytes.get(pos) == Some(&b'/');
        if closing {
            pos += 1;
        }

        if !bytes.get(pos).is_some_and(u8::is_ascii_alphabetic) {
            return None;
        }
        let name_start = pos;
        while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'/' {
            pos += 1;
        }
        let name = &body[name_start..pos];

        let mut attrs = Vec::new();
        let mut self_closing = false;

        loop {
            pos = skip_whitespace(bytes, pos);
            if pos >= bytes.len() {
                break;
            }
            if bytes[pos] == b'/' {
                pos += 1;
                self_closing = skip_whitespace(bytes, pos) >= bytes.len();
                continue;
            }

            let attr_start = pos;
            while pos < bytes.len()
                && !bytes[pos].is_ascii_whitespace()
                && bytes[pos] != b'='
                && bytes[pos] != b'/'
            {
                pos += 1;
            }
            let attr_name = &body[attr_start..pos];

            let after_name = skip_whitespace(bytes, pos);
            if bytes.get(after_name) != Some(&b'=') {
                if !attr_name.is_empty() {
                    attrs.push(Attr {
                        name: attr_name,
                        value: None,
                    });
                }
                continue;
            }

            pos = skip_whitespace(bytes, after_name + 1);
            let value = match bytes.get(pos) {
                Some(&quote) if quote == b'"' || quote == b'\'' => {
                    let value_start = pos + 1;
                    let value_end = bytes[value_start..]
                        .iter()
                        .position(|&b| b == quote)
                        .map_or(bytes.len(), |i| value_start + i);
                    pos = (value_end + 1).min(bytes.len());
                    &body[value_start..value_end]
                }
                _ => {
                    let value_start = pos;
                    while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() {
                        pos += 1;
                    }
                    &body[value_start..pos]
                }
            };

            if !attr_name.is_empty() {
                attrs.push(Attr {
                    name: attr_name,
                    value: Some(Cow::Borrowed(value)),
                });
            }
        }

        Some(Self {
            name,
            closing,
            self_closing,
            attrs,
        })
    }

    /// Case-insensitive element name check.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Value of the first attribute called `name` (case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .and_then(|attr| attr.value.as_deref())
    }

    /// Write the tag back out as `<...>`, values double-quoted.
    pub fn render(&self, out: &mut String) {
        out.push('<');
        if self.closing {
            out.push('/');
        }
        out.push_str(self.name);
        for attr in &self.attrs {
            out.push(' ');
            out.push_str(attr.name);
            if let Some(value) = &attr.value {
                out.push_str("=\"");
                out.push_str(&value.replace('"', "&quot;"));
                out.push('"');
            }
        }
        if self.self_closing {
            out.push_str(" /");
        }
        out.push('>');
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Search terms from the text content of a page.
pub fn extract_terms(html: &str) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    let mut tokenizer = Tokenizer::new();

    for event in Scanner::new(html) {
        match event {
            Event::Text(text) => tokenizer.push_str(text, &mut terms),
            Event::Entity(_) => {}
            Event::Tag(_) | Event::Unclosed(_) => tokenizer.finish(&mut terms),
        }
    }

    tokenizer.finish(&mut terms);
    terms
}

/// Intra-wiki link targets of a page.
///
/// Anchors inside the `<h1>` title heading are skipped (the heading links to
/// the page's own backlink search), as is any `href` containing a `/`: only
/// same-directory links are wiki links.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    let mut links = BTreeSet::new();
    let mut in_heading = false;

    for event in Scanner::new(html) {
        let Event::Tag(body) = event else { continue };
        let Some(tag) = Tag::parse(body) else { continue };

        if tag.is("h1") {
            in_heading = !tag.closing;
        } else if tag.is("a") && !tag.closing && !in_heading {
            if let Some(href) = tag.attr("href").map(str::trim) {
                if !href.is_empty() && !href.contains('/') {
                    links.insert(href.to_string());
                }
            }
        }
    }

    links
}
