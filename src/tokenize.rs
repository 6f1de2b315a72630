// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word extraction for indexing and queries.
//!
//! Wiki text is full of CamelCase page names, so a word boundary is not just
//! whitespace. A lowercase letter followed by an uppercase one starts a new
//! word, which splits `RefactoringDatabases` into `refactoring` and
//! `database`. An uppercase run may be followed by lowercase letters in the
//! same word (`Title`, `HTTPServer`). Digits only ever group with digits.
//!
//! Finished words lose one trailing `s` before lowercasing. That is the whole
//! stemmer: `Cats` and `cat` meet in the index, `glass` becomes `glas`, and
//! nobody pretends this is linguistics. Only ASCII letters and digits count as
//! word characters; everything else ends the current word.
//!
//! The same function runs at build time and at query time, so whatever it
//! does to a word happens identically on both sides.

use std::collections::BTreeSet;

/// Character class of the previous character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    None,
    Lower,
    Upper,
    Digit,
}

/// What a character does to the word being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Append to the current word.
    Continue,
    /// Finish the current word (if any) and start a new one with this character.
    Start,
    /// Finish the current word (if any); the character is dropped.
    End,
}

fn classify(ch: char) -> State {
    match ch {
        'a'..='z' => State::Lower,
        'A'..='Z' => State::Upper,
        '0'..='9' => State::Digit,
        _ => State::None,
    }
}

/// Pure transition function: `(state, char) -> (state, step)`.
pub fn transition(state: State, ch: char) -> (State, Step) {
    let next = classify(ch);
    let step = match (state, next) {
        (_, State::None) => Step::End,
        (State::None, _) => Step::Start,
        (State::Lower, State::Lower)
        | (State::Upper, State::Upper)
        | (State::Upper, State::Lower)
        | (State::Digit, State::Digit) => Step::Continue,
        _ => Step::Start,
    };
    (next, step)
}

/// Incremental tokenizer. Feed characters with [`Tokenizer::push`], then
/// call [`Tokenizer::finish`] to flush the last word.
#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    word: String,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            state: State::None,
            word: String::new(),
        }
    }

    pub fn push(&mut self, ch: char, terms: &mut BTreeSet<String>) {
        let (next, step) = transition(self.state, ch);
        match step {
            Step::Continue => self.word.push(ch),
            Step::Start => {
                self.flush(terms);
                self.word.push(ch);
            }
            Step::End => self.flush(terms),
        }
        self.state = next;
    }

    pub fn push_str(&mut self, text: &str, terms: &mut BTreeSet<String>) {
        for ch in text.chars() {
            self.push(ch, terms);
        }
    }

    /// Flush any pending word and reset to the initial state.
    pub fn finish(&mut self, terms: &mut BTreeSet<String>) {
        self.flush(terms);
        self.state = State::None;
    }

    fn flush(&mut self, terms: &mut BTreeSet<String>) {
        if self.word.ends_with('s') {
            self.word.pop();
        }
        if !self.word.is_empty() {
            terms.insert(self.word.to_ascii_lowercase());
        }
        self.word.clear();
    }
}

/// Add the terms of one text span to `terms`.
pub fn tokenize_into(text: &str, terms: &mut BTreeSet<String>) {
    let mut tokenizer = Tokenizer::new();
    tokenizer.push_str(text, terms);
    tokenizer.finish(terms);
}

/// Terms of a text span, duplicates removed.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    tokenize_into(text, &mut terms);
    terms
}
