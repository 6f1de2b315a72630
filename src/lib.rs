// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline search index for a static HTML wiki.
//!
//! A directory of `PageName.html` files goes in. Three sorted binary tables
//! come out: a string dictionary, term postings and backlinks. Queries open
//! the tables read-only and answer with binary searches over positioned reads,
//! so nothing is loaded into memory up front.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────────────┐
//! │ tokenize.rs │────▶│   html.rs    │────▶│ build/                  │
//! │ (CamelCase  │     │ (scanner,    │     │  dictionary, postings,  │
//! │  splitting) │     │  text/links) │     │  backlinks → TableWriter│
//! └─────────────┘     └──────────────┘     └─────────────────────────┘
//!                                                     │
//!                                                     ▼
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────────────┐
//! │  title.rs   │     │   query.rs   │◀────│ binary/                 │
//! │ (titles,    │     │ (full-text,  │     │  atlas + data tables,   │
//! │  random)    │     │  backlinks)  │     │  binary search          │
//! └─────────────┘     └──────────────┘     └─────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use wikindex::build::{run_build, Corpus};
//! use wikindex::config::IndexPaths;
//!
//! let corpus = Corpus::new("wiki");
//! run_build(&corpus, &IndexPaths::new("index"), true)?;
//!
//! let index = wikindex::open_index(Path::new("index"))?;
//! let pages = wikindex::query_fulltext(&index, "refactoring databases")?;
//! let referrers = wikindex::query_backlinks(&index, "WikiWiki")?;
//! ```

pub mod binary;
pub mod build;
pub mod clean;
pub mod config;
pub mod error;
pub mod html;
pub mod query;
pub mod title;
pub mod tokenize;

pub mod testing;

pub use error::{Error, Result};
pub use query::{
    inspect_index, open_index, open_text_index, query_backlinks, query_fulltext, IndexHandle,
    TableInfo,
};
pub use title::{build_titles, is_title, query_titles, random_title};
pub use tokenize::tokenize;
