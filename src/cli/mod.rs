// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the wikindex command-line interface.
//!
//! Index building comes in two flavors: `build` does everything in one go,
//! `full-text` and `links` split it into the two phases so the links pass can
//! be rerun on its own. `search`, `random` and `inspect` read an existing
//! index, and `clean` turns a raw wiki dump into a corpus in the first place.
//!
//! Corpus and index directories can come from a `--config` JSON file instead
//! of the command line; explicit arguments win.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "wikindex",
    about = "Offline full-text and backlink index for static HTML wikis",
    version
)]
pub struct Cli {
    /// JSON file with default corpus_dir, index_dir and page_extension
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the string and term tables, and optionally the backlinks
    Build {
        /// Directory of page files
        corpus: Option<PathBuf>,

        /// Output directory for the index tables
        index: Option<PathBuf>,

        /// Also run the links phase
        #[arg(long)]
        with_links: bool,
    },

    /// Phase 1: build the string dictionary and term postings
    FullText {
        /// Directory of page files
        corpus: Option<PathBuf>,

        /// Output directory for the index tables
        index: Option<PathBuf>,
    },

    /// Phase 2: build the backlink table (needs phase 1 output)
    Links {
        /// Directory of page files
        corpus: Option<PathBuf>,

        /// Index directory holding the phase 1 tables
        index: Option<PathBuf>,
    },

    /// Query an index
    ///
    /// Text mode needs only the full-text tables; backlinks mode also needs
    /// the link table.
    Search {
        /// Index directory
        index: PathBuf,

        /// Search text, title substring, or page name (see --mode)
        query: String,

        /// Corpus directory, needed for title search
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// What to search
        #[arg(short, long, value_enum, default_value = "text")]
        mode: SearchMode,

        /// Print results as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Pick a random title from a corpus
    Random {
        /// Directory of page files
        corpus: Option<PathBuf>,

        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show entry counts and sizes of an index's tables
    Inspect {
        /// Index directory
        index: Option<PathBuf>,
    },

    /// Clean a raw wiki dump into a corpus directory
    Clean {
        /// Directory of dumped `wiki?PageName.html` files
        src: PathBuf,

        /// Output corpus directory
        dest: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchMode {
    /// Pages containing every query term
    Text,
    /// Titles containing the query, ignoring case
    Titles,
    /// Pages linking to the named page
    Backlinks,
}
