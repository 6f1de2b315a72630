// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors for building and opening indexes.
//!
//! A term or page that is not in the index is never an error. Queries answer
//! with an empty set. Errors are for the filesystem and for tables that do not
//! decode.

use std::io;
use std::path::PathBuf;

/// Errors that may occur while building, opening or reading an index.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An I/O error occurred on a corpus or index file.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A table required by this step has not been built yet.
    #[error("missing {table} table at {}; run `{}` first", path.display(), producing_phase(table))]
    MissingTable { table: &'static str, path: PathBuf },

    /// A table exists but does not decode.
    #[error("corrupt {table} table: {source}")]
    CorruptTable {
        table: &'static str,
        #[source]
        source: io::Error,
    },

    /// The dictionary would need more keys than fit in a 4-byte key field.
    #[error("dictionary has {0} strings, more than a 4-byte key can address")]
    DictionaryOverflow(usize),

    /// The configuration file could not be parsed.
    #[error("{}: invalid configuration: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Build command that writes `table`.
fn producing_phase(table: &str) -> &'static str {
    match table {
        "link" => "links",
        _ => "full-text",
    }
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(table: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Error::CorruptTable { table, source }
    }
}
