// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index layout and the optional JSON configuration file.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default extension of corpus page files.
pub const DEFAULT_PAGE_EXTENSION: &str = "html";

/// File paths of one atlas/data table pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    pub name: &'static str,
    pub atlas: PathBuf,
    pub data: PathBuf,
}

impl TablePaths {
    fn new(dir: &Path, name: &'static str, stem: &str) -> Self {
        Self {
            name,
            atlas: dir.join(format!("{}.atlas", stem)),
            data: dir.join(format!("{}.idx", stem)),
        }
    }

    /// Both files are present.
    pub fn exists(&self) -> bool {
        self.atlas.is_file() && self.data.is_file()
    }
}

/// Locations of the three tables inside an index directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    dir: PathBuf,
}

impl IndexPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `str.atlas` / `str.idx`
    pub fn strings(&self) -> TablePaths {
        TablePaths::new(&self.dir, "string", "str")
    }

    /// `term.atlas` / `term.idx`
    pub fn terms(&self) -> TablePaths {
        TablePaths::new(&self.dir, "term", "term")
    }

    /// `link.atlas` / `link.idx`
    pub fn links(&self) -> TablePaths {
        TablePaths::new(&self.dir, "link", "link")
    }

    pub fn all(&self) -> [TablePaths; 3] {
        [self.strings(), self.terms(), self.links()]
    }
}

/// Defaults for the command line, read from `--config <file>`.
///
/// ```json
/// { "corpus_dir": "wiki", "index_dir": "index", "page_extension": "html" }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub corpus_dir: Option<PathBuf>,
    pub index_dir: Option<PathBuf>,
    pub page_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_dir: None,
            index_dir: None,
            page_extension: DEFAULT_PAGE_EXTENSION.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content).map_err(|reason| Error::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let config: Config = serde_json::from_str(content).map_err(|e| e.to_string())?;
        if config.page_extension.is_empty() || config.page_extension.contains('.') {
            return Err(format!(
                "page_extension must be a bare extension like \"html\", got {:?}",
                config.page_extension
            ));
        }
        Ok(config)
    }
}
