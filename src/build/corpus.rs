// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus directory enumeration. A page is a file; its name is the file stem.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_PAGE_EXTENSION;
use crate::error::{Error, Result};

/// A directory of wiki pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    dir: PathBuf,
    extension: String,
}

/// One page file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Page {
    pub name: String,
    pub path: PathBuf,
}

impl Corpus {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_PAGE_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Page name for a file, if the file is a page of this corpus.
    pub fn page_name(&self, path: &Path) -> Option<String> {
        let extension = path.extension()?.to_str()?;
        if !extension.eq_ignore_ascii_case(&self.extension) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        (!stem.is_empty()).then(|| stem.to_string())
    }

    /// Every page in the corpus, sorted by name.
    ///
    /// Subdirectories and files with other extensions are skipped. The sort
    /// only makes logging and progress stable; the tables are sorted again
    /// before they are written.
    pub fn pages(&self) -> Result<Vec<Page>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| Error::io(&self.dir, e))?;

        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
            if !file_type.is_file() {
                continue;
            }
            if let Some(name) = self.page_name(&path) {
                pages.push(Page { name, path });
            }
        }

        pages.sort();
        Ok(pages)
    }
}

impl Page {
    /// Page source. Invalid UTF-8 is replaced rather than rejected; only
    /// ASCII ever reaches the index.
    pub fn read(&self) -> Result<String> {
        let bytes = fs::read(&self.path).map_err(|e| Error::io(&self.path, e))?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}
