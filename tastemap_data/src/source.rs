// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::path::PathBuf;

use crate::error::{DataError, Result};

/// Somewhere a data file's text can be read from.
///
/// Hosts implement this for whatever they fetch from (files, bundled assets,
/// HTTP responses already in memory).
pub trait DataSource: fmt::Debug {
    /// Reads the whole source as text.
    fn read_to_string(&self) -> Result<String>;
}

/// A file on disk.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn read_to_string(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Text already in memory.
#[derive(Clone, Debug)]
pub struct TextSource(String);

impl TextSource {
    /// Wraps `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl DataSource for TextSource {
    fn read_to_string(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// A source that was never provided.
#[derive(Clone, Debug)]
pub struct MissingSource(pub &'static str);

impl DataSource for MissingSource {
    fn read_to_string(&self) -> Result<String> {
        Err(DataError::Missing(self.0.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSource, FileSource, MissingSource, TextSource};

    #[test]
    fn text_source_returns_its_text() {
        assert_eq!(TextSource::new("a: 1").read_to_string().unwrap(), "a: 1");
    }

    #[test]
    fn missing_sources_report_missing() {
        let err = MissingSource("visits").read_to_string().unwrap_err();
        assert!(err.is_missing());

        let err = FileSource::new("/definitely/not/here.yaml")
            .read_to_string()
            .unwrap_err();
        assert!(err.is_missing(), "{err}");
    }
}
