//! Cache manager for the downloaded lootpool
//!
//! The lootpool is stored as a single pretty-printed JSON file that mirrors
//! the API response. The file never expires; deleting it forces a fresh
//! download on the next run.

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::LootDocument;

/// Errors that can occur when reading or writing the lootpool cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Cache file could not be read or written
    #[error("Cache file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Cache file does not contain a valid lootpool
    #[error("Cache file {path} is not a valid lootpool: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Whether a lootpool snapshot is available on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// The cache file exists
    Cached {
        /// When the file was last written, if the platform reports it
        modified: Option<DateTime<Local>>,
    },
    /// No cache file; the lootpool must be downloaded
    Missing,
}

/// Reads and writes the lootpool cache file
#[derive(Debug, Clone)]
pub struct LootCache {
    path: PathBuf,
}

impl LootCache {
    /// Creates a cache backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reports whether a snapshot is on disk
    pub fn status(&self) -> CacheStatus {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.is_file() => CacheStatus::Cached {
                modified: meta.modified().ok().map(DateTime::<Local>::from),
            },
            _ => CacheStatus::Missing,
        }
    }

    /// Writes the API response to the cache file
    ///
    /// Output is UTF-8 with a four space indent; non-ASCII characters are
    /// written as-is and key order is kept.
    pub fn write<T: Serialize>(&self, data: &T) -> Result<(), CacheError> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        data.serialize(&mut ser).map_err(|source| CacheError::Parse {
            path: self.display_path(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        fs::write(&self.path, buf).map_err(|e| self.io_error(e))
    }

    /// Reads the cached lootpool
    pub fn read(&self) -> Result<LootDocument, CacheError> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        LootDocument::from_json(&content).map_err(|source| CacheError::Parse {
            path: self.display_path(),
            source,
        })
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.display_path(),
            source,
        }
    }
}
