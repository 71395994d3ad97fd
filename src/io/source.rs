//! File-backed record source
//!
//! Reads a saved explorer response from disk. Each fetch re-reads the file,
//! so a process that rewrites the payload (a cron job, a proxy dumping fresh
//! pages) is picked up on the next refresh.

use crate::core::RecordSource;
use crate::io::upstream::decode_response;
use crate::types::{IndexError, TransferRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Record source reading an explorer payload file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the payload at `path`
    ///
    /// The file is not opened until the first fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the payload file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn fetch(&self) -> Result<Vec<TransferRecord>, IndexError> {
        let body = fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => IndexError::file_not_found(&self.path.display().to_string()),
            _ => IndexError::from(e),
        })?;
        decode_response(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
