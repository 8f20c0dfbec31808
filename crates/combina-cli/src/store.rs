//! Key to JSON document storage.
//!
//! Keys are `/`-separated relative paths such as `actualModels/lotto.json`.

use std::{
    fs,
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use serde_json::Value;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("invalid blob path '{path}'")]
    InvalidPath { path: String },
    #[display("failed to read blob '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[display("failed to write blob '{path}': {source}")]
    Write { path: String, source: io::Error },
    #[display("blob '{path}' is not valid JSON: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
}

pub trait BlobStore {
    /// Returns the document stored at `path`, or `None` if there is none.
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Stores `value` at `path`, replacing any previous document.
    fn put(&mut self, path: &str, value: &Value) -> Result<(), StoreError>;
}

/// Checks that `path` is a relative path made of plain segments.
fn validate_path(path: &str) -> Result<(), StoreError> {
    let valid = path
        .split('/')
        .all(|segment| !matches!(segment, "" | "." | "..") && !segment.contains('\\'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidPath {
            path: path.to_owned(),
        })
    }
}

/// Blob store keeping each document as a pretty-printed JSON file below a root directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        validate_path(path)?;
        Ok(path.split('/').fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }

    fn write_file(file_path: &Path, value: &Value) -> io::Result<()> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(fs::File::create(file_path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
        writer.flush()
    }
}

impl BlobStore for FsBlobStore {
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let file_path = self.resolve(path)?;
        let text = match fs::read_to_string(&file_path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                path: path.to_owned(),
                source,
            })
    }

    fn put(&mut self, path: &str, value: &Value) -> Result<(), StoreError> {
        let file_path = self.resolve(path)?;
        Self::write_file(&file_path, value).map_err(|source| StoreError::Write {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("Stored blob {path} at {}", file_path.display());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) use self::memory::MemoryBlobStore;
