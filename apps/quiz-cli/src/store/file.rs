//! JSON snapshot file.

use super::error::StoreError;
use quiz_core::{QuizError, Snapshot, SnapshotStore};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, StoreError>;

/// Session snapshot kept in a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Snapshot>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    operation: "read",
                    path: self.path.clone(),
                    source,
                })
            }
        };

        Snapshot::from_json(&json)
            .map(Some)
            .map_err(|e| StoreError::InvalidSnapshot {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    /// Write to a temp file first, then rename over the snapshot.
    fn write(&self, json: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp = self.path.with_extension("json.tmp");
        let io_error = |operation: &'static str| {
            let path = temp.clone();
            move |source| StoreError::Io {
                operation,
                path,
                source,
            }
        };

        let mut file = File::create(&temp).map_err(io_error("create"))?;
        file.write_all(json.as_bytes()).map_err(io_error("write"))?;
        file.sync_all().map_err(io_error("sync"))?;

        fs::rename(&temp, &self.path).map_err(|source| StoreError::AtomicWriteFailed {
            temp: temp.clone(),
            target: self.path.clone(),
            source,
        })?;

        tracing::info!(path = %self.path.display(), "saved session");
        Ok(())
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> quiz_core::Result<Option<Snapshot>> {
        self.read().map_err(Into::into)
    }

    fn save(&self, snapshot: &Snapshot) -> quiz_core::Result<()> {
        let json = snapshot.to_json()?;
        self.write(&json).map_err(QuizError::from)
    }
}
