//! # File Storage
//!
//! One JSON file per key under a base directory:
//! `<base_dir>/<key>.json`.
//!
//! Writes go to `<key>.json.tmp` first and are renamed into place, so a
//! reader never sees a half-written snapshot.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{StorageError, StorageResult};
use crate::slot::{validate_key, SnapshotStorage};

/// Directory-backed [`SnapshotStorage`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Uses `base_dir` for all slots. The directory is created on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        FileStorage {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl SnapshotStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %path.display(), "slot file absent");
                return Ok(None);
            }
            Err(e) => return Err(StorageError::io(path, e)),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| StorageError::NotText {
                key: key.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| StorageError::io(&self.base_dir, e))?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value).map_err(|e| StorageError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| StorageError::io(&path, e))?;

        debug!(path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}
