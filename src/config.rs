//! Runtime settings assembled from the command line.

use crate::domain::ports::KeyValueStoreBox;
use crate::error::Result;
use crate::infrastructure::file::FileStore;
use std::path::PathBuf;
use tracing::warn;

/// Directory used for the draft when none is given.
pub const DEFAULT_DRAFT_DIR: &str = ".rpa";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per key in this directory.
    File(PathBuf),
    /// RocksDB database at this path.
    RocksDb(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where generated receipts are written.
    pub output_dir: PathBuf,
    pub storage: StorageBackend,
}

impl Settings {
    /// Picks the draft backend. `db_path` wins over `draft_dir` when RocksDB
    /// support is compiled in; otherwise it is ignored with a warning.
    pub fn resolve(
        output_dir: PathBuf,
        draft_dir: Option<PathBuf>,
        db_path: Option<PathBuf>,
    ) -> Self {
        let file_backend =
            |dir: Option<PathBuf>| StorageBackend::File(dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DRAFT_DIR)));

        let storage = match db_path {
            Some(path) if cfg!(feature = "storage-rocksdb") => StorageBackend::RocksDb(path),
            Some(_) => {
                warn!(
                    "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to file storage."
                );
                file_backend(draft_dir)
            }
            None => file_backend(draft_dir),
        };

        Self {
            output_dir,
            storage,
        }
    }

    pub fn open_store(&self) -> Result<KeyValueStoreBox> {
        match &self.storage {
            StorageBackend::File(dir) => Ok(Box::new(FileStore::new(dir))),
            #[cfg(feature = "storage-rocksdb")]
            StorageBackend::RocksDb(path) => Ok(Box::new(
                crate::infrastructure::rocksdb::RocksDBStore::open(path)?,
            )),
            #[cfg(not(feature = "storage-rocksdb"))]
            StorageBackend::RocksDb(path) => Err(crate::error::RpaError::StorageError(format!(
                "cannot open {}: built without 'storage-rocksdb'",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft_dir() {
        let settings = Settings::resolve(PathBuf::from("out"), None, None);
        assert_eq!(
            settings.storage,
            StorageBackend::File(PathBuf::from(DEFAULT_DRAFT_DIR))
        );
        assert_eq!(settings.output_dir, PathBuf::from("out"));
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    #[test]
    fn test_db_path_falls_back_without_feature() {
        let settings = Settings::resolve(
            PathBuf::from("out"),
            Some(PathBuf::from("drafts")),
            Some(PathBuf::from("db")),
        );
        assert_eq!(settings.storage, StorageBackend::File(PathBuf::from("drafts")));
    }

    #[cfg(feature = "storage-rocksdb")]
    #[test]
    fn test_db_path_selects_rocksdb() {
        let settings = Settings::resolve(PathBuf::from("out"), None, Some(PathBuf::from("db")));
        assert_eq!(settings.storage, StorageBackend::RocksDb(PathBuf::from("db")));
    }
}
