use crate::domain::ports::KeyValueStore;
use crate::error::{Result, RpaError};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory which then replaces the
/// target, so a crash mid-save leaves the previous draft intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'));
        if !valid {
            return Err(RpaError::StorageError(format!("invalid key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let path = self.path_for(key)?;
        let dir = self.dir.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            std::fs::create_dir_all(&dir)?;
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&value)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| RpaError::IoError(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| RpaError::InternalError(Box::new(e)))?
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }
}
