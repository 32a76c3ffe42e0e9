use crate::domain::ports::KeyValueStore;
use crate::error::{Result, RpaError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding saved drafts.
pub const CF_DRAFTS: &str = "drafts";

/// A persistent store implementation using RocksDB.
///
/// Drafts live in their own Column Family so the database can be shared with
/// other data without key collisions.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "drafts" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_drafts = ColumnFamilyDescriptor::new(CF_DRAFTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_drafts])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn drafts(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_DRAFTS).ok_or_else(|| {
            RpaError::InternalError(Box::new(std::io::Error::other(
                "Drafts column family not found",
            )))
        })
    }
}

#[async_trait]
impl KeyValueStore for RocksDBStore {
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let cf = self.drafts()?;
        self.db.put_cf(cf, key.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self.drafts()?;
        Ok(self.db.get_cf(cf, key.as_bytes())?)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let cf = self.drafts()?;
        self.db.delete_cf(cf, key.as_bytes())?;
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let cf = self.drafts()?;
        // Just check if the key exists without copying the value out
        let result = self.db.get_pinned_cf(cf, key.as_bytes())?;
        Ok(result.is_some())
    }
}
