//! Storage adapters implementing [`KeyValueStore`](crate::domain::ports::KeyValueStore).

pub mod file;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
