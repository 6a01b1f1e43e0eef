use crate::domain::ports::PaymentStoreBox;
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryPaymentStore;
use crate::infrastructure::json_file::JsonFilePaymentStore;
use std::path::PathBuf;

/// Which backend the service persists through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    InMemory,
    JsonFile(PathBuf),
    RocksDb(PathBuf),
}

impl StorageConfig {
    /// Resolves the backend from the CLI flags.
    ///
    /// `db_path` wins when RocksDB support is compiled in; otherwise a warning is
    /// logged and resolution continues with `store_path`, then in-memory.
    pub fn resolve(store_path: Option<PathBuf>, db_path: Option<PathBuf>) -> Self {
        if let Some(db_path) = db_path {
            if cfg!(feature = "storage-rocksdb") {
                return StorageConfig::RocksDb(db_path);
            }
            tracing::warn!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
        }

        match store_path {
            Some(path) => StorageConfig::JsonFile(path),
            None => StorageConfig::InMemory,
        }
    }

    pub fn open(&self) -> Result<PaymentStoreBox> {
        match self {
            StorageConfig::InMemory => Ok(Box::new(InMemoryPaymentStore::new())),
            StorageConfig::JsonFile(path) => Ok(Box::new(JsonFilePaymentStore::new(path))),
            #[cfg(feature = "storage-rocksdb")]
            StorageConfig::RocksDb(path) => Ok(Box::new(
                crate::infrastructure::rocksdb::RocksDBStore::open(path)?,
            )),
            #[cfg(not(feature = "storage-rocksdb"))]
            StorageConfig::RocksDb(_) => Ok(Box::new(InMemoryPaymentStore::new())),
        }
    }
}
