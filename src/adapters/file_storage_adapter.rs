//! File-backed key-value storage adapter.
//!
//! One file per key under a base directory; the on-device key-value
//! store analogue. Writes are atomic single-key operations, last write
//! wins.

use std::fs;
use std::path::PathBuf;

use crate::domain::error::StockfolioError;
use crate::ports::storage_port::StoragePort;

pub struct FileStorageAdapter {
    base_path: PathBuf,
}

impl FileStorageAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

impl StoragePort for FileStorageAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, StockfolioError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StockfolioError::Persistence {
                reason: format!("failed to read {}: {}", path.display(), e),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StockfolioError> {
        fs::create_dir_all(&self.base_path).map_err(|e| StockfolioError::Persistence {
            reason: format!("failed to create {}: {}", self.base_path.display(), e),
        })?;

        let path = self.key_path(key);
        fs::write(&path, value).map_err(|e| StockfolioError::Persistence {
            reason: format!("failed to write {}: {}", path.display(), e),
        })
    }
}
