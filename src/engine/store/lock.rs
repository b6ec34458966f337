use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::engine::errors::StoreError;

pub const WRITE_LOCK_FILE: &str = "write.lock";

/// RAII exclusive writer lock on a store directory; unlocks on drop.
#[derive(Debug)]
pub struct WriteLock {
    file: File,
    path: PathBuf,
}

impl WriteLock {
    pub fn acquire(store_dir: &Path) -> Result<Self, StoreError> {
        let path = store_dir.join(WRITE_LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.try_lock_exclusive()
            .map_err(|_| StoreError::Locked(store_dir.to_path_buf()))?;
        Ok(Self { file, path })
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}
