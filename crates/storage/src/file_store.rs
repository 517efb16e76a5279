use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use memmap2::MmapMut;
use parking_lot::RwLock;

use crate::error::StorageError;

/// Store handle shared between a database and its tables and columns.
/// Reads take the lock shared; every mutation of the file goes through the
/// write half, which is also the only place the mapping may move.
pub type SharedFileStore = Arc<RwLock<FileStore>>;

/// Owns the open store file and its current memory mapping.
#[derive(Debug)]
pub struct FileStore {
    pub(crate) path: PathBuf,
    pub(crate) file: File,
    pub(crate) mmap: MmapMut,
}

impl FileStore {
    /// View over the whole mapping. The slice is invalidated by `grow`;
    /// callers re-obtain it instead of keeping it across operations.
    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.mmap
    }

    pub fn len(&self) -> i64 {
        self.mmap.len() as i64
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Push every dirty page out to disk.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.mmap.flush()?;
        Ok(())
    }

    /// Flush and unmap. Dropping the store unmaps without flushing.
    pub fn close(self) -> Result<(), StorageError> {
        self.flush()
    }

    pub fn into_shared(self) -> SharedFileStore {
        Arc::new(RwLock::new(self))
    }
}
