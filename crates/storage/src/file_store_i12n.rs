use std::fs::OpenOptions;
use std::path::Path;

use memmap2::MmapMut;

use crate::error::StorageError;
use crate::file_store::FileStore;

impl FileStore {
    /// Open `path` read-write, creating it as `initial_size` zero bytes if
    /// it does not exist yet, and map the whole file.
    pub fn open<P: AsRef<Path>>(path: P, initial_size: i64) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;

        if file.metadata()?.len() == 0 {
            file.set_len(initial_size as u64)?;
        }

        // SAFETY: the file is open read-write and set_len above guarantees
        // a non-empty mapping range.
        let mmap = unsafe { MmapMut::map_mut(&file)? };

        Ok(FileStore { path, file, mmap })
    }

    /// Extend the file by `additional` bytes and remap it. Every raw byte
    /// view taken before this call is invalid afterwards; callers must
    /// re-obtain `bytes()` before touching the store again.
    pub fn grow(&mut self, additional: i64) -> Result<(), StorageError> {
        self.mmap.flush()?;

        let file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        let new_len = file.metadata()?.len() + additional as u64;
        file.set_len(new_len)?;

        // SAFETY: same guarantees as in `open`. The previous mapping is
        // dropped when the new one is assigned.
        let mmap = unsafe { MmapMut::map_mut(&file)? };

        self.file = file;
        self.mmap = mmap;
        Ok(())
    }
}
