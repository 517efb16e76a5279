use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The file does not describe a consistent store. Fatal for the handle.
    #[error("corrupt store file: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
