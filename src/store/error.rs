//! Store error type

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Decoded name is empty, a dot segment, or carries a separator
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// Canonical target resolves outside the upload root (e.g. via symlink)
    #[error("path escapes the upload root: {0}")]
    OutsideRoot(String),

    #[error("file not found")]
    NotFound,

    /// Request body stream failed before the upload completed
    #[error("upload body aborted: {0}")]
    Body(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Map `NotFound` I/O errors onto the store's own variant
    pub fn from_io(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(err)
        }
    }
}
