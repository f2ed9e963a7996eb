//! File store module
//!
//! The upload root is a single flat directory; every regular file directly
//! inside it is a stored file. There is no in-memory index and no locking:
//! concurrent writers to one name interleave at whatever granularity the OS
//! provides.

mod error;

pub use error::StoreError;

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::logger;

/// Attributes of a stored file observed through the API
#[derive(Debug, Clone, Copy)]
pub struct FileMeta {
    pub len: u64,
    pub modified: DateTime<Utc>,
}

impl FileMeta {
    fn from_metadata(meta: &std::fs::Metadata) -> io::Result<Self> {
        Ok(Self {
            len: meta.len(),
            modified: DateTime::<Utc>::from(meta.modified()?),
        })
    }
}

/// Flat file store rooted at one canonical directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create the upload root if absent and pin it to its canonical path
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a decoded file name to a path strictly inside the root
    pub async fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        let name = validate_name(name)?;
        let path = self.root.join(name);

        // Existing entries may be symlinks; their target must stay inside the root
        match fs::symlink_metadata(&path).await {
            Ok(_) => match fs::canonicalize(&path).await {
                Ok(canonical) if canonical.starts_with(&self.root) => Ok(path),
                Ok(canonical) => Err(StoreError::OutsideRoot(canonical.display().to_string())),
                Err(_) => Err(StoreError::OutsideRoot(path.display().to_string())),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Names of all regular files directly under the root, in directory order.
    ///
    /// Names that are not valid UTF-8 cannot be addressed through a request
    /// path, so they are skipped.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => logger::log_warning(&format!(
                    "Skipping non UTF-8 file name in upload root: {}",
                    raw.to_string_lossy()
                )),
            }
        }

        Ok(names)
    }

    /// Size and modification time; `NotFound` unless the name is a regular file
    pub async fn metadata(&self, name: &str) -> Result<FileMeta, StoreError> {
        let path = self.resolve(name).await?;
        let meta = fs::metadata(&path).await.map_err(StoreError::from_io)?;
        if !meta.is_file() {
            return Err(StoreError::NotFound);
        }
        Ok(FileMeta::from_metadata(&meta)?)
    }

    /// Open a stored file for streaming download
    pub async fn open_file(&self, name: &str) -> Result<(fs::File, FileMeta), StoreError> {
        let path = self.resolve(name).await?;
        let file = fs::File::open(&path).await.map_err(StoreError::from_io)?;
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(StoreError::NotFound);
        }
        Ok((file, FileMeta::from_metadata(&meta)?))
    }

    /// Create or truncate `name` and stream `body` into it frame by frame.
    ///
    /// Returns the number of bytes written. A body error leaves whatever was
    /// already written in place.
    pub async fn write<B>(&self, name: &str, mut body: B) -> Result<u64, StoreError>
    where
        B: Body<Data = Bytes> + Unpin,
        B::Error: Display,
    {
        let path = self.resolve(name).await?;
        let mut file = fs::File::create(&path).await?;
        let mut written: u64 = 0;

        while let Some(frame) = body.frame().await {
            let frame = frame.map_err(|e| StoreError::Body(e.to_string()))?;
            // Trailers carry no file content
            if let Ok(chunk) = frame.into_data() {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
        }

        file.flush().await?;
        Ok(written)
    }

    pub async fn remove(&self, name: &str) -> Result<(), StoreError> {
        let path = self.resolve(name).await?;
        let meta = fs::metadata(&path).await.map_err(StoreError::from_io)?;
        if !meta.is_file() {
            return Err(StoreError::NotFound);
        }
        fs::remove_file(&path).await.map_err(StoreError::from_io)
    }
}

/// Check that a decoded name addresses a single entry of the flat namespace
pub fn validate_name(name: &str) -> Result<&str, StoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        Err(StoreError::InvalidName(name.to_string()))
    } else {
        Ok(name)
    }
}
