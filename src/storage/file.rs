//! File-based blob store.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MicroSearchError, Result};
use crate::snapshot::DEFAULT_SNAPSHOT_FILE;
use crate::storage::traits::{BlobStore, StorageError};

/// Configuration for [`FileBlobStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// The index root directory.
    pub root: PathBuf,

    /// Name of the snapshot file inside the root.
    pub file_name: String,

    /// Whether to fsync the snapshot before it replaces the previous one.
    pub sync_writes: bool,

    /// Buffer size for writes.
    pub buffer_size: usize,
}

impl FileStoreConfig {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        FileStoreConfig {
            root: root.as_ref().to_path_buf(),
            file_name: DEFAULT_SNAPSHOT_FILE.to_string(),
            sync_writes: true,
            buffer_size: 65536, // 64KB
        }
    }

    pub fn with_file_name<S: Into<String>>(mut self, file_name: S) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }
}

/// A blob store keeping the snapshot at `<root>/<file_name>`.
///
/// The root directory is created on construction and again before each write,
/// so destroying the blob never strands the store.
#[derive(Debug)]
pub struct FileBlobStore {
    config: FileStoreConfig,
    path: PathBuf,
}

impl FileBlobStore {
    /// Create a new file store.
    pub fn new(config: FileStoreConfig) -> Result<Self> {
        if config.file_name.is_empty() || config.file_name.contains(['/', '\\']) {
            return Err(MicroSearchError::invalid_config(format!(
                "snapshot file name '{}' must be a plain file name",
                config.file_name
            )));
        }

        Self::ensure_directory(&config.root)?;

        let path = config.root.join(&config.file_name);
        Ok(FileBlobStore { config, path })
    }

    /// Create a store with the default file name under `root`.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::new(FileStoreConfig::new(root))
    }

    /// Get the path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    fn ensure_directory(directory: &Path) -> Result<()> {
        if !directory.exists() {
            fs::create_dir_all(directory).map_err(|e| {
                MicroSearchError::storage(format!(
                    "Failed to create directory {}: {e}",
                    directory.display()
                ))
            })?;
        }

        if !directory.is_dir() {
            return Err(MicroSearchError::storage(format!(
                "Path is not a directory: {}",
                directory.display()
            )));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        self.config
            .root
            .join(format!(".{}.tmp", self.config.file_name))
    }

    fn io_error(&self, err: std::io::Error) -> MicroSearchError {
        StorageError::from_io(&self.location(), err).into()
    }
}

impl BlobStore for FileBlobStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn last_modified(&self) -> Result<Option<DateTime<Utc>>> {
        match fs::metadata(&self.path) {
            Ok(metadata) => {
                let modified = metadata.modified().map_err(|e| self.io_error(e))?;
                Ok(Some(DateTime::<Utc>::from(modified)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| self.io_error(e))
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        Self::ensure_directory(&self.config.root)?;

        let temp_path = self.temp_path();
        let file = File::create(&temp_path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, file);
        writer.write_all(bytes).map_err(|e| self.io_error(e))?;
        let file = writer
            .into_inner()
            .map_err(|e| self.io_error(e.into_error()))?;
        if self.config.sync_writes {
            file.sync_all().map_err(|e| self.io_error(e))?;
        }
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;
        log::debug!("wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("removed {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
