//! Storage adapters persist rendered catalogs under a folder path.

use std::{
    fs,
    path::{Component, Path, PathBuf},
    sync::Mutex,
};

use crate::error::StorageError;

/// Persists one document. The destination is a list of folder names,
/// outermost first; missing folders are created.
pub trait StorageAdapter {
    fn store(
        &self,
        content: &str,
        file_name: &str,
        mime_type: &str,
        destination: &[String],
    ) -> Result<(), StorageError>;
}

impl<T: StorageAdapter + ?Sized> StorageAdapter for &T {
    fn store(
        &self,
        content: &str,
        file_name: &str,
        mime_type: &str,
        destination: &[String],
    ) -> Result<(), StorageError> {
        (**self).store(content, file_name, mime_type, destination)
    }
}

/// Writes documents below a root directory on the local file system.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
}

impl FileSystemStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where a document with this name and destination ends up.
    pub fn target_path(
        &self,
        file_name: &str,
        destination: &[String],
    ) -> Result<PathBuf, StorageError> {
        let mut path = self.root.clone();
        for segment in destination {
            path.push(checked_segment(segment)?);
        }
        path.push(checked_segment(file_name)?);
        Ok(path)
    }

    /// Returns the folder for `destination`, creating each missing level.
    fn ensure_folders(&self, destination: &[String]) -> Result<PathBuf, StorageError> {
        let mut folder = self.root.clone();
        for segment in destination {
            folder.push(checked_segment(segment)?);
            if folder.is_dir() {
                continue;
            }
            tracing::debug!("Creating folder {}", folder.display());
            fs::create_dir_all(&folder).map_err(|source| StorageError::Io {
                path: folder.clone(),
                source,
            })?;
        }
        Ok(folder)
    }
}

impl StorageAdapter for FileSystemStorage {
    fn store(
        &self,
        content: &str,
        file_name: &str,
        mime_type: &str,
        destination: &[String],
    ) -> Result<(), StorageError> {
        let folder = self.ensure_folders(destination)?;
        let path = folder.join(checked_segment(file_name)?);
        fs::write(&path, content).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Stored {} ({}) at {}", file_name, mime_type, path.display());
        Ok(())
    }
}

/// A segment must name exactly one entry inside its parent folder.
fn checked_segment(segment: &str) -> Result<&str, StorageError> {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(segment),
        _ => Err(StorageError::InvalidDestination(segment.to_string())),
    }
}

/// One document handed to a [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub content: String,
    pub file_name: String,
    pub mime_type: String,
    pub destination: Vec<String>,
}

impl StoredDocument {
    /// `destination` and `file_name` joined with `/`.
    pub fn path(&self) -> String {
        let mut parts = self.destination.clone();
        parts.push(self.file_name.clone());
        parts.join("/")
    }
}

/// Keeps stored documents in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: Mutex<Vec<StoredDocument>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything stored so far, in store order.
    pub fn documents(&self) -> Vec<StoredDocument> {
        match self.documents.lock() {
            Ok(documents) => documents.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl StorageAdapter for MemoryStorage {
    fn store(
        &self,
        content: &str,
        file_name: &str,
        mime_type: &str,
        destination: &[String],
    ) -> Result<(), StorageError> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        documents.push(StoredDocument {
            content: content.to_string(),
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            destination: destination.to_vec(),
        });
        Ok(())
    }
}
