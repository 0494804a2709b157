//! Storage abstraction trait
//!
//! This module defines the trait that all asset storage backends implement.

use async_trait::async_trait;
use thiserror::Error;
use tienda_core::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Asset storage abstraction
///
/// Backends persist a binary file under a key derived from the filename and
/// return both the key and a publicly reachable URL. The upload handler and
/// the editor service only ever see the URL; the key is kept for delete and
/// existence checks.
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Store a file and return (storage_key, public_url).
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)>;

    /// Read a stored file back by its storage key.
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a stored file by its storage key.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check whether a stored file exists.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// The backend type serving this storage.
    fn backend_type(&self) -> StorageBackend;
}
