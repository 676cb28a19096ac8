use std::sync::Arc;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage rejected object: {0}")]
    Rejected(String),
}

/// Publishes generated assets and hands back a URL clients can fetch
#[async_trait]
pub trait ObjectStoragePort: Send + Sync {
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError>;
}

#[async_trait]
impl<T: ObjectStoragePort + ?Sized> ObjectStoragePort for Arc<T> {
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        (**self).put(bytes, content_type).await
    }
}
