//! Filesystem object storage for generated images
//!
//! Objects are written under `<root>/<yyyy>/<mm>/<dd>/<uuid>.<ext>` and exposed
//! at the same relative path below the public base URL.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::outbound::{ObjectStoragePort, StorageError};

pub struct LocalAssetStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalAssetStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_key(extension: &str) -> String {
        format!("{}/{}.{}", Utc::now().format("%Y/%m/%d"), Uuid::new_v4(), extension)
    }
}

fn extension_for(content_type: &str) -> Result<&'static str, StorageError> {
    match content_type {
        "image/png" => Ok("png"),
        "image/jpeg" | "image/jpg" => Ok("jpg"),
        "image/webp" => Ok("webp"),
        other => Err(StorageError::Rejected(format!(
            "unsupported content type '{}'",
            other
        ))),
    }
}

#[async_trait]
impl ObjectStoragePort for LocalAssetStorage {
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Rejected("empty object".to_string()));
        }

        let key = Self::object_key(extension_for(content_type)?);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::comfyui::content_type_for;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("statforge-assets-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_put_writes_file_and_returns_url() {
        let root = temp_root();
        let storage = LocalAssetStorage::new(&root, "http://localhost:3000/assets/");

        let url = storage.put(vec![1, 2, 3], "image/png").await.unwrap();
        let prefix = format!(
            "http://localhost:3000/assets/{}/",
            Utc::now().format("%Y/%m/%d")
        );
        assert!(url.starts_with(&prefix), "url: {}", url);
        assert!(url.ends_with(".png"));

        let key = url.trim_start_matches("http://localhost:3000/assets/");
        let written = tokio::fs::read(root.join(key)).await.unwrap();
        assert_eq!(written, vec![1, 2, 3]);

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_unknown_content_type() {
        let storage = LocalAssetStorage::new(temp_root(), "http://localhost:3000/assets");
        let result = storage.put(vec![1], "image/gif").await;
        assert!(matches!(result, Err(StorageError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_accepts_every_renderer_content_type() {
        let root = temp_root();
        let storage = LocalAssetStorage::new(&root, "http://localhost:3000/assets");

        for (filename, extension) in [
            ("out_00001_.png", ".png"),
            ("out_00001_.JPEG", ".jpg"),
            ("out_00001_.webp", ".webp"),
            ("out_00001_.bmp", ".png"),
        ] {
            let url = storage.put(vec![7], content_type_for(filename)).await.unwrap();
            assert!(url.ends_with(extension), "{} -> {}", filename, url);
        }

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_empty_object() {
        let storage = LocalAssetStorage::new(temp_root(), "http://localhost:3000/assets");
        let result = storage.put(Vec::new(), "image/png").await;
        assert!(matches!(result, Err(StorageError::Rejected(_))));
    }
}
