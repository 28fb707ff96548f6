//! Image upload pipeline
//!
//! Validate, hash, upload: payloads are named by content hash so the
//! same image uploaded twice lands on the same blob path, and progress
//! events stream back to the caller while the transfer runs.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use shared::error::{AppError, AppResult, ErrorCode};
use tokio::sync::mpsc;
use vitrine_store::{BlobStore, UploadProgress};

use crate::forms::validate_image_file;

/// Blob namespace for catalog images
pub const UPLOAD_NAMESPACE: &str = "products";

/// A completed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Publicly resolvable URL
    pub url: String,
    /// Blob path the payload was stored under
    pub path: String,
    /// Content hash (SHA-256, hex)
    pub hash: String,
    pub size: usize,
    pub format: String,
}

fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Image upload service over the blob store
#[derive(Clone)]
pub struct ImageUploadService<B: BlobStore> {
    blob: Arc<B>,
}

impl<B: BlobStore> ImageUploadService<B> {
    pub fn new(blob: Arc<B>) -> Self {
        Self { blob }
    }

    /// Validate and upload an image, forwarding progress events.
    ///
    /// The blob path is `products/<hh>/<hash>.<ext>` with a two-char
    /// fan-out prefix, so identical payloads deduplicate by name.
    pub async fn upload(
        &self,
        filename: &str,
        data: Vec<u8>,
        progress: Option<mpsc::Sender<UploadProgress>>,
    ) -> AppResult<UploadedImage> {
        validate_image_file(&data, filename)?;

        let format = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let content_type = mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string();

        let hash = content_hash(&data);
        let path = format!("{}/{}/{}.{}", UPLOAD_NAMESPACE, &hash[..2], hash, format);
        let size = data.len();

        let url = self
            .blob
            .upload(&path, data, &content_type, progress)
            .await
            .map_err(|e| {
                AppError::with_message(ErrorCode::UploadFailed, e.to_string())
            })?;

        tracing::info!(
            original_name = %filename,
            size,
            hash = %hash,
            "Image uploaded"
        );

        Ok(UploadedImage {
            url,
            path,
            hash,
            size,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_store::MemoryBlobStore;

    /// Smallest valid 1x1 PNG
    fn tiny_png() -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        let img = image::RgbImage::new(1, 1);
        img.write_to(&mut buffer, image::ImageFormat::Png)
            .expect("encode fixture");
        buffer.into_inner()
    }

    #[tokio::test]
    async fn test_upload_names_by_content_hash() {
        let blob = Arc::new(MemoryBlobStore::new());
        let service = ImageUploadService::new(blob.clone());

        let data = tiny_png();
        let expected_hash = content_hash(&data);

        let uploaded = service.upload("vase.png", data, None).await.unwrap();
        assert_eq!(uploaded.hash, expected_hash);
        assert_eq!(
            uploaded.path,
            format!("products/{}/{}.png", &expected_hash[..2], expected_hash)
        );
        assert_eq!(uploaded.url, format!("memory://{}", uploaded.path));
        assert!(blob.object(&uploaded.path).is_some());
    }

    #[tokio::test]
    async fn test_upload_emits_progress() {
        let blob = Arc::new(MemoryBlobStore::new());
        let service = ImageUploadService::new(blob);

        let (tx, mut rx) = mpsc::channel(8);
        service
            .upload("vase.png", tiny_png(), Some(tx))
            .await
            .unwrap();

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(!events.is_empty());
        let last = events.last().unwrap();
        assert_eq!(last.bytes_sent, last.total_bytes);
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_blob_store() {
        let blob = Arc::new(MemoryBlobStore::new());
        let service = ImageUploadService::new(blob.clone());

        let err = service
            .upload("vase.png", b"not an image".to_vec(), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImageFile);
        assert!(blob.is_empty());
    }
}
