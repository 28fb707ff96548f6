//! Blob store contract
//!
//! The remote object storage service accepts a binary payload at a
//! namespaced path and returns a publicly resolvable URL. Uploads emit
//! progress events through an optional channel.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::mpsc;

/// Blob store error type
#[derive(Debug, Error)]
pub enum BlobError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service refused the payload
    #[error("Upload rejected: {0}")]
    Rejected(String),
}

/// Progress of an in-flight upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub total_bytes: u64,
}

/// Remote blob store contract
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a payload to `path`, returning its public URL.
    ///
    /// When a progress sender is supplied, implementations emit
    /// [`UploadProgress`] events as bytes are handed to the transport.
    /// Progress delivery is best-effort; a full channel never fails the
    /// upload.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        progress: Option<mpsc::Sender<UploadProgress>>,
    ) -> Result<String, BlobError>;
}

/// In-memory blob store for tests and demos
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: RwLock<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored object back (test observability)
    pub fn object(&self, path: &str) -> Option<(String, Vec<u8>)> {
        self.objects.read().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        progress: Option<mpsc::Sender<UploadProgress>>,
    ) -> Result<String, BlobError> {
        let total = bytes.len() as u64;
        if let Some(tx) = &progress {
            let _ = tx
                .send(UploadProgress {
                    bytes_sent: 0,
                    total_bytes: total,
                })
                .await;
            let _ = tx
                .send(UploadProgress {
                    bytes_sent: total,
                    total_bytes: total,
                })
                .await;
        }

        self.objects
            .write()
            .insert(path.to_string(), (content_type.to_string(), bytes));

        tracing::debug!(path = %path, size = total, "Blob stored in memory");
        Ok(format!("memory://{}", path))
    }
}
