//! HTTP blob store adapter
//!
//! Uploads payloads to the object storage endpoint over HTTPS and maps
//! the stored path to its public URL. The payload is streamed in fixed
//! chunks so progress events track what has actually been handed to the
//! transport.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::sync::mpsc;

use crate::blob::{BlobError, BlobStore, UploadProgress};

/// Upload chunk size (64 KiB)
const CHUNK_SIZE: usize = 64 * 1024;

/// Blob store backed by the remote object storage HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: Client,
    upload_base: String,
    public_base: String,
}

impl HttpBlobStore {
    /// Create a new adapter.
    ///
    /// `upload_base` receives `PUT {upload_base}/{path}`; the returned
    /// public URL is `{public_base}/{path}`.
    pub fn new(upload_base: impl Into<String>, public_base: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            upload_base: trim_slash(upload_base.into()),
            public_base: trim_slash(public_base.into()),
        }
    }
}

fn trim_slash(mut s: String) -> String {
    while s.ends_with('/') {
        s.pop();
    }
    s
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        progress: Option<mpsc::Sender<UploadProgress>>,
    ) -> Result<String, BlobError> {
        let url = format!("{}/{}", self.upload_base, path);
        let total = bytes.len() as u64;

        // Stream the body in chunks; each yielded chunk reports progress
        // before it reaches the wire.
        let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(|c| c.to_vec()).collect();
        let mut sent = 0u64;
        let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            if let Some(tx) = &progress {
                let _ = tx.try_send(UploadProgress {
                    bytes_sent: sent,
                    total_bytes: total,
                });
            }
            Ok::<_, std::io::Error>(chunk)
        }));

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CONTENT_LENGTH, total)
            .body(reqwest::Body::wrap_stream(stream))
            .send()
            .await
            .map_err(|e| BlobError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::PAYLOAD_TOO_LARGE => Err(BlobError::Rejected(text)),
                StatusCode::UNSUPPORTED_MEDIA_TYPE => Err(BlobError::Rejected(text)),
                _ => Err(BlobError::Http(format!("HTTP {}: {}", status, text))),
            };
        }

        tracing::info!(path = %path, size = total, "Blob uploaded");
        Ok(format!("{}/{}", self.public_base, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_slash() {
        assert_eq!(trim_slash("https://blobs.example/".to_string()), "https://blobs.example");
        assert_eq!(trim_slash("https://blobs.example".to_string()), "https://blobs.example");
    }
}
