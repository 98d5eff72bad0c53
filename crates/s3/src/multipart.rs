//! Multipart upload collaborator
//!
//! Owns the chunked-transfer protocol for streamed uploads: part splitting,
//! sequential part upload, completion, and best-effort abort on failure. The
//! bucket handle orchestrates it and observes progress; it never sees partial
//! results.
//!
//! Inputs that fit in a single part skip the multipart protocol entirely and
//! go through one PutObject request.

use std::collections::HashMap;

use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use r2kit_core::{Error, ProgressFn, Result, TransferProgress};

use crate::sdk::map_sdk_error;

/// S3 minimum for every part except the last
pub const MIN_PART_SIZE: u64 = 5 * 1024 * 1024;

/// Default part size
pub const DEFAULT_PART_SIZE: u64 = 8 * 1024 * 1024;

/// Tuning knobs for a multipart upload
#[derive(Debug, Clone, Copy)]
pub struct MultipartUploadConfig {
    /// Bytes per part; values below [`MIN_PART_SIZE`] are clamped up
    pub part_size: u64,
}

impl Default for MultipartUploadConfig {
    fn default() -> Self {
        Self {
            part_size: DEFAULT_PART_SIZE,
        }
    }
}

impl MultipartUploadConfig {
    /// Part size with the service minimum enforced
    pub fn effective_part_size(&self) -> u64 {
        self.part_size.max(MIN_PART_SIZE)
    }
}

/// Terminal result of a streamed transfer
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub etag: Option<String>,
    pub version_id: Option<String>,
}

/// One streamed upload of one object.
///
/// Construct, optionally attach a progress sink, then consume with
/// [`send`](Self::send). Progress fires zero or more times with cumulative,
/// non-decreasing byte counts; `send` resolves exactly once.
pub struct MultipartUpload {
    client: aws_sdk_s3::Client,
    bucket: String,
    key: String,
    content_type: Option<String>,
    metadata: Option<HashMap<String, String>>,
    config: MultipartUploadConfig,
    progress: Option<ProgressFn>,
}

impl MultipartUpload {
    pub fn new(
        client: aws_sdk_s3::Client,
        bucket: impl Into<String>,
        key: impl Into<String>,
        content_type: Option<String>,
        metadata: Option<HashMap<String, String>>,
        config: MultipartUploadConfig,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            key: key.into(),
            content_type,
            metadata,
            config,
            progress: None,
        }
    }

    /// Attach a progress sink; must be called before [`send`](Self::send)
    pub fn on_progress(mut self, f: ProgressFn) -> Self {
        self.progress = Some(f);
        self
    }

    /// Run the transfer to completion.
    ///
    /// On a part or completion failure the multipart upload is aborted
    /// best-effort and the original error propagates.
    pub async fn send<R>(self, mut reader: R) -> Result<UploadOutcome>
    where
        R: AsyncRead + Unpin + Send,
    {
        let part_size = self.config.effective_part_size() as usize;
        let first = read_part(&mut reader, part_size).await?;

        // Small payloads never enter the multipart protocol
        if first.len() < part_size {
            return self.send_single(first).await;
        }

        let create = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(&self.key)
            .set_content_type(self.content_type.clone())
            .set_metadata(self.metadata.clone())
            .send()
            .await
            .map_err(|e| map_sdk_error("create_multipart_upload", &self.key, &e))?;

        let upload_id = create
            .upload_id()
            .ok_or_else(|| Error::General("multipart upload: service returned no upload id".to_string()))?
            .to_string();

        tracing::debug!(bucket = %self.bucket, key = %self.key, upload_id = %upload_id, "started multipart upload");

        match self.upload_parts(&mut reader, &upload_id, first, part_size).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.abort(&upload_id).await;
                Err(e)
            }
        }
    }

    /// Single-request path for payloads smaller than one part
    async fn send_single(self, data: Vec<u8>) -> Result<UploadOutcome> {
        let total = data.len() as u64;
        let response = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .set_content_type(self.content_type.clone())
            .set_metadata(self.metadata.clone())
            .body(aws_sdk_s3::primitives::ByteStream::from(Bytes::from(data)))
            .send()
            .await
            .map_err(|e| map_sdk_error("put_object", &self.key, &e))?;

        self.notify(total, Some(total), 0);

        Ok(UploadOutcome {
            etag: response.e_tag().map(|s| s.trim_matches('"').to_string()),
            version_id: response.version_id().map(|s| s.to_string()),
        })
    }

    async fn upload_parts<R>(
        &self,
        reader: &mut R,
        upload_id: &str,
        first: Vec<u8>,
        part_size: usize,
    ) -> Result<UploadOutcome>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut completed: Vec<CompletedPart> = Vec::new();
        let mut bytes_sent: u64 = 0;
        let mut part_number: i32 = 0;
        let mut chunk = first;

        while !chunk.is_empty() {
            part_number += 1;
            let chunk_len = chunk.len() as u64;

            let part = self
                .client
                .upload_part()
                .bucket(&self.bucket)
                .key(&self.key)
                .upload_id(upload_id)
                .part_number(part_number)
                .body(aws_sdk_s3::primitives::ByteStream::from(Bytes::from(chunk)))
                .send()
                .await
                .map_err(|e| map_sdk_error("upload_part", &self.key, &e))?;

            completed.push(
                CompletedPart::builder()
                    .part_number(part_number)
                    .set_e_tag(part.e_tag().map(|s| s.to_string()))
                    .build(),
            );

            bytes_sent += chunk_len;
            self.notify(bytes_sent, None, part_number);

            chunk = read_part(reader, part_size).await?;
        }

        let response = self
            .client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(&self.key)
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| map_sdk_error("complete_multipart_upload", &self.key, &e))?;

        tracing::debug!(bucket = %self.bucket, key = %self.key, parts = part_number, bytes = bytes_sent, "completed multipart upload");

        Ok(UploadOutcome {
            etag: response.e_tag().map(|s| s.trim_matches('"').to_string()),
            version_id: response.version_id().map(|s| s.to_string()),
        })
    }

    /// Best-effort abort; the original transfer error is what propagates
    async fn abort(&self, upload_id: &str) {
        if let Err(e) = self
            .client
            .abort_multipart_upload()
            .bucket(&self.bucket)
            .key(&self.key)
            .upload_id(upload_id)
            .send()
            .await
        {
            tracing::warn!(
                bucket = %self.bucket,
                key = %self.key,
                upload_id = %upload_id,
                error = %crate::sdk::format_sdk_error(&e),
                "failed to abort multipart upload"
            );
        }
    }

    fn notify(&self, bytes_transferred: u64, total_bytes: Option<u64>, part_number: i32) {
        if let Some(f) = &self.progress {
            f(&TransferProgress {
                bytes_transferred,
                total_bytes,
                part_number,
            });
        }
    }
}

/// Read up to `part_size` bytes, tolerating short reads from the reader
async fn read_part<R>(reader: &mut R, part_size: usize) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; part_size];
    let mut filled = 0;

    while filled < part_size {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    buf.truncate(filled);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_size_clamped_to_service_minimum() {
        let config = MultipartUploadConfig { part_size: 1024 };
        assert_eq!(config.effective_part_size(), MIN_PART_SIZE);

        let config = MultipartUploadConfig {
            part_size: 16 * 1024 * 1024,
        };
        assert_eq!(config.effective_part_size(), 16 * 1024 * 1024);
    }

    #[test]
    fn test_default_part_size_above_minimum() {
        let config = MultipartUploadConfig::default();
        assert!(config.effective_part_size() >= MIN_PART_SIZE);
        assert_eq!(config.effective_part_size(), DEFAULT_PART_SIZE);
    }

    #[tokio::test]
    async fn test_read_part_fills_from_short_reads() {
        // &[u8] yields everything in one read; chain two to force a boundary
        let data = vec![7u8; 100];
        let mut reader: &[u8] = &data;

        let part = read_part(&mut reader, 64).await.unwrap();
        assert_eq!(part.len(), 64);

        let rest = read_part(&mut reader, 64).await.unwrap();
        assert_eq!(rest.len(), 36);

        let empty = read_part(&mut reader, 64).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_read_part_empty_reader() {
        let mut reader: &[u8] = &[];
        let part = read_part(&mut reader, 64).await.unwrap();
        assert!(part.is_empty());
    }

    #[tokio::test]
    async fn test_read_part_exact_boundary() {
        let data = vec![1u8; 128];
        let mut reader: &[u8] = &data;

        let part = read_part(&mut reader, 128).await.unwrap();
        assert_eq!(part.len(), 128);

        let next = read_part(&mut reader, 128).await.unwrap();
        assert!(next.is_empty());
    }
}
