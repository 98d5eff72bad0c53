//! r2kit-s3: aws-sdk-s3 adapter for the r2kit object-storage client
//!
//! The [`StorageClient`] wraps one SDK client per endpoint configuration and
//! hands out [`Bucket`] handles; the handle translates each operation into
//! one signed request and normalizes the response into the stable shapes
//! from `r2kit-core`.
//!
//! ```no_run
//! use r2kit_s3::{ClientConfig, StorageClient};
//!
//! # async fn example() -> r2kit_core::Result<()> {
//! let client = StorageClient::new(ClientConfig::new(
//!     "https://acct.r2.cloudflarestorage.com",
//!     "access-key",
//!     "secret-key",
//! ))
//! .await?;
//!
//! let mut media = client.bucket("media");
//! media.register_public_base_url("https://cdn.example.com")?;
//!
//! let result = media
//!     .upload(&b"hello"[..], "greetings/hello.txt", None, Some("text/plain"))
//!     .await?;
//! println!("uploaded {} -> {:?}", result.key, result.public_url());
//! # Ok(())
//! # }
//! ```

pub mod bucket;
pub mod client;
pub mod multipart;

mod sdk;

pub use bucket::{Bucket, DEFAULT_LIST_PAGE_SIZE};
pub use client::{ClientConfig, StorageClient};
pub use multipart::{
    DEFAULT_PART_SIZE, MIN_PART_SIZE, MultipartUpload, MultipartUploadConfig, UploadOutcome,
};

// Re-export the core types callers handle directly
pub use r2kit_core::{
    CopyResult, CorsRule, EncryptionRule, Error, ObjectListing, ObjectMetadata, ObjectSummary,
    ProgressFn, Result, Tag, TransferProgress, UploadResult, progress_fn,
};
