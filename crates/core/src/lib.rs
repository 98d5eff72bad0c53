//! r2kit-core: Core types for the r2kit object-storage client
//!
//! This crate provides the backend-neutral foundation for r2kit, including:
//! - Error taxonomy shared by every operation
//! - Object-key normalization
//! - The public base URL registry used to derive externally reachable URLs
//! - Normalized result types (uploads, metadata, listings, tags, CORS)
//! - Transfer progress reporting
//!
//! This crate is independent of any specific S3 SDK, allowing for easy
//! testing and potential future support for other backends.

pub mod error;
pub mod key;
pub mod progress;
pub mod types;
pub mod urls;

pub use error::{Error, Result};
pub use key::{key_from_file_name, normalize_key};
pub use progress::{ProgressFn, TransferProgress, progress_fn};
pub use types::{
    CopyResult, CorsRule, EncryptionRule, ObjectListing, ObjectMetadata, ObjectSummary, Tag,
    UploadResult,
};
pub use urls::{PublicUrlSet, normalize_origin};
