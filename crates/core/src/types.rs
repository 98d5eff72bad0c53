//! Normalized result types
//!
//! Stable shapes returned by the bucket operations, independent of any SDK.
//! All of them are immutable snapshots of remote state at call time; nothing
//! here is cached.

use std::collections::HashMap;

use jiff::Timestamp;
use serde::Serialize;

/// Result of a completed upload (single-shot or streamed)
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    /// Object key, normalized (no leading separators)
    pub key: String,
    /// Canonical bucket-relative URI: `endpoint-origin/bucket/key`
    pub uri: String,
    /// Externally reachable URLs, one per registered public base URL.
    ///
    /// Derived from handle configuration only — the object may still be
    /// private; these URLs say nothing about its ACL.
    pub public_urls: Vec<String>,
    /// Entity tag reported by the service
    pub etag: Option<String>,
    /// Version id, when the bucket is versioned
    pub version_id: Option<String>,
}

impl UploadResult {
    /// First public URL, if any base URL is registered
    pub fn public_url(&self) -> Option<&str> {
        self.public_urls.first().map(String::as_str)
    }
}

/// Metadata snapshot from a head-object query
#[derive(Debug, Clone, Serialize)]
pub struct ObjectMetadata {
    pub last_modified: Option<Timestamp>,
    pub content_length: i64,
    pub accept_ranges: bool,
    pub etag: Option<String>,
    pub content_type: Option<String>,
    /// User-defined metadata (`x-amz-meta-*`)
    pub metadata: HashMap<String, String>,
}

/// One entry in an object listing page
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSummary {
    pub key: String,
    pub last_modified: Option<Timestamp>,
    pub etag: Option<String>,
    pub checksum_algorithms: Vec<String>,
    pub size_bytes: i64,
    pub storage_class: Option<String>,
}

/// A single page of an object listing
///
/// Pagination is caller-driven: pass [`next_marker`](Self::next_marker) back
/// in as the next call's marker. An absent `next_marker` means the listing is
/// exhausted.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectListing {
    pub objects: Vec<ObjectSummary>,
    /// Marker this page was requested with
    pub marker: Option<String>,
    /// Marker for the next page, absent when exhausted
    pub next_marker: Option<String>,
}

/// A bucket or object tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One CORS rule from the bucket's CORS configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorsRule {
    pub id: Option<String>,
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_origins: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub max_age_seconds: Option<i32>,
}

/// One server-side encryption rule from the bucket configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct EncryptionRule {
    /// SSE algorithm (`AES256`, `aws:kms`)
    pub algorithm: Option<String>,
    /// KMS key id, when the algorithm uses one
    pub kms_key_id: Option<String>,
    pub bucket_key_enabled: bool,
}

/// Normalized result of a same-bucket copy
#[derive(Debug, Clone, Serialize)]
pub struct CopyResult {
    /// Destination key, normalized
    pub key: String,
    pub etag: Option<String>,
    pub last_modified: Option<Timestamp>,
}
