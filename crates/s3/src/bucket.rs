//! Bucket handle
//!
//! The operational core of the crate: every public operation translates its
//! typed parameters into one SDK request, awaits the response, and normalizes
//! it into the stable shapes from `r2kit-core`.
//!
//! Error policy is per-operation, not global: `exists`/`object_exists`
//! swallow every failure to `false`, `cors_policies` swallows to an empty
//! list, tag reads swallow only the `NoSuchTagSet` condition, and everything
//! else propagates the transport failure unchanged.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use aws_sdk_s3::types as s3t;
use bytes::Bytes;
use jiff::Timestamp;
use tokio::io::AsyncRead;

use r2kit_core::{
    CopyResult, CorsRule, EncryptionRule, Error, ObjectListing, ObjectMetadata, ObjectSummary,
    ProgressFn, PublicUrlSet, Result, Tag, UploadResult, key_from_file_name, normalize_key,
};

use crate::multipart::{MultipartUpload, MultipartUploadConfig};
use crate::sdk::map_sdk_error;

/// Default page size for [`Bucket::list_objects`]
pub const DEFAULT_LIST_PAGE_SIZE: i32 = 1000;

/// Handle for one bucket of one [`StorageClient`](crate::StorageClient).
///
/// Holds the bucket identity plus the registered public base URLs; all other
/// state lives remotely and is queried per call, never cached.
pub struct Bucket {
    client: aws_sdk_s3::Client,
    name: String,
    uri: String,
    public_urls: PublicUrlSet,
}

impl Bucket {
    pub(crate) fn new(client: aws_sdk_s3::Client, endpoint_origin: &str, name: &str) -> Self {
        Self {
            client,
            name: name.to_string(),
            uri: format!("{endpoint_origin}/{name}"),
            public_urls: PublicUrlSet::new(),
        }
    }

    /// Bucket name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical bucket URI: `endpoint-origin/name`
    pub fn uri(&self) -> &str {
        &self.uri
    }

    // ========== Public URL registry ==========

    /// Register a public base URL (CDN or custom domain) for this bucket.
    ///
    /// The URL is reduced to its origin; duplicate origins are ignored.
    /// No network effect.
    pub fn register_public_base_url(&mut self, url: &str) -> Result<()> {
        self.public_urls.register(url)?;
        Ok(())
    }

    /// Register several public base URLs, element-wise
    pub fn register_public_base_urls<I, S>(&mut self, urls: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.public_urls.register_all(urls)
    }

    /// Registered public base URLs, in insertion order
    pub fn public_base_urls(&self) -> &[String] {
        self.public_urls.as_slice()
    }

    /// Externally reachable URLs for `key`, one per registered base URL.
    ///
    /// Empty when no base URL is registered. Derived from handle
    /// configuration only; says nothing about the object's ACL.
    pub fn object_public_urls(&self, key: &str) -> Vec<String> {
        self.public_urls.object_urls(key)
    }

    /// Presigned time-limited download URL for `key`
    pub async fn signed_object_url(&self, key: &str, expires_in_secs: u64) -> Result<String> {
        let config = aws_sdk_s3::presigning::PresigningConfig::builder()
            .expires_in(Duration::from_secs(expires_in_secs))
            .build()
            .map_err(|e| Error::General(format!("signed_object_url config: {e}")))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.name)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| map_sdk_error("signed_object_url", key, &e))?;

        Ok(request.uri().to_string())
    }

    // ========== Existence & descriptive queries ==========

    /// Best-effort existence check.
    ///
    /// True only on an explicit HeadBucket success; every failure — not
    /// found, permission denied, network — collapses to `false`. Callers
    /// cannot distinguish "absent" from "query failed".
    pub async fn exists(&self) -> bool {
        match self.client.head_bucket().bucket(&self.name).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(bucket = %self.name, error = %crate::sdk::format_sdk_error(&e), "head_bucket failed, reporting absent");
                false
            }
        }
    }

    /// CORS rules configured on the bucket.
    ///
    /// Any failure, including "no CORS configuration", collapses to an empty
    /// list.
    pub async fn cors_policies(&self) -> Vec<CorsRule> {
        match self.client.get_bucket_cors().bucket(&self.name).send().await {
            Ok(response) => response.cors_rules().iter().map(cors_rule_from).collect(),
            Err(e) => {
                tracing::debug!(bucket = %self.name, error = %crate::sdk::format_sdk_error(&e), "get_bucket_cors failed, reporting no rules");
                Vec::new()
            }
        }
    }

    /// Declared bucket region; `"auto"` when the service omits one (the R2
    /// convention). Propagates failures.
    pub async fn region(&self) -> Result<String> {
        let response = self
            .client
            .get_bucket_location()
            .bucket(&self.name)
            .send()
            .await
            .map_err(|e| map_sdk_error("get_bucket_location", &self.name, &e))?;

        Ok(region_from(response.location_constraint()))
    }

    /// Server-side encryption rules; empty when none configured.
    ///
    /// Unlike [`cors_policies`](Self::cors_policies) this propagates
    /// failures.
    pub async fn encryption(&self) -> Result<Vec<EncryptionRule>> {
        let response = self
            .client
            .get_bucket_encryption()
            .bucket(&self.name)
            .send()
            .await
            .map_err(|e| map_sdk_error("get_bucket_encryption", &self.name, &e))?;

        Ok(response
            .server_side_encryption_configuration()
            .map(|config| config.rules().iter().map(encryption_rule_from).collect())
            .unwrap_or_default())
    }

    /// Best-effort object existence check.
    ///
    /// True iff HeadObject succeeds and reports a non-zero content length;
    /// a zero-byte object is reported as absent (R2-era quirk, kept for
    /// compatibility and pinned by tests).
    pub async fn object_exists(&self, key: &str) -> bool {
        match self
            .client
            .head_object()
            .bucket(&self.name)
            .key(key)
            .send()
            .await
        {
            Ok(response) => response.content_length().unwrap_or(0) > 0,
            Err(e) => {
                tracing::debug!(bucket = %self.name, key = %key, error = %crate::sdk::format_sdk_error(&e), "head_object failed, reporting absent");
                false
            }
        }
    }

    // ========== Uploads ==========

    /// Single-request upload.
    ///
    /// The destination key is normalized (leading separators stripped);
    /// content type defaults to `application/octet-stream`. Unsuitable for
    /// payloads of unknown or very large size — use
    /// [`upload_stream`](Self::upload_stream) for those.
    pub async fn upload(
        &self,
        content: impl Into<Bytes>,
        destination: &str,
        metadata: Option<HashMap<String, String>>,
        content_type: Option<&str>,
    ) -> Result<UploadResult> {
        let key = normalize_key(destination).to_string();
        let body = content.into();
        tracing::debug!(bucket = %self.name, key = %key, bytes = body.len(), "put_object");

        let response = self
            .client
            .put_object()
            .bucket(&self.name)
            .key(&key)
            .content_type(content_type.unwrap_or("application/octet-stream"))
            .set_metadata(metadata)
            .body(aws_sdk_s3::primitives::ByteStream::from(body))
            .send()
            .await
            .map_err(|e| map_sdk_error("put_object", &key, &e))?;

        Ok(self.upload_result(
            key,
            response.e_tag().map(|s| s.trim_matches('"').to_string()),
            response.version_id().map(|s| s.to_string()),
        ))
    }

    /// Upload a local file.
    ///
    /// `destination` defaults to the file name, content type to a guess from
    /// the extension. The file handle is scoped to this call and released on
    /// both success and failure.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        destination: Option<&str>,
        metadata: Option<HashMap<String, String>>,
        content_type: Option<&str>,
    ) -> Result<UploadResult> {
        let path = path.as_ref();
        let key = match destination {
            Some(dest) => dest.to_string(),
            None => key_from_file_name(path)
                .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?,
        };

        let guessed = mime_guess::from_path(path).first_raw();
        let content_type = content_type.or(guessed);

        let data = tokio::fs::read(path).await?;
        self.upload(data, &key, metadata, content_type).await
    }

    /// Streamed upload through the multipart collaborator.
    ///
    /// `on_progress`, when supplied, is registered before the transfer
    /// starts and is invoked zero or more times with cumulative byte counts.
    /// Failures propagate with no partial result; cleanup of already
    /// uploaded parts belongs to the collaborator.
    pub async fn upload_stream<R>(
        &self,
        reader: R,
        destination: &str,
        metadata: Option<HashMap<String, String>>,
        content_type: Option<&str>,
        on_progress: Option<ProgressFn>,
    ) -> Result<UploadResult>
    where
        R: AsyncRead + Unpin + Send,
    {
        let key = normalize_key(destination).to_string();

        let mut transfer = MultipartUpload::new(
            self.client.clone(),
            &self.name,
            &key,
            Some(
                content_type
                    .unwrap_or("application/octet-stream")
                    .to_string(),
            ),
            metadata,
            MultipartUploadConfig::default(),
        );
        if let Some(f) = on_progress {
            transfer = transfer.on_progress(f);
        }

        let outcome = transfer.send(reader).await?;
        Ok(self.upload_result(key, outcome.etag, outcome.version_id))
    }

    fn upload_result(
        &self,
        key: String,
        etag: Option<String>,
        version_id: Option<String>,
    ) -> UploadResult {
        UploadResult {
            uri: format!("{}/{}", self.uri, key),
            public_urls: self.public_urls.object_urls(&key),
            key,
            etag,
            version_id,
        }
    }

    // ========== Object lifecycle ==========

    /// Delete an object; true on success.
    ///
    /// The SDK surfaces every non-2xx response as an error, so a `true`
    /// return implies the service acknowledged the delete. Failures
    /// propagate.
    pub async fn delete_object(&self, key: &str) -> Result<bool> {
        self.client
            .delete_object()
            .bucket(&self.name)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error("delete_object", key, &e))?;

        Ok(true)
    }

    /// Metadata snapshot for one object; propagates not-found
    pub async fn head_object(&self, key: &str) -> Result<ObjectMetadata> {
        let response = self
            .client
            .head_object()
            .bucket(&self.name)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error("head_object", key, &e))?;

        Ok(metadata_from_head(&response))
    }

    /// One listing page.
    ///
    /// Caller-driven pagination: pass the previous page's `next_marker` back
    /// in as `marker`. `max_results` defaults to
    /// [`DEFAULT_LIST_PAGE_SIZE`]. No auto-pagination happens here.
    pub async fn list_objects(
        &self,
        max_results: Option<i32>,
        marker: Option<&str>,
    ) -> Result<ObjectListing> {
        let response = self
            .client
            .list_objects()
            .bucket(&self.name)
            .max_keys(max_results.unwrap_or(DEFAULT_LIST_PAGE_SIZE))
            .set_marker(marker.map(String::from))
            .send()
            .await
            .map_err(|e| map_sdk_error("list_objects", &self.name, &e))?;

        let objects: Vec<ObjectSummary> =
            response.contents().iter().map(summary_from_object).collect();

        let next_marker = next_marker_for(
            response.next_marker(),
            response.is_truncated().unwrap_or(false),
            objects.last().map(|o| o.key.as_str()),
        );

        Ok(ObjectListing {
            objects,
            marker: marker.map(String::from),
            next_marker,
        })
    }

    /// Same-bucket copy; the destination key is normalized.
    ///
    /// The result is normalized like every sibling operation (the raw
    /// service response does not survive this layer).
    pub async fn copy_object(&self, source_key: &str, destination_key: &str) -> Result<CopyResult> {
        let dest = normalize_key(destination_key).to_string();
        let copy_source = format!("{}/{}", self.name, source_key);

        let response = self
            .client
            .copy_object()
            .copy_source(&copy_source)
            .bucket(&self.name)
            .key(&dest)
            .send()
            .await
            .map_err(|e| map_sdk_error("copy_object", source_key, &e))?;

        let result = response.copy_object_result();
        Ok(CopyResult {
            key: dest,
            etag: result
                .and_then(|r| r.e_tag())
                .map(|s| s.trim_matches('"').to_string()),
            last_modified: result.and_then(|r| r.last_modified()).and_then(timestamp_from),
        })
    }

    // ========== Tagging ==========

    /// Current bucket tag set; empty when no tag set is configured.
    ///
    /// Only the `NoSuchTagSet` condition is swallowed; other failures
    /// propagate.
    pub async fn bucket_tags(&self) -> Result<Vec<Tag>> {
        let result = self
            .client
            .get_bucket_tagging()
            .bucket(&self.name)
            .send()
            .await
            .map_err(|e| map_sdk_error("get_bucket_tagging", &self.name, &e));

        match result {
            Ok(response) => Ok(tags_from_sdk(response.tag_set())),
            Err(e) if e.is_no_such_tag_set() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Replace the bucket tag set wholesale (not a merge)
    pub async fn set_bucket_tags(&self, tags: &[Tag]) -> Result<()> {
        self.client
            .put_bucket_tagging()
            .bucket(&self.name)
            .tagging(to_sdk_tagging(tags)?)
            .send()
            .await
            .map_err(|e| map_sdk_error("put_bucket_tagging", &self.name, &e))?;

        Ok(())
    }

    /// Remove the entire bucket tag set
    pub async fn delete_bucket_tags(&self) -> Result<()> {
        self.client
            .delete_bucket_tagging()
            .bucket(&self.name)
            .send()
            .await
            .map_err(|e| map_sdk_error("delete_bucket_tagging", &self.name, &e))?;

        Ok(())
    }

    /// Current tag set of one object; empty when no tag set is configured
    pub async fn object_tags(&self, key: &str) -> Result<Vec<Tag>> {
        let result = self
            .client
            .get_object_tagging()
            .bucket(&self.name)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error("get_object_tagging", key, &e));

        match result {
            Ok(response) => Ok(tags_from_sdk(response.tag_set())),
            Err(e) if e.is_no_such_tag_set() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Replace an object's tag set wholesale (not a merge)
    pub async fn set_object_tags(&self, key: &str, tags: &[Tag]) -> Result<()> {
        self.client
            .put_object_tagging()
            .bucket(&self.name)
            .key(key)
            .tagging(to_sdk_tagging(tags)?)
            .send()
            .await
            .map_err(|e| map_sdk_error("put_object_tagging", key, &e))?;

        Ok(())
    }

    /// Remove an object's entire tag set
    pub async fn delete_object_tags(&self, key: &str) -> Result<()> {
        self.client
            .delete_object_tagging()
            .bucket(&self.name)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error("delete_object_tagging", key, &e))?;

        Ok(())
    }
}

// ========== Response normalization ==========

fn timestamp_from(dt: &aws_sdk_s3::primitives::DateTime) -> Option<Timestamp> {
    Timestamp::from_second(dt.secs()).ok()
}

fn metadata_from_head(
    response: &aws_sdk_s3::operation::head_object::HeadObjectOutput,
) -> ObjectMetadata {
    ObjectMetadata {
        last_modified: response.last_modified().and_then(timestamp_from),
        content_length: response.content_length().unwrap_or(0),
        accept_ranges: response.accept_ranges().is_some(),
        etag: response.e_tag().map(|s| s.trim_matches('"').to_string()),
        content_type: response.content_type().map(|s| s.to_string()),
        metadata: response.metadata().cloned().unwrap_or_default(),
    }
}

fn summary_from_object(object: &s3t::Object) -> ObjectSummary {
    ObjectSummary {
        key: object.key().unwrap_or_default().to_string(),
        last_modified: object.last_modified().and_then(timestamp_from),
        etag: object.e_tag().map(|s| s.trim_matches('"').to_string()),
        checksum_algorithms: object
            .checksum_algorithm()
            .iter()
            .map(|a| a.as_str().to_string())
            .collect(),
        size_bytes: object.size().unwrap_or(0),
        storage_class: object.storage_class().map(|sc| sc.as_str().to_string()),
    }
}

fn cors_rule_from(rule: &s3t::CorsRule) -> CorsRule {
    CorsRule {
        id: rule.id().map(|s| s.to_string()),
        allowed_headers: rule.allowed_headers().to_vec(),
        allowed_methods: rule.allowed_methods().to_vec(),
        allowed_origins: rule.allowed_origins().to_vec(),
        exposed_headers: rule.expose_headers().to_vec(),
        max_age_seconds: rule.max_age_seconds(),
    }
}

fn encryption_rule_from(rule: &s3t::ServerSideEncryptionRule) -> EncryptionRule {
    let default = rule.apply_server_side_encryption_by_default();
    EncryptionRule {
        algorithm: default.map(|d| d.sse_algorithm().as_str().to_string()),
        kms_key_id: default.and_then(|d| d.kms_master_key_id()).map(String::from),
        bucket_key_enabled: rule.bucket_key_enabled().unwrap_or(false),
    }
}

/// Missing or empty location constraint maps to the R2 default region
fn region_from(constraint: Option<&s3t::BucketLocationConstraint>) -> String {
    match constraint {
        Some(c) if !c.as_str().is_empty() => c.as_str().to_string(),
        _ => "auto".to_string(),
    }
}

/// ListObjects (v1) omits `NextMarker` unless a delimiter is set; fall back
/// to the last key of a truncated page.
fn next_marker_for(
    next_marker: Option<&str>,
    truncated: bool,
    last_key: Option<&str>,
) -> Option<String> {
    if !truncated {
        return None;
    }
    next_marker.or(last_key).map(String::from)
}

fn tags_from_sdk(tags: &[s3t::Tag]) -> Vec<Tag> {
    tags.iter()
        .map(|t| Tag::new(t.key(), t.value()))
        .collect()
}

fn to_sdk_tagging(tags: &[Tag]) -> Result<s3t::Tagging> {
    let tag_set: Vec<s3t::Tag> = tags
        .iter()
        .map(|t| {
            s3t::Tag::builder()
                .key(&t.key)
                .value(&t.value)
                .build()
                .map_err(|e| Error::General(format!("invalid tag {}: {e}", t.key)))
        })
        .collect::<Result<_>>()?;

    s3t::Tagging::builder()
        .set_tag_set(Some(tag_set))
        .build()
        .map_err(|e| Error::General(format!("invalid tag set: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::primitives::DateTime;

    fn test_bucket() -> Bucket {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("auto"))
            .build();
        Bucket::new(
            aws_sdk_s3::Client::from_conf(config),
            "https://acct.r2.cloudflarestorage.com",
            "media",
        )
    }

    #[test]
    fn test_identity() {
        let bucket = test_bucket();
        assert_eq!(bucket.name(), "media");
        assert_eq!(bucket.uri(), "https://acct.r2.cloudflarestorage.com/media");
    }

    #[test]
    fn test_public_url_registration_dedupes_origins() {
        let mut bucket = test_bucket();
        bucket.register_public_base_url("https://cdn.x/a").unwrap();
        bucket.register_public_base_url("https://cdn.x/b").unwrap();
        bucket
            .register_public_base_urls(["https://mirror.y", "https://cdn.x"])
            .unwrap();

        assert_eq!(
            bucket.public_base_urls(),
            ["https://cdn.x".to_string(), "https://mirror.y".to_string()]
        );
    }

    #[test]
    fn test_object_public_urls() {
        let mut bucket = test_bucket();
        assert!(bucket.object_public_urls("a.txt").is_empty());

        bucket
            .register_public_base_urls(["https://cdn.x", "https://mirror.y"])
            .unwrap();
        assert_eq!(
            bucket.object_public_urls("docs/a.txt"),
            [
                "https://cdn.x/docs/a.txt".to_string(),
                "https://mirror.y/docs/a.txt".to_string()
            ]
        );
    }

    #[test]
    fn test_upload_result_derivation() {
        let mut bucket = test_bucket();
        bucket.register_public_base_url("https://cdn.x").unwrap();

        let result = bucket.upload_result("a.txt".to_string(), Some("e1".to_string()), None);
        assert_eq!(result.key, "a.txt");
        assert_eq!(
            result.uri,
            "https://acct.r2.cloudflarestorage.com/media/a.txt"
        );
        assert_eq!(result.public_urls, ["https://cdn.x/a.txt".to_string()]);
        assert_eq!(result.public_url(), Some("https://cdn.x/a.txt"));
    }

    #[test]
    fn test_metadata_from_head() {
        let output = aws_sdk_s3::operation::head_object::HeadObjectOutput::builder()
            .content_length(1024)
            .e_tag("\"abc123\"")
            .content_type("text/plain")
            .accept_ranges("bytes")
            .last_modified(DateTime::from_secs(1_700_000_000))
            .metadata("owner", "ops")
            .build();

        let meta = metadata_from_head(&output);
        assert_eq!(meta.content_length, 1024);
        assert_eq!(meta.etag.as_deref(), Some("abc123"));
        assert_eq!(meta.content_type.as_deref(), Some("text/plain"));
        assert!(meta.accept_ranges);
        assert_eq!(meta.metadata.get("owner").map(String::as_str), Some("ops"));
        assert!(meta.last_modified.is_some());
    }

    #[test]
    fn test_metadata_from_head_defaults() {
        let output = aws_sdk_s3::operation::head_object::HeadObjectOutput::builder().build();
        let meta = metadata_from_head(&output);
        assert_eq!(meta.content_length, 0);
        assert!(!meta.accept_ranges);
        assert!(meta.metadata.is_empty());
    }

    #[test]
    fn test_summary_from_object() {
        let object = s3t::Object::builder()
            .key("docs/a.txt")
            .size(42)
            .e_tag("\"e9\"")
            .storage_class(s3t::ObjectStorageClass::Standard)
            .checksum_algorithm(s3t::ChecksumAlgorithm::Sha256)
            .last_modified(DateTime::from_secs(1_700_000_000))
            .build();

        let summary = summary_from_object(&object);
        assert_eq!(summary.key, "docs/a.txt");
        assert_eq!(summary.size_bytes, 42);
        assert_eq!(summary.etag.as_deref(), Some("e9"));
        assert_eq!(summary.storage_class.as_deref(), Some("STANDARD"));
        assert_eq!(summary.checksum_algorithms, ["SHA256".to_string()]);
    }

    #[test]
    fn test_region_from_constraint() {
        assert_eq!(region_from(None), "auto");
        assert_eq!(
            region_from(Some(&s3t::BucketLocationConstraint::from(""))),
            "auto"
        );
        assert_eq!(
            region_from(Some(&s3t::BucketLocationConstraint::from("eu-west-1"))),
            "eu-west-1"
        );
    }

    #[test]
    fn test_next_marker_fallback() {
        // Exhausted page: no marker regardless of content
        assert_eq!(next_marker_for(None, false, Some("z.txt")), None);
        assert_eq!(next_marker_for(Some("m"), false, None), None);

        // Truncated: service marker wins, last key is the v1 fallback
        assert_eq!(
            next_marker_for(Some("m"), true, Some("z.txt")),
            Some("m".to_string())
        );
        assert_eq!(
            next_marker_for(None, true, Some("z.txt")),
            Some("z.txt".to_string())
        );
    }

    #[test]
    fn test_cors_rule_mapping() {
        let rule = s3t::CorsRule::builder()
            .id("allow-get")
            .allowed_methods("GET")
            .allowed_methods("HEAD")
            .allowed_origins("https://app.example.com")
            .allowed_headers("*")
            .expose_headers("ETag")
            .max_age_seconds(3600)
            .build()
            .unwrap();

        let mapped = cors_rule_from(&rule);
        assert_eq!(mapped.id.as_deref(), Some("allow-get"));
        assert_eq!(mapped.allowed_methods, ["GET", "HEAD"]);
        assert_eq!(mapped.allowed_origins, ["https://app.example.com"]);
        assert_eq!(mapped.exposed_headers, ["ETag"]);
        assert_eq!(mapped.max_age_seconds, Some(3600));
    }

    #[test]
    fn test_encryption_rule_mapping() {
        let rule = s3t::ServerSideEncryptionRule::builder()
            .apply_server_side_encryption_by_default(
                s3t::ServerSideEncryptionByDefault::builder()
                    .sse_algorithm(s3t::ServerSideEncryption::AwsKms)
                    .kms_master_key_id("key-1")
                    .build()
                    .unwrap(),
            )
            .bucket_key_enabled(true)
            .build();

        let mapped = encryption_rule_from(&rule);
        assert_eq!(mapped.algorithm.as_deref(), Some("aws:kms"));
        assert_eq!(mapped.kms_key_id.as_deref(), Some("key-1"));
        assert!(mapped.bucket_key_enabled);
    }

    #[test]
    fn test_encryption_rule_defaults() {
        let rule = s3t::ServerSideEncryptionRule::builder().build();
        let mapped = encryption_rule_from(&rule);
        assert_eq!(mapped.algorithm, None);
        assert_eq!(mapped.kms_key_id, None);
        assert!(!mapped.bucket_key_enabled);
    }

    #[test]
    fn test_tag_conversion_round_trip() {
        let tags = vec![Tag::new("env", "prod"), Tag::new("team", "media")];
        let tagging = to_sdk_tagging(&tags).unwrap();
        assert_eq!(tags_from_sdk(tagging.tag_set()), tags);
    }

    #[test]
    fn test_tagging_allows_empty_set() {
        let tagging = to_sdk_tagging(&[]).unwrap();
        assert!(tagging.tag_set().is_empty());
    }
}
