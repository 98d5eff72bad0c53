//! Storage client
//!
//! Wraps aws-sdk-s3 and hands out [`Bucket`] handles. One client per
//! configuration; the underlying SDK client (connection pool + signing
//! context) is shared by every handle it creates.

use serde::{Deserialize, Serialize};
use url::Url;

use r2kit_core::{Error, Result};

use crate::bucket::Bucket;

/// Connection settings for an S3-compatible endpoint
///
/// Credential loading is the caller's concern; this struct carries the
/// already-resolved values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Endpoint URL, e.g. `https://<account>.r2.cloudflarestorage.com`
    pub endpoint: String,
    /// Signing region; R2 accepts the literal `auto`
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Path-style addressing (`endpoint/bucket/key`), required by most
    /// self-hosted S3-compatible servers
    pub force_path_style: bool,
}

impl ClientConfig {
    /// Config with the R2 defaults: region `auto`, path-style addressing
    pub fn new(
        endpoint: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            region: "auto".to_string(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            force_path_style: true,
        }
    }
}

/// Client for one S3-compatible endpoint; factory for bucket handles
pub struct StorageClient {
    inner: aws_sdk_s3::Client,
    endpoint_origin: String,
}

impl StorageClient {
    /// Create a new client from a configuration.
    ///
    /// Fails fast with [`Error::Config`] when the endpoint is not a valid
    /// absolute URL. No network traffic happens here.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let endpoint_origin = endpoint_origin(&config.endpoint)?;

        // Build credentials provider
        let credentials = aws_credential_types::Credentials::new(
            config.access_key_id,
            config.secret_access_key,
            None, // session token
            None, // expiry
            "r2kit-static-credentials",
        );

        // Build SDK config
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region))
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            endpoint_origin,
        })
    }

    /// Wrap a preconfigured SDK client.
    ///
    /// Injection seam for custom middlewares and tests; the endpoint is still
    /// needed to derive bucket URIs.
    pub fn from_client(inner: aws_sdk_s3::Client, endpoint: &str) -> Result<Self> {
        Ok(Self {
            inner,
            endpoint_origin: endpoint_origin(endpoint)?,
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// The endpoint origin bucket URIs are derived from
    pub fn endpoint_origin(&self) -> &str {
        &self.endpoint_origin
    }

    /// Create a handle for `name`.
    ///
    /// Pure construction — no existence check, no network call. The SDK
    /// client handle is shared across all buckets of this client.
    pub fn bucket(&self, name: &str) -> Bucket {
        Bucket::new(self.inner.clone(), &self.endpoint_origin, name)
    }
}

/// Validate an endpoint and reduce it to its origin
fn endpoint_origin(endpoint: &str) -> Result<String> {
    let parsed = Url::parse(endpoint)
        .map_err(|e| Error::Config(format!("invalid endpoint URL {endpoint}: {e}")))?;
    match parsed.origin() {
        url::Origin::Tuple(..) => Ok(parsed.origin().ascii_serialization()),
        url::Origin::Opaque(_) => Err(Error::Config(format!(
            "endpoint URL {endpoint} has no usable origin"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_origin_strips_path() {
        assert_eq!(
            endpoint_origin("https://acct.r2.cloudflarestorage.com/extra").unwrap(),
            "https://acct.r2.cloudflarestorage.com"
        );
        assert_eq!(
            endpoint_origin("http://localhost:9000").unwrap(),
            "http://localhost:9000"
        );
    }

    #[test]
    fn test_endpoint_origin_rejects_malformed() {
        assert!(matches!(endpoint_origin("not a url"), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_new_fails_fast_on_bad_endpoint() {
        let config = ClientConfig::new("::malformed::", "key", "secret");
        let result = StorageClient::new(config).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_bucket_handles_share_one_client() {
        let config = ClientConfig::new("http://localhost:9000", "key", "secret");
        let client = StorageClient::new(config).await.unwrap();

        let a = client.bucket("alpha");
        let b = client.bucket("beta");
        assert_eq!(a.uri(), "http://localhost:9000/alpha");
        assert_eq!(b.uri(), "http://localhost:9000/beta");
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("http://localhost:9000", "ak", "sk");
        assert_eq!(config.region, "auto");
        assert!(config.force_path_style);
    }
}
