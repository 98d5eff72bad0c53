//! Public base URL registry
//!
//! A bucket exposed through a CDN or custom domain has one or more public
//! base URLs. The handle keeps them as an ordered set keyed on normalized
//! origin, so registering `https://cdn.example.com/assets` and
//! `https://cdn.example.com/media` yields a single entry
//! `https://cdn.example.com`.

use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};

/// Reduce a URL to its origin: scheme + host + port.
///
/// Path, query, and fragment are dropped; default ports are elided.
pub fn normalize_origin(input: &str) -> Result<String> {
    let parsed = Url::parse(input).map_err(|e| Error::InvalidUrl(format!("{input}: {e}")))?;
    match parsed.origin() {
        url::Origin::Tuple(..) => Ok(parsed.origin().ascii_serialization()),
        url::Origin::Opaque(_) => Err(Error::InvalidUrl(format!(
            "{input}: URL has no usable origin"
        ))),
    }
}

/// Ordered, origin-deduplicated set of public base URLs.
///
/// Append-only: entries are added through [`register`](Self::register) and
/// never removed. Insertion order is preserved.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublicUrlSet {
    origins: Vec<String>,
}

impl PublicUrlSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `url` to its origin and append it if not already present.
    ///
    /// Returns `true` when the origin was newly added.
    pub fn register(&mut self, url: &str) -> Result<bool> {
        let origin = normalize_origin(url)?;
        if self.origins.contains(&origin) {
            tracing::debug!(%origin, "public base URL already registered");
            return Ok(false);
        }
        self.origins.push(origin);
        Ok(true)
    }

    /// Register every URL in `urls`, element-wise.
    ///
    /// Stops at the first unparseable URL; origins registered before the
    /// failure remain in the set.
    pub fn register_all<I, S>(&mut self, urls: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for url in urls {
            self.register(url.as_ref())?;
        }
        Ok(())
    }

    /// The registered origins, in insertion order
    pub fn as_slice(&self) -> &[String] {
        &self.origins
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Externally reachable URLs for `key`: one `origin/key` entry per
    /// registered origin, empty when nothing is registered.
    ///
    /// The key is joined as-is; callers normalize it beforehand.
    pub fn object_urls(&self, key: &str) -> Vec<String> {
        self.origins
            .iter()
            .map(|origin| format!("{origin}/{key}"))
            .collect()
    }
}
