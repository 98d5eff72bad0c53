//! Error types shared across the r2kit crates
//!
//! The adapter crate classifies transport failures into this taxonomy; the
//! per-operation error policy (propagate, swallow to `false`, swallow to
//! empty) is decided at the call site, not here.

use thiserror::Error;

/// Result type used throughout r2kit
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by r2kit operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid client configuration (bad endpoint, missing credentials)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A URL could not be parsed or has no usable origin
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (connection, timeout, 5xx)
    #[error("Network error: {0}")]
    Network(String),

    /// The requested bucket or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The bucket or object has no tag set configured
    ///
    /// Distinguished from other service errors so tag reads can map it to an
    /// empty tag list instead of failing.
    #[error("No tag set: {0}")]
    NoSuchTagSet(String),

    /// A local path that cannot name an object (no final component)
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Local I/O failure (reading a file for upload)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other service or client error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// True for missing-bucket / missing-object errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True for the "no tag set configured" service condition
    pub fn is_no_such_tag_set(&self) -> bool {
        matches!(self, Error::NoSuchTagSet(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_helpers() {
        assert!(Error::NotFound("bucket".into()).is_not_found());
        assert!(!Error::Network("timeout".into()).is_not_found());

        assert!(Error::NoSuchTagSet("no tags".into()).is_no_such_tag_set());
        assert!(!Error::NotFound("bucket".into()).is_no_such_tag_set());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_display() {
        let err = Error::Config("invalid endpoint".into());
        assert_eq!(err.to_string(), "Configuration error: invalid endpoint");
    }
}
