//! Object key normalization
//!
//! S3-compatible services treat a leading slash as part of the key, so
//! `"/a.txt"` and `"a.txt"` name two different objects. Every destination key
//! accepted by an upload or copy operation is normalized through here first.

/// Strip every leading `/` from an object key.
///
/// Idempotent: normalizing an already-normalized key is a no-op.
pub fn normalize_key(key: &str) -> &str {
    key.trim_start_matches('/')
}

/// Derive a default object key from a file path (its final component).
pub fn key_from_file_name(path: &std::path::Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
