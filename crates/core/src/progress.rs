//! Transfer progress reporting
//!
//! A streamed upload notifies a caller-supplied sink zero or more times
//! before its single terminal outcome. Byte counts are cumulative and
//! non-decreasing; there is no other ordering guarantee.

use std::sync::Arc;

use serde::Serialize;

/// A progress notification from an in-flight transfer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TransferProgress {
    /// Cumulative bytes handed to the transport so far
    pub bytes_transferred: u64,
    /// Total payload size, when known up front
    pub total_bytes: Option<u64>,
    /// Part that completed, 1-based; 0 for single-request transfers
    pub part_number: i32,
}

/// Caller-supplied progress sink
pub type ProgressFn = Arc<dyn Fn(&TransferProgress) + Send + Sync + 'static>;

/// Wrap a plain closure as a [`ProgressFn`]
pub fn progress_fn<F>(f: F) -> ProgressFn
where
    F: Fn(&TransferProgress) + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_progress_fn_invocation() {
        let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            progress_fn(move |p| seen.lock().unwrap().push(p.bytes_transferred))
        };

        for transferred in [1024u64, 2048, 4096] {
            sink(&TransferProgress {
                bytes_transferred: transferred,
                total_bytes: Some(4096),
                part_number: 1,
            });
        }

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, [1024, 2048, 4096]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }
}
