//! Cooperative cancellation for long-running votes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag polled by voting loops between scene edge points.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// and cancelled from there.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
