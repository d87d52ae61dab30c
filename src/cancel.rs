use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation token for callers waiting on context generation.
///
/// Cancelling only releases waiters; a build that has already started runs to
/// completion regardless. Share across threads with `Arc`.
#[derive(Debug)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    pub const fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
