/// Errors produced by the epoch context cache.
///
/// Every variant carries the epoch number of the instance that produced it,
/// since a pool typically holds one instance per live epoch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The engine could not allocate the epoch's dataset. Fatal for this
    /// instance; retry by constructing a fresh one.
    #[error("failed to allocate epoch context for epoch {0}")]
    AllocationFailure(u64),

    /// `compute` was called before generation completed.
    #[error("epoch context for epoch {0} is not generated")]
    NotGenerated(u64),

    /// The caller's wait for an in-progress generation was cancelled. The
    /// build itself keeps running.
    #[error("cancelled while waiting for epoch {0} context generation")]
    Cancelled(u64),

    /// The instance was disposed and must not be used again.
    #[error("epoch context for epoch {0} is disposed")]
    Disposed(u64),
}
