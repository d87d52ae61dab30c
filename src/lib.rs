//! Epoch-scoped proof-of-work context caching for Ethash-family engines.
//!
//! A pool or node keeps one [`EpochContext`] per live epoch: the per-epoch
//! dataset is expensive to derive (seconds) but cheap to reuse, so the cache
//! builds it exactly once — even under concurrent callers — and then serves
//! any number of hash computations from it until the epoch rolls over and the
//! owner's eviction policy disposes the instance.
//!
//! Provides:
//! - [`EpochContext`]: lazy, thread-safe, cancellation-aware lifecycle around
//!   an engine-owned epoch dataset, with the [`EpochContext::last_used`]
//!   freshness signal an external eviction policy reads.
//! - [`HashEngine`]: the narrow boundary to the native-style proof-of-work
//!   library that owns dataset construction and hash mixing.
//! - [`detect_network_and_chain`]: typed classification of node-reported
//!   network-id and chain-name strings, with numeric-id overrides for
//!   deployments whose reported chain name is misleading.

pub mod cancel;
pub mod context;
pub mod engine;
pub mod error;
pub mod network;
pub mod telemetry;

pub use cancel::CancelToken;
pub use context::EpochContext;
pub use engine::{epoch_from_height, HashEngine, HashParts, VerifyStatus, EPOCH_LENGTH};
pub use error::CacheError;
pub use network::{detect_network_and_chain, ChainType, NetworkClassification, NetworkType};
pub use telemetry::TelemetrySink;
