use std::sync::{Arc, Condvar, Mutex, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::engine::{HashEngine, HashParts, EPOCH_LENGTH};
use crate::error::CacheError;
use crate::telemetry::TelemetrySink;

/// Wait slice for callers parked on an in-progress build. Short enough that a
/// cancelled waiter bails out promptly.
const WAIT_SLICE: Duration = Duration::from_millis(25);

/// Build lifecycle of the owned dataset. Mutated only under `Inner::phase`.
///
/// `Failed` and `Disposed` are terminal: a failed allocation is not retried
/// on this instance, and a disposed instance refuses further use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NotStarted,
    InProgress,
    Complete,
    Failed,
    Disposed,
}

/// State shared with the background build thread.
struct Inner<C> {
    phase: Mutex<Phase>,
    build_done: Condvar,
    dataset: RwLock<Option<C>>,
    last_used: Mutex<Instant>,
}

impl<C> Inner<C> {
    fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::NotStarted),
            build_done: Condvar::new(),
            dataset: RwLock::new(None),
            last_used: Mutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        *self.last_used.lock().expect("last-used lock poisoned") = Instant::now();
    }
}

/// Per-epoch proof-of-work context with an at-most-once build guard.
///
/// One instance owns one epoch's derived dataset. Generation is explicit and
/// idempotent: the first caller triggers the build on a background thread,
/// concurrent callers wait for the same build, and every caller that returns
/// `Ok` observes a fully initialized dataset. Once generated, hash
/// computations run concurrently without serializing.
///
/// The embedding pool owns the instance-per-epoch map and its eviction
/// policy; [`EpochContext::last_used`] is the freshness signal that policy
/// reads. Dispose an instance only after its in-flight calls have quiesced.
pub struct EpochContext<E: HashEngine> {
    epoch: u64,
    engine: Arc<E>,
    telemetry: Option<Arc<dyn TelemetrySink>>,
    inner: Arc<Inner<E::Context>>,
}

impl<E: HashEngine + 'static> EpochContext<E> {
    pub fn new(epoch: u64, engine: Arc<E>) -> Self {
        Self {
            epoch,
            engine,
            telemetry: None,
            inner: Arc::new(Inner::new()),
        }
    }

    /// Like [`EpochContext::new`], with a sink receiving per-compute timings.
    pub fn with_telemetry(epoch: u64, engine: Arc<E>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            epoch,
            engine,
            telemetry: Some(telemetry),
            inner: Arc::new(Inner::new()),
        }
    }

    /// Epoch this instance's dataset is derived from.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Timestamp of the last successful use (generation completion or hash
    /// computation). Read by the owner's eviction policy, never interpreted
    /// here.
    pub fn last_used(&self) -> Instant {
        *self.inner.last_used.lock().expect("last-used lock poisoned")
    }

    pub fn is_generated(&self) -> bool {
        *self.inner.phase.lock().expect("generation lock poisoned") == Phase::Complete
    }

    /// Ensure this epoch's dataset is built, waiting for an in-progress
    /// build if another caller already triggered it.
    ///
    /// At most one build ever runs per instance. The build itself is not
    /// interruptible; `cancel` only releases this caller's wait. A `None`
    /// from the engine is a fatal [`CacheError::AllocationFailure`] for this
    /// instance, surfaced to every waiter.
    pub fn generate(&self, cancel: &CancelToken) -> Result<(), CacheError> {
        // Cheap completion check; re-checked under the guard below.
        if self
            .inner
            .dataset
            .read()
            .expect("dataset lock poisoned")
            .is_some()
        {
            return Ok(());
        }

        let mut phase = self.inner.phase.lock().expect("generation lock poisoned");
        loop {
            match *phase {
                Phase::Complete => return Ok(()),
                Phase::Failed => return Err(CacheError::AllocationFailure(self.epoch)),
                Phase::Disposed => return Err(CacheError::Disposed(self.epoch)),
                Phase::NotStarted | Phase::InProgress => {}
            }
            if cancel.is_cancelled() {
                return Err(CacheError::Cancelled(self.epoch));
            }
            if *phase == Phase::NotStarted {
                *phase = Phase::InProgress;
                self.spawn_build();
            }
            let (guard, _) = self
                .inner
                .build_done
                .wait_timeout(phase, WAIT_SLICE)
                .expect("generation lock poisoned");
            phase = guard;
        }
    }

    fn spawn_build(&self) {
        let epoch = self.epoch;
        let engine = Arc::clone(&self.engine);
        let inner = Arc::clone(&self.inner);

        thread::spawn(move || {
            debug!(epoch, epoch_length = EPOCH_LENGTH, "generating epoch context");
            let started = Instant::now();
            let built = engine.create_epoch_context(epoch as i32);

            let mut phase = inner.phase.lock().expect("generation lock poisoned");
            if *phase == Phase::Disposed {
                // A dispose raced the build and wins; the fresh dataset is
                // dropped instead of installed.
                drop(built);
            } else {
                match built {
                    Some(dataset) => {
                        *inner.dataset.write().expect("dataset lock poisoned") = Some(dataset);
                        *phase = Phase::Complete;
                        inner.touch();
                        debug!(
                            epoch,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "epoch context generated"
                        );
                    }
                    None => {
                        *phase = Phase::Failed;
                        warn!(epoch, "epoch context allocation failed");
                    }
                }
            }
            drop(phase);
            inner.build_done.notify_all();
        });
    }

    /// Compute the final and mix digests for a header hash and nonce.
    ///
    /// Requires a completed, undisposed generation; fails with
    /// [`CacheError::NotGenerated`] or [`CacheError::Disposed`] otherwise.
    /// Safe to call concurrently from many threads once generation is
    /// complete.
    pub fn compute(&self, header_hash: &[u8; 32], nonce: u64) -> Result<HashParts, CacheError> {
        let started = Instant::now();

        let dataset = self.inner.dataset.read().expect("dataset lock poisoned");
        let parts = match dataset.as_ref() {
            Some(context) => self.engine.compute_hash(context, header_hash, nonce),
            None => {
                // Release before taking the phase guard; dispose acquires the
                // two locks in the opposite direction.
                drop(dataset);
                return Err(self.unusable());
            }
        };
        drop(dataset);

        self.inner.touch();
        if let Some(sink) = &self.telemetry {
            sink.record_hash(started.elapsed());
        }
        Ok(parts)
    }

    /// Release the owned dataset. Idempotent; the underlying resource is
    /// released exactly once, and the instance refuses further use.
    pub fn dispose(&self) {
        let mut phase = self.inner.phase.lock().expect("generation lock poisoned");
        *phase = Phase::Disposed;
        let released = self
            .inner
            .dataset
            .write()
            .expect("dataset lock poisoned")
            .take();
        drop(phase);
        self.inner.build_done.notify_all();
        // Run the engine's release path outside the locks.
        drop(released);
    }

    /// Error for a use of a missing dataset.
    fn unusable(&self) -> CacheError {
        match *self.inner.phase.lock().expect("generation lock poisoned") {
            Phase::Disposed => CacheError::Disposed(self.epoch),
            _ => CacheError::NotGenerated(self.epoch),
        }
    }
}
