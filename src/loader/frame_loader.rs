use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::foundation::error::{ReelError, ReelResult};
use crate::loader::schedule::LoadSchedule;
use crate::loader::source::FrameSource;
use crate::loader::store::FrameStore;

/// Loader tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoaderOpts {
    /// Background frames per batch; each batch settles before the next starts.
    /// `None` puts every background frame in flight at once.
    pub background_batch: Option<usize>,
    /// Worker threads for fetch/decode. `None` uses one per core.
    pub threads: Option<usize>,
}

impl LoaderOpts {
    /// Reject zero-sized batches or pools.
    pub fn validate(&self) -> ReelResult<()> {
        if self.background_batch == Some(0) {
            return Err(ReelError::validation(
                "loader background_batch must be >= 1 when set",
            ));
        }
        if self.threads == Some(0) {
            return Err(ReelError::validation(
                "loader threads must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Progress notifications emitted while a sequence loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadEvent {
    /// A priority frame resolved (loaded or failed).
    PriorityProgress {
        /// Priority frames resolved so far.
        resolved: usize,
        /// Size of the priority set.
        total: usize,
    },
    /// Every priority frame has resolved.
    Ready,
    /// Any frame resolved.
    FrameResolved {
        /// Frame index.
        index: usize,
        /// `false` when the fetch failed.
        loaded: bool,
    },
    /// The background tail finished.
    BackgroundDone,
}

type EventCallback = Arc<dyn Fn(LoadEvent) + Send + Sync>;

/// Loads a frame sequence priority-first on a worker pool.
pub struct FrameLoader {
    source: Arc<dyn FrameSource>,
    opts: LoaderOpts,
    on_event: Option<EventCallback>,
}

impl FrameLoader {
    /// Create a loader fetching from `source`.
    pub fn new(source: Arc<dyn FrameSource>, opts: LoaderOpts) -> Self {
        Self {
            source,
            opts,
            on_event: None,
        }
    }

    /// Register a callback invoked from worker threads for every [`LoadEvent`].
    pub fn on_event(mut self, f: impl Fn(LoadEvent) + Send + Sync + 'static) -> Self {
        self.on_event = Some(Arc::new(f));
        self
    }

    /// Start loading `frame_count` frames using [`LoadSchedule::bisection`].
    pub fn load(&self, frame_count: usize) -> ReelResult<LoadHandle> {
        self.load_with(LoadSchedule::bisection(frame_count), frame_count)
    }

    /// Start loading with an explicit schedule over `frame_count` slots.
    pub fn load_with(&self, schedule: LoadSchedule, frame_count: usize) -> ReelResult<LoadHandle> {
        self.opts.validate()?;
        if let Some(&bad) = schedule
            .priority
            .iter()
            .chain(&schedule.background)
            .find(|&&i| i >= frame_count)
        {
            return Err(ReelError::loader(format!(
                "schedule index {bad} out of range for {frame_count} frames"
            )));
        }

        let pool = build_thread_pool(self.opts.threads)?;
        let shared = Arc::new(Shared {
            store: Arc::new(FrameStore::new(frame_count)),
            cancelled: AtomicBool::new(false),
            resolved_priority: AtomicUsize::new(0),
            total_priority: schedule.priority.len(),
            gate: Mutex::new(Gate::default()),
            gate_cv: Condvar::new(),
        });

        let job = LoadJob {
            shared: Arc::clone(&shared),
            source: Arc::clone(&self.source),
            on_event: self.on_event.clone(),
            batch: self.opts.background_batch,
        };

        let thread = std::thread::Builder::new()
            .name("scrollreel-loader".to_owned())
            .spawn(move || job.run(&pool, schedule))
            .map_err(|e| ReelError::loader(format!("failed to spawn loader thread: {e}")))?;

        Ok(LoadHandle {
            shared,
            thread: Some(thread),
        })
    }
}

#[derive(Debug, Default)]
struct Gate {
    ready: bool,
    finished: bool,
    cancelled: bool,
}

struct Shared {
    store: Arc<FrameStore>,
    cancelled: AtomicBool,
    resolved_priority: AtomicUsize,
    total_priority: usize,
    gate: Mutex<Gate>,
    gate_cv: Condvar,
}

impl Shared {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn gate(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_gate(&self, f: impl FnOnce(&mut Gate)) {
        let mut gate = self.gate();
        f(&mut gate);
        self.gate_cv.notify_all();
    }

    // Blocks until `done` holds or the load is cancelled; returns `done`.
    fn wait_gate(&self, timeout: Option<Duration>, done: impl Fn(&Gate) -> bool) -> bool {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut gate = self.gate();
        loop {
            if done(&*gate) {
                return true;
            }
            if gate.cancelled {
                return false;
            }
            gate = match deadline {
                None => self
                    .gate_cv
                    .wait(gate)
                    .unwrap_or_else(PoisonError::into_inner),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    self.gate_cv
                        .wait_timeout(gate, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
            };
        }
    }
}

struct LoadJob {
    shared: Arc<Shared>,
    source: Arc<dyn FrameSource>,
    on_event: Option<EventCallback>,
    batch: Option<usize>,
}

impl LoadJob {
    #[tracing::instrument(
        skip_all,
        fields(priority = schedule.priority.len(), background = schedule.background.len())
    )]
    fn run(self, pool: &rayon::ThreadPool, schedule: LoadSchedule) {
        self.priority_phase(pool, &schedule.priority);
        if self.shared.is_cancelled() {
            tracing::debug!("load cancelled during priority phase");
            return;
        }

        tracing::debug!("priority frames settled, sequence ready");
        self.emit(LoadEvent::Ready);
        self.shared.update_gate(|g| g.ready = true);

        self.background_phase(pool, &schedule.background);
        if self.shared.is_cancelled() {
            tracing::debug!("load cancelled during background phase");
            return;
        }

        self.emit(LoadEvent::BackgroundDone);
        self.shared.update_gate(|g| g.finished = true);
    }

    fn priority_phase(&self, pool: &rayon::ThreadPool, priority: &[usize]) {
        let total = priority.len();
        tracing::debug!(total, "loading priority frames");
        pool.install(|| {
            priority.par_iter().for_each(|&index| {
                let Some(loaded) = self.load_one(index) else {
                    return;
                };
                let resolved = self.shared.resolved_priority.fetch_add(1, Ordering::AcqRel) + 1;
                self.emit(LoadEvent::FrameResolved { index, loaded });
                self.emit(LoadEvent::PriorityProgress { resolved, total });
            });
        });
    }

    fn background_phase(&self, pool: &rayon::ThreadPool, background: &[usize]) {
        if background.is_empty() {
            return;
        }
        let batch = self.batch.unwrap_or(background.len());
        for (n, chunk) in background.chunks(batch).enumerate() {
            if self.shared.is_cancelled() {
                return;
            }
            tracing::debug!(batch = n, frames = chunk.len(), "loading background batch");
            pool.install(|| {
                chunk.par_iter().for_each(|&index| {
                    if let Some(loaded) = self.load_one(index) {
                        self.emit(LoadEvent::FrameResolved { index, loaded });
                    }
                });
            });
        }
    }

    // `None` when cancellation skipped or discarded the fetch.
    fn load_one(&self, index: usize) -> Option<bool> {
        if self.shared.is_cancelled() {
            return None;
        }
        self.shared.store.mark_requested(index);
        // A panicking source resolves the frame as failed; the gate must still open.
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| self.source.fetch(index)))
            .unwrap_or_else(|payload| {
                Err(ReelError::loader(format!(
                    "frame source panicked: {}",
                    panic_message(payload.as_ref())
                )))
            });
        if self.shared.is_cancelled() {
            return None;
        }

        match result {
            Ok(frame) => {
                self.shared.store.insert_loaded(index, frame);
                Some(true)
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "failed to load frame");
                self.shared.store.mark_failed(index);
                Some(false)
            }
        }
    }

    fn emit(&self, event: LoadEvent) {
        if self.shared.is_cancelled() {
            return;
        }
        if let Some(cb) = &self.on_event {
            cb(event);
        }
    }
}

/// Handle to an in-progress load. Dropping it cancels the load.
pub struct LoadHandle {
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
}

impl LoadHandle {
    /// Shared frame collection being populated.
    pub fn store(&self) -> Arc<FrameStore> {
        Arc::clone(&self.shared.store)
    }

    /// `true` once every priority frame resolved.
    pub fn is_ready(&self) -> bool {
        self.shared.gate().ready
    }

    /// `true` once the background tail finished too.
    pub fn is_finished(&self) -> bool {
        self.shared.gate().finished
    }

    /// `true` after [`LoadHandle::cancel`].
    pub fn is_cancelled(&self) -> bool {
        self.shared.is_cancelled()
    }

    /// Block until ready. Returns `false` if the load was cancelled first.
    ///
    /// There is no per-frame timeout: a priority fetch that never returns blocks this forever.
    pub fn wait_ready(&self) -> bool {
        self.shared.wait_gate(None, |g| g.ready)
    }

    /// Like [`LoadHandle::wait_ready`] but gives up after `timeout`.
    pub fn wait_ready_timeout(&self, timeout: Duration) -> bool {
        self.shared.wait_gate(Some(timeout), |g| g.ready)
    }

    /// Block until every scheduled frame resolved. Returns `false` if cancelled first.
    pub fn wait_finished(&self) -> bool {
        self.shared.wait_gate(None, |g| g.finished)
    }

    /// Like [`LoadHandle::wait_finished`] but gives up after `timeout`.
    pub fn wait_finished_timeout(&self, timeout: Duration) -> bool {
        self.shared.wait_gate(Some(timeout), |g| g.finished)
    }

    /// Resolved share of the priority set in `[0, 1]`; `1` for an empty set.
    pub fn priority_fraction(&self) -> f64 {
        let total = self.shared.total_priority;
        if total == 0 {
            return 1.0;
        }
        let resolved = self.shared.resolved_priority.load(Ordering::Acquire);
        (resolved as f64 / total as f64).min(1.0)
    }

    /// [`LoadHandle::priority_fraction`] as a whole percentage for loading screens.
    pub fn load_percent(&self) -> u8 {
        (self.priority_fraction() * 100.0).round() as u8
    }

    /// Abandon the load. Pending fetches are discarded silently and no further events fire.
    ///
    /// Does not wait for fetches already in flight.
    pub fn cancel(&self) {
        if self.shared.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        tracing::debug!("cancelling frame load");
        self.shared.update_gate(|g| g.cancelled = true);
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.cancel();
        // Detach: a stalled fetch must not hang the owner's teardown.
        drop(self.thread.take());
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string payload"
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("scrollreel-fetch-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::loader(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/loader/frame_loader.rs"]
mod tests;
