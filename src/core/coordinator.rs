//! Removal coordination state machine
//!
//! One `run` call processes at most one page's worth of rows: resume or
//! create the job, bound the batch, execute it, then either checkpoint
//! and reload or finish and clear. The persisted cursor is the only state
//! carried across the reload boundary, so a killed process re-enters the
//! machine exactly where it left off.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info};

use super::action::DeleteAction;
use super::executor::BatchExecutor;
use super::job::RemovalJob;
use super::traits::{BatchObserver, CountDisplay, HostHandles, ProgressSink};
use crate::storage::ResumeStore;
use crate::utils::error::Result;

/// Where one coordinator pass left the job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing to resume and no count supplied; no side effects
    Idle,
    /// Page batch flushed, cursor persisted, host reloaded
    InProgress {
        /// Removed so far
        completed: u64,
        /// Requested total
        total: u64,
    },
    /// Target reached; resume state cleared
    Completed {
        /// Requested total
        total: u64,
    },
    /// Rows ran out before the target was met; resume state cleared
    Stalled {
        /// Removed before the host ran dry
        completed: u64,
        /// Requested total
        total: u64,
    },
}

/// The state machine tying rows, executor, store, and displays together
pub struct RemovalCoordinator {
    host: HostHandles,
    executor: BatchExecutor,
    store: ResumeStore,
}

impl RemovalCoordinator {
    /// Create a coordinator over host collaborators built at startup
    pub fn new(host: HostHandles, executor: BatchExecutor, store: ResumeStore) -> Self {
        Self {
            host,
            executor,
            store,
        }
    }

    /// Process one page pass.
    ///
    /// With `Some(total)` a fresh job is started, replacing any stale
    /// persisted one. With `None` the persisted job is resumed; if there
    /// is none the pass is a no-op.
    pub async fn run(&self, requested: Option<u64>) -> Result<RunOutcome> {
        let job = match requested {
            Some(total) => {
                info!(total, "starting removal job");
                RemovalJob::new(total)
            }
            None => match self.store.get().await? {
                Some(job) => {
                    info!(
                        completed = job.completed,
                        total = job.total_requested,
                        started_at = %job.started_at,
                        "resuming removal job"
                    );
                    job
                }
                None => {
                    debug!("no job to resume");
                    return Ok(RunOutcome::Idle);
                }
            },
        };

        self.process_page(job).await
    }

    async fn process_page(&self, mut job: RemovalJob) -> Result<RunOutcome> {
        let total = job.total_requested;

        if job.is_complete() {
            self.store.clear().await?;
            self.host.progress.clear();
            return Ok(RunOutcome::Completed { total });
        }

        let rows = self.host.rows.visible_rows().await?;
        let take = rows.len().min(job.remaining() as usize);
        if take == 0 {
            error!(
                completed = job.completed,
                total, "no removable rows left before reaching the target"
            );
            self.host.progress.show(job.completed, total);
            self.store.clear().await?;
            return Ok(RunOutcome::Stalled {
                completed: job.completed,
                total,
            });
        }

        // Observer sees pre-batch state immediately, then one tick per
        // completed request.
        self.host.progress.show(job.completed, total);

        let batch: Vec<DeleteAction> = rows.into_iter().take(take).collect();
        let observer = LiveProgress::new(
            job.completed,
            total,
            self.host.progress.as_ref(),
            self.host.counter.as_ref(),
        );
        let report = self.executor.execute(batch, &observer).await;
        debug!(
            successes = report.success_count,
            failures = report.failure_count,
            "page batch settled"
        );

        job.record_successes(report.success_count);

        if job.is_complete() {
            self.store.clear().await?;
            self.host.progress.clear();
            info!(total, "removal job complete");
            return Ok(RunOutcome::Completed { total });
        }

        self.store.put(&job).await?;
        self.host.reload.reload().await?;
        Ok(RunOutcome::InProgress {
            completed: job.completed,
            total,
        })
    }
}

/// Coordinator-owned batch observer: decrements the scrobble count and
/// advances the progress text once per successful delete.
struct LiveProgress<'a> {
    base: u64,
    total: u64,
    removed: AtomicU64,
    progress: &'a dyn ProgressSink,
    counter: &'a dyn CountDisplay,
}

impl<'a> LiveProgress<'a> {
    fn new(
        base: u64,
        total: u64,
        progress: &'a dyn ProgressSink,
        counter: &'a dyn CountDisplay,
    ) -> Self {
        Self {
            base,
            total,
            removed: AtomicU64::new(0),
            progress,
            counter,
        }
    }
}

impl BatchObserver for LiveProgress<'_> {
    fn on_removed(&self) {
        let live = self.base + self.removed.fetch_add(1, Ordering::Relaxed) + 1;
        self.counter.decrement();
        self.progress.show(live, self.total);
    }

    fn on_failed(&self) {}
}
