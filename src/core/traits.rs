//! Collaborator seams between the removal core and the host environment
//!
//! The original workflow runs against a rendered library page: rows with
//! delete forms, a numeric input, a scrobble counter, and a reload button.
//! The core only sees these capabilities as traits; the `host` module
//! provides the real implementations.

use async_trait::async_trait;
use std::sync::Arc;

use super::action::DeleteAction;
use crate::utils::error::Result;

/// Source of the currently visible removable rows.
///
/// Must reflect only rows rendered on the current page view, in the order
/// the host renders them (oldest page first).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Delete actions for the rows visible right now
    async fn visible_rows(&self) -> Result<Vec<DeleteAction>>;
}

/// Target-count input, consulted once when there is no job to resume.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TargetInput: Send + Sync {
    /// The requested count, or `None` if the user declined to supply one
    async fn read_requested(&self) -> Result<Option<u64>>;
}

/// Advances the host to its next page view.
///
/// The browser original forced a full page reload here; the CLI rendition
/// refetches the page so the row source reflects the next batch of rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReloadHandle: Send + Sync {
    /// Trigger a reload of the host page
    async fn reload(&self) -> Result<()>;
}

/// Write-only `(completed, total)` progress sink.
///
/// Pure presentation: failures here must never affect job correctness.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink: Send + Sync {
    /// Show current progress
    fn show(&self, completed: u64, total: u64);
    /// Clear the progress display
    fn clear(&self);
}

/// Write-only scrobble-count display, decremented live per deletion.
#[cfg_attr(test, mockall::automock)]
pub trait CountDisplay: Send + Sync {
    /// Seed the display from the host page's count metadata
    fn set(&self, count: u64);
    /// One scrobble was just removed
    fn decrement(&self);
}

/// Per-action completion callbacks for a page batch.
///
/// Passed explicitly to the executor by its caller; fired once per settled
/// request as it settles, not at batch end, so an observer sees live
/// progress.
pub trait BatchObserver: Send + Sync {
    /// An action's delete request succeeded
    fn on_removed(&self);
    /// An action's delete request failed
    fn on_failed(&self);
}

/// The host-side collaborators the coordinator is constructed with.
///
/// Explicit instances passed by reference, built once at startup.
#[derive(Clone)]
pub struct HostHandles {
    /// Visible removable rows
    pub rows: Arc<dyn RowSource>,
    /// Page reload trigger
    pub reload: Arc<dyn ReloadHandle>,
    /// Progress text sink
    pub progress: Arc<dyn ProgressSink>,
    /// Scrobble-count display
    pub counter: Arc<dyn CountDisplay>,
}
