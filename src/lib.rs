//! # scrobble-sweep
//!
//! Resumable batch removal of recent Last.fm scrobbles, one library page
//! at a time.
//!
//! The host service renders a paginated library page where every
//! scrobble row carries its own delete form. This crate drives those
//! forms: it removes a requested number of the most recent scrobbles,
//! reloading the page between batches to expose the next rows, and
//! checkpoints its cursor to disk after every page so an interrupted run
//! resumes exactly where it stopped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scrobble_sweep::{Config, Sweeper};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     let sweeper = Sweeper::new(config)?;
//!
//!     // Remove the 25 most recent scrobbles on the configured page.
//!     sweeper.run(Some(25)).await?;
//!
//!     // Or pass `None`: an interrupted job resumes from its saved
//!     // cursor, otherwise the user is prompted for a count.
//!     sweeper.run(None).await?;
//!     Ok(())
//! }
//! ```

// Public module exports
pub mod config;
pub mod core;
pub mod host;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use crate::core::{
    BatchExecutor, BatchReport, DeleteAction, HostHandles, RemovalCoordinator, RemovalJob,
    RunOutcome,
};
pub use storage::ResumeStore;
pub use utils::error::{Result, SweepError};

use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::core::TargetInput;
use host::{ConsoleCount, ConsolePrompt, ConsoleProgress, LibraryPage};

/// The assembled sweeper: coordinator plus the console input seam.
///
/// Construction wires the live library page, the resume store, and the
/// console displays into a coordinator; `run` drives coordinator passes
/// until the job settles.
pub struct Sweeper {
    coordinator: RemovalCoordinator,
    input: Arc<dyn TargetInput>,
}

impl Sweeper {
    /// Create a new sweeper instance from validated configuration
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating sweeper for {}", config.host().page_url);

        let client = host::build_client(config.http(), &config.host().session)?;
        let page_url = Url::parse(&config.host().page_url)?;

        let counter = Arc::new(ConsoleCount::new());
        let page = Arc::new(LibraryPage::new(
            client.clone(),
            page_url.clone(),
            counter.clone(),
        ));

        let dry_run = config.sweep.dry_run;
        if dry_run {
            info!("dry run: nothing will be deleted and no resume state is kept");
        }
        // Dry runs never persist a cursor; a later real run must not
        // resume into one.
        let store = if dry_run {
            ResumeStore::memory()
        } else {
            ResumeStore::new(config.storage())?
        };
        let executor = BatchExecutor::new(client, Some(page_url.to_string()), dry_run);

        let handles = HostHandles {
            rows: page.clone(),
            reload: page,
            progress: Arc::new(ConsoleProgress),
            counter,
        };

        Ok(Self {
            coordinator: RemovalCoordinator::new(handles, executor, store),
            input: Arc::new(ConsolePrompt::new(true)),
        })
    }

    /// Run to completion: resume a saved job or start a fresh one.
    ///
    /// With no explicit count and nothing to resume, the target input is
    /// consulted once; declining leaves the sweeper idle.
    pub async fn run(&self, requested: Option<u64>) -> Result<RunOutcome> {
        let mut outcome = self.coordinator.run(requested).await?;

        if outcome == RunOutcome::Idle {
            if let Some(count) = self.input.read_requested().await? {
                outcome = self.coordinator.run(Some(count)).await?;
            }
        }

        while let RunOutcome::InProgress { completed, total } = outcome {
            debug!(completed, total, "page flushed, continuing");
            outcome = self.coordinator.run(None).await?;
        }

        Ok(outcome)
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
