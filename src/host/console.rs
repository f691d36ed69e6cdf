//! Console implementations of the host display and input seams

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::core::{CountDisplay, ProgressSink, TargetInput};
use crate::utils::error::{Result, SweepError};

/// Interactive target-count prompt on stdin.
///
/// Disabled prompts (non-interactive runs) always answer `None`.
pub struct ConsolePrompt {
    enabled: bool,
}

impl ConsolePrompt {
    /// Create a prompt; `enabled = false` for non-interactive runs
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl TargetInput for ConsolePrompt {
    async fn read_requested(&self) -> Result<Option<u64>> {
        if !self.enabled {
            return Ok(None);
        }

        eprint!("Scrobbles to remove: ");
        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let count = trimmed
            .parse::<u64>()
            .map_err(|_| SweepError::Validation(format!("not a valid count: {:?}", trimmed)))?;
        Ok(Some(count))
    }
}

/// Progress text on stderr, one line per update
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn show(&self, completed: u64, total: u64) {
        eprintln!("Removing {}/{}", completed, total);
    }

    fn clear(&self) {
        debug!("progress display cleared");
    }
}

/// Scrobble-count tracker seeded from the page metadata.
///
/// The count only exists for user feedback; a page that carries no count
/// metadata leaves it at its unseeded default.
#[derive(Debug, Default)]
pub struct ConsoleCount {
    remaining: AtomicI64,
}

impl ConsoleCount {
    /// Create an unseeded counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, for a final summary
    pub fn current(&self) -> i64 {
        self.remaining.load(Ordering::SeqCst)
    }
}

impl CountDisplay for ConsoleCount {
    fn set(&self, count: u64) {
        self.remaining.store(count as i64, Ordering::SeqCst);
        debug!(count, "scrobble count");
    }

    fn decrement(&self) {
        self.remaining.fetch_sub(1, Ordering::SeqCst);
    }
}
