//! Concurrent page-batch execution

use futures::future;
use reqwest::header::REFERER;
use tracing::{debug, info, warn};

use super::action::DeleteAction;
use super::traits::BatchObserver;
use crate::utils::error::{Result, SweepError};

/// Outcome of one page batch, after every request has settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    /// Requests that got a non-error response
    pub success_count: u64,
    /// Requests that errored or were rejected
    pub failure_count: u64,
}

/// Issues a page's delete actions concurrently and waits for all of them.
///
/// All requests for a batch are in flight at once; completion order is
/// unspecified and nothing here depends on it. The returned future only
/// resolves once every request has settled, so the caller can safely
/// persist state and reload without abandoning a request mid-flight.
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    client: reqwest::Client,
    referer: Option<String>,
    dry_run: bool,
}

impl BatchExecutor {
    /// Create an executor over a configured HTTP client.
    ///
    /// `referer` is attached to every delete request when set; the host
    /// page's CSRF check requires it to match the page origin.
    pub fn new(client: reqwest::Client, referer: Option<String>, dry_run: bool) -> Self {
        Self {
            client,
            referer,
            dry_run,
        }
    }

    /// Execute a page batch, firing the observer once per settled action.
    ///
    /// Individual failures are counted, logged, and otherwise ignored:
    /// they never abort the batch or its in-flight siblings.
    pub async fn execute(
        &self,
        actions: Vec<DeleteAction>,
        observer: &dyn BatchObserver,
    ) -> BatchReport {
        let total = actions.len() as u64;
        debug!(total, "issuing page batch");

        let settled = future::join_all(
            actions
                .into_iter()
                .map(|action| self.settle(action, observer)),
        )
        .await;

        let success_count = settled.into_iter().filter(|ok| *ok).count() as u64;
        BatchReport {
            success_count,
            failure_count: total - success_count,
        }
    }

    async fn settle(&self, action: DeleteAction, observer: &dyn BatchObserver) -> bool {
        match self.dispatch(&action).await {
            Ok(()) => {
                observer.on_removed();
                true
            }
            Err(e) => {
                warn!(endpoint = %action.endpoint, error = %e, "delete request failed");
                observer.on_failed();
                false
            }
        }
    }

    async fn dispatch(&self, action: &DeleteAction) -> Result<()> {
        if self.dry_run {
            info!(endpoint = %action.endpoint, "dry run, delete skipped");
            return Ok(());
        }

        let mut request = self
            .client
            .request(action.method.clone(), &action.endpoint)
            .form(&action.payload);
        if let Some(referer) = &self.referer {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(SweepError::HostPage(format!(
                "delete rejected: HTTP {}",
                status
            )));
        }
        Ok(())
    }
}
