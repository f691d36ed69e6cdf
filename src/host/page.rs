//! The live library page

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use super::parse;
use crate::core::{CountDisplay, DeleteAction, ReloadHandle, RowSource};
use crate::utils::error::{Result, SweepError};

/// A fetched rendering of the configured library page.
///
/// `visible_rows` reflects the page as last loaded; `reload` refetches,
/// which is how the next batch of rows becomes visible after deletions.
/// The scrobble-count display is reseeded from the page metadata on
/// every fetch.
pub struct LibraryPage {
    client: reqwest::Client,
    page_url: Url,
    counter: Arc<dyn CountDisplay>,
    current: Mutex<Option<Vec<DeleteAction>>>,
}

impl LibraryPage {
    /// Create a page handle; nothing is fetched until first use
    pub fn new(client: reqwest::Client, page_url: Url, counter: Arc<dyn CountDisplay>) -> Self {
        Self {
            client,
            page_url,
            counter,
            current: Mutex::new(None),
        }
    }

    async fn fetch(&self) -> Result<Vec<DeleteAction>> {
        debug!(url = %self.page_url, "fetching library page");

        let response = self.client.get(self.page_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SweepError::HostPage(format!(
                "library page returned HTTP {}",
                status
            )));
        }
        let body = response.text().await?;

        if let Some(count) = parse::scrobble_count(&body) {
            self.counter.set(count);
        }
        let rows = parse::delete_actions(&body, &self.page_url)?;
        debug!(rows = rows.len(), "library page parsed");
        Ok(rows)
    }
}

#[async_trait]
impl RowSource for LibraryPage {
    async fn visible_rows(&self) -> Result<Vec<DeleteAction>> {
        let mut current = self.current.lock().await;
        if let Some(rows) = current.as_ref() {
            return Ok(rows.clone());
        }
        let rows = self.fetch().await?;
        *current = Some(rows.clone());
        Ok(rows)
    }
}

#[async_trait]
impl ReloadHandle for LibraryPage {
    async fn reload(&self) -> Result<()> {
        let rows = self.fetch().await?;
        *self.current.lock().await = Some(rows);
        Ok(())
    }
}
