//! Common test utilities
//!
//! Shared fakes and wiremock helpers for the coordinator and executor
//! tests: a scripted host page, recording display sinks, and per-row
//! delete mounts.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scrobble_sweep::Result;
use scrobble_sweep::core::{CountDisplay, DeleteAction, ProgressSink, ReloadHandle, RowSource};

/// Host page fake: a scripted sequence of page renderings.
///
/// `visible_rows` serves the current rendering until `reload` advances
/// to the next scripted one; running out of pages renders empty.
pub struct ScriptedPage {
    current: Mutex<Vec<DeleteAction>>,
    upcoming: Mutex<VecDeque<Vec<DeleteAction>>>,
    reloads: AtomicUsize,
}

impl ScriptedPage {
    pub fn new(mut pages: Vec<Vec<DeleteAction>>) -> Self {
        let current = if pages.is_empty() {
            Vec::new()
        } else {
            pages.remove(0)
        };
        Self {
            current: Mutex::new(current),
            upcoming: Mutex::new(pages.into()),
            reloads: AtomicUsize::new(0),
        }
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RowSource for ScriptedPage {
    async fn visible_rows(&self) -> Result<Vec<DeleteAction>> {
        Ok(self.current.lock().unwrap().clone())
    }
}

#[async_trait]
impl ReloadHandle for ScriptedPage {
    async fn reload(&self) -> Result<()> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        let next = self.upcoming.lock().unwrap().pop_front().unwrap_or_default();
        *self.current.lock().unwrap() = next;
        Ok(())
    }
}

/// Progress sink recording every update
#[derive(Default)]
pub struct RecordingProgress {
    shown: Mutex<Vec<(u64, u64)>>,
    clears: AtomicUsize,
}

impl RecordingProgress {
    pub fn shown(&self) -> Vec<(u64, u64)> {
        self.shown.lock().unwrap().clone()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl ProgressSink for RecordingProgress {
    fn show(&self, completed: u64, total: u64) {
        self.shown.lock().unwrap().push((completed, total));
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}

/// Count display recording decrements
#[derive(Default)]
pub struct RecordingCount {
    decrements: AtomicUsize,
}

impl RecordingCount {
    pub fn decrement_count(&self) -> usize {
        self.decrements.load(Ordering::SeqCst)
    }
}

impl CountDisplay for RecordingCount {
    fn set(&self, _count: u64) {}

    fn decrement(&self) {
        self.decrements.fetch_add(1, Ordering::SeqCst);
    }
}

/// One delete action per scrobble index, aimed at the mock server
pub fn actions(server: &MockServer, range: std::ops::Range<usize>) -> Vec<DeleteAction> {
    range
        .map(|i| {
            DeleteAction::post(
                format!("{}/user/me/library/delete/{}", server.uri(), i),
                vec![
                    ("csrfmiddlewaretoken".to_string(), "tok".to_string()),
                    ("timestamp".to_string(), format!("16900000{i:02}")),
                ],
            )
        })
        .collect()
}

/// Mount a delete endpoint answering with the given status
pub async fn mount_delete(server: &MockServer, index: usize, status: u16) {
    Mock::given(method("POST"))
        .and(path(format!("/user/me/library/delete/{index}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mount a delete endpoint that fails once, then succeeds
pub async fn mount_delete_failing_once(server: &MockServer, index: usize) {
    Mock::given(method("POST"))
        .and(path(format!("/user/me/library/delete/{index}")))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(server)
        .await;
    mount_delete(server, index, 200).await;
}
