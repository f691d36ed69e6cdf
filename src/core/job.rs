//! Removal job cursor persisted between page passes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cursor for an in-progress removal job.
///
/// Persisted to the resume store after every page batch so an interrupted
/// run picks up where it left off. Invariant: `completed` never exceeds
/// `total_requested` and never decreases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalJob {
    /// Total number of scrobbles the user asked to remove
    pub total_requested: u64,
    /// Successfully removed so far, across all pages
    pub completed: u64,
    /// When the job was first submitted
    #[serde(default = "Utc::now")]
    pub started_at: DateTime<Utc>,
}

impl RemovalJob {
    /// Create a fresh job for a user-submitted target count
    pub fn new(total_requested: u64) -> Self {
        Self {
            total_requested,
            completed: 0,
            started_at: Utc::now(),
        }
    }

    /// Scrobbles still to remove
    pub fn remaining(&self) -> u64 {
        self.total_requested.saturating_sub(self.completed)
    }

    /// Whether the target has been reached
    pub fn is_complete(&self) -> bool {
        self.completed >= self.total_requested
    }

    /// Advance the cursor by a page batch's successful deletions.
    ///
    /// Capped at `total_requested`; the batch bound already guarantees the
    /// cap is never hit, but the invariant holds regardless of caller.
    pub fn record_successes(&mut self, count: u64) {
        self.completed = self
            .completed
            .saturating_add(count)
            .min(self.total_requested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_job() {
        let job = RemovalJob::new(12);
        assert_eq!(job.total_requested, 12);
        assert_eq!(job.completed, 0);
        assert_eq!(job.remaining(), 12);
        assert!(!job.is_complete());
    }

    #[test]
    fn test_record_successes_caps_at_total() {
        let mut job = RemovalJob::new(5);
        job.record_successes(3);
        assert_eq!(job.completed, 3);
        job.record_successes(10);
        assert_eq!(job.completed, 5);
        assert!(job.is_complete());
        assert_eq!(job.remaining(), 0);
    }

    #[test]
    fn test_zero_target_is_complete() {
        let job = RemovalJob::new(0);
        assert!(job.is_complete());
        assert_eq!(job.remaining(), 0);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut job = RemovalJob::new(12);
        job.record_successes(10);

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["totalRequested"], 12);
        assert_eq!(json["completed"], 10);
        assert!(json["startedAt"].is_string());
    }

    #[test]
    fn test_deserialize_without_started_at() {
        // Records written before the timestamp was added still load.
        let job: RemovalJob =
            serde_json::from_str(r#"{"completed": 3, "totalRequested": 5}"#).unwrap();
        assert_eq!(job.completed, 3);
        assert_eq!(job.total_requested, 5);
    }
}
