//! Raw history records.

use serde::{Deserialize, Serialize};

/// Raw history row, as persisted when a patch was applied.
///
/// `patch_type` and `metadata` are kept in their stored form; turning them
/// into typed values is the history builder's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Application sequence number (monotonic per database).
    pub seq: i64,
    /// Patch id.
    pub patch_id: String,
    /// Stored patch type name ("one-off", "cumulative").
    pub patch_type: String,
    /// Patch metadata as JSON.
    pub metadata: String,
    /// Unix timestamp (seconds) of application.
    pub applied_at: i64,
}
