//! Activity log entry type

use super::ids::LogEntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A log entry recording a committed ordering operation.
///
/// Entries are appended to the board's activity log after a transaction
/// commits; they are the engine-side audit trail, not the dashboard's
/// activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique ID for this log entry
    pub id: LogEntryId,

    /// When the operation committed
    pub timestamp: DateTime<Utc>,

    /// Canonical op string (e.g., "move task")
    pub op: String,

    /// The normalized input parameters
    pub input: Value,

    /// The response payload
    pub output: Value,

    /// How long the operation took
    pub duration_ms: u64,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(op: impl Into<String>, input: Value, output: Value, duration_ms: u64) -> Self {
        Self {
            id: LogEntryId::new(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_creation() {
        let entry = LogEntry::new(
            "move task",
            serde_json::json!({"id": "abc"}),
            serde_json::json!({"position": 500_000}),
            12,
        );

        assert_eq!(entry.op, "move task");
        assert_eq!(entry.duration_ms, 12);
        assert_eq!(entry.output["position"], 500_000);
    }

    #[test]
    fn test_log_entry_serialization() {
        let entry = LogEntry::new("add task", Value::Null, Value::Null, 3);
        let line = serde_json::to_string(&entry).unwrap();
        let parsed: LogEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.id, entry.id);
        assert_eq!(parsed.op, "add task");
    }
}
