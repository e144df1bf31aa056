//! Task type

use super::ids::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// A task/card on the kanban board.
///
/// Only `column` and `position` matter to the ordering engine; the rest of
/// the payload (title, description, assignee, tags) is carried through
/// opaquely for the surrounding dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// The column this task currently lives in
    pub column: ColumnId,
    /// Sparse sort key. Unique within a column by convention; reading a
    /// column ordered by `position` ascending yields the display order.
    pub position: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// Create a new task at the given column/position
    pub fn new(title: impl Into<String>, column: ColumnId, position: i64) -> Self {
        Self {
            id: TaskId::new(),
            column,
            position,
            title: title.into(),
            description: String::new(),
            assignee: None,
            tags: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}
