//! AddTask command

use crate::context::BoardContext;
use crate::error::{OrderingError, Result};
use crate::execute::{async_trait, Execute, Operation};
use crate::order::end_position;
use crate::types::{ColumnId, LogEntry, Task};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Add a new task at the end of a column.
///
/// The task is born with `position = max(existing) + GAP` (or the base
/// position in an empty column), so appends never shrink any gap and never
/// trigger a rebalance.
#[derive(Debug, Deserialize, Serialize)]
pub struct AddTask {
    /// The task title (required)
    pub title: String,
    /// Detailed task description
    pub description: Option<String>,
    /// Target column; defaults to the board's first column
    pub column: Option<ColumnId>,
    /// Assignee for this task
    pub assignee: Option<String>,
    /// Tags to apply
    #[serde(default)]
    pub tags: Vec<String>,
}

impl AddTask {
    /// Create a new AddTask command with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            column: None,
            assignee: None,
            tags: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the target column
    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
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

impl Operation for AddTask {
    const VERB: &'static str = "add";
    const NOUN: &'static str = "task";
}

#[async_trait]
impl Execute<BoardContext, OrderingError> for AddTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let started = Instant::now();
        let input = serde_json::to_value(self)?;
        let board = ctx.read_board().await?;

        let column = match &self.column {
            Some(column) => {
                if board.find_column(column).is_none() {
                    return Err(OrderingError::ColumnNotFound {
                        id: column.to_string(),
                    });
                }
                column.clone()
            }
            None => board
                .first_column()
                .map(|c| c.id.clone())
                .ok_or_else(|| OrderingError::invalid_value("column", "board has no columns"))?,
        };

        let mut txn = ctx.begin().await?;
        let ordered = txn.column_tasks(&column).await?;
        let positions: Vec<i64> = ordered.iter().map(|t| t.position).collect();

        let mut task = Task::new(&self.title, column, end_position(&positions));
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        task.assignee = self.assignee.clone();
        task.tags = self.tags.clone();

        txn.stage(task.clone());
        txn.commit().await?;
        tracing::debug!(task = %task.id, position = task.position, "task appended to column");

        let value = serde_json::to_value(&task)?;
        ctx.log_activity(LogEntry::new(
            Self::op(),
            input,
            value.clone(),
            started.elapsed().as_millis() as u64,
        ))
        .await;
        Ok(value)
    }
}
