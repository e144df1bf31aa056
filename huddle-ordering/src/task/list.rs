//! ListColumnTasks command

use crate::context::BoardContext;
use crate::error::{OrderingError, Result};
use crate::execute::{async_trait, Execute, Operation};
use crate::types::ColumnId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List one column's tasks in display order.
///
/// This is the refetch surface: whenever a move or batch reorder reports
/// `rebalanced: true` (or fails), cached client state for the column is
/// stale and this read is authoritative. The read takes a shared lock so
/// it never observes a half-applied transaction.
#[derive(Debug, Deserialize, Serialize)]
pub struct ListColumnTasks {
    /// The column to list
    pub column: ColumnId,
}

impl ListColumnTasks {
    /// Create a new ListColumnTasks command
    pub fn new(column: impl Into<ColumnId>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Operation for ListColumnTasks {
    const VERB: &'static str = "list";
    const NOUN: &'static str = "column";
}

#[async_trait]
impl Execute<BoardContext, OrderingError> for ListColumnTasks {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let board = ctx.read_board().await?;
        if board.find_column(&self.column).is_none() {
            return Err(OrderingError::ColumnNotFound {
                id: self.column.to_string(),
            });
        }

        let _guard = ctx.lock_shared().await?;
        let tasks = ctx.column_tasks(&self.column).await?;

        Ok(serde_json::json!({
            "column": self.column,
            "tasks": tasks,
            "count": tasks.len(),
        }))
    }
}
