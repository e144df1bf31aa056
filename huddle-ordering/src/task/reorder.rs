//! ReorderColumn command

use crate::context::BoardContext;
use crate::defaults::REBALANCE_THRESHOLD;
use crate::error::{OrderingError, Result};
use crate::execute::{async_trait, Execute, Operation};
use crate::order::needs_rebalance;
use crate::types::{ColumnId, LogEntry, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// One position write in a batch reorder
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderEntry {
    /// The task to reposition
    pub task: TaskId,
    /// Its new position
    pub position: i64,
}

/// Apply a batch of position writes to one column as a single transaction.
///
/// Every task must already live in the column; any unknown or misplaced
/// task aborts the whole batch before a single row changes. After the
/// writes, the column is gap-checked once and rebalanced if the new
/// spacing degraded - `rebalanced: true` in the response tells the caller
/// to refetch the column.
#[derive(Debug, Deserialize, Serialize)]
pub struct ReorderColumn {
    /// The column being reordered
    pub column: ColumnId,
    /// The position writes to apply; duplicate task ids keep the last write
    pub entries: Vec<ReorderEntry>,
}

impl ReorderColumn {
    /// Create a new ReorderColumn command
    pub fn new(column: impl Into<ColumnId>, entries: Vec<ReorderEntry>) -> Self {
        Self {
            column: column.into(),
            entries,
        }
    }
}

impl Operation for ReorderColumn {
    const VERB: &'static str = "reorder";
    const NOUN: &'static str = "column";
}

#[async_trait]
impl Execute<BoardContext, OrderingError> for ReorderColumn {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let started = Instant::now();
        let input = serde_json::to_value(self)?;

        if self.entries.is_empty() {
            return Err(OrderingError::EmptyBatch);
        }

        let board = ctx.read_board().await?;
        if board.find_column(&self.column).is_none() {
            return Err(OrderingError::ColumnNotFound {
                id: self.column.to_string(),
            });
        }

        let mut txn = ctx.begin().await?;
        for entry in &self.entries {
            let mut task = txn.task(&entry.task).await?;
            if task.column != self.column {
                return Err(OrderingError::TaskNotInColumn {
                    task: entry.task.to_string(),
                    column: self.column.to_string(),
                });
            }
            task.position = entry.position;
            txn.stage(task);
        }

        let settled = txn.column_tasks(&self.column).await?;
        let positions: Vec<i64> = settled.iter().map(|t| t.position).collect();
        let mut rebalanced = false;
        if needs_rebalance(&positions, REBALANCE_THRESHOLD) {
            txn.stage_rebalance(&settled);
            rebalanced = true;
            tracing::info!(column = %self.column, "column rebalanced after batch reorder");
        }

        txn.commit().await?;

        let value = serde_json::json!({ "success": true, "rebalanced": rebalanced });
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
