//! MoveTask command

use crate::context::BoardContext;
use crate::defaults::REBALANCE_THRESHOLD;
use crate::error::{OrderingError, Result};
use crate::execute::{async_trait, Execute, Operation};
use crate::order::{end_position, needs_rebalance, position_after, position_before, Placement};
use crate::types::{ColumnId, LogEntry, Task, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Move a task to a new position, in its own column or across columns.
///
/// Three placement forms, checked in this order:
/// - a reference task plus side (`after`): midpoint placement next to the
///   reference, in the reference's column;
/// - an explicit `position`: written as given - also the fallback when a
///   supplied reference task cannot be found;
/// - neither: the task goes to the end of the target column (or stays in
///   its own column, moving to the end).
///
/// The response carries `rebalanced: true` when the move rewrote the
/// destination column's positions; the caller's cached column state is then
/// stale and must be refetched.
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// Target column for end-placement and explicit-position moves
    pub column: Option<ColumnId>,
    /// Reference task to place this one next to
    pub reference: Option<TaskId>,
    /// Side of the reference: true = after, false = before
    #[serde(default)]
    pub after: bool,
    /// Explicit position, used when no reference is usable
    pub position: Option<i64>,
}

/// Resolved placement intent for one move
enum Intent {
    End,
    Explicit(i64),
    Relative { anchor: Task, after: bool },
}

impl MoveTask {
    /// Move a task to the end of its own column
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            column: None,
            reference: None,
            after: false,
            position: None,
        }
    }

    /// Move a task to the end of another column
    pub fn to_column(id: impl Into<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::new(id)
        }
    }

    /// Move a task directly after a reference task
    pub fn insert_after(id: impl Into<TaskId>, reference: impl Into<TaskId>) -> Self {
        Self {
            reference: Some(reference.into()),
            after: true,
            ..Self::new(id)
        }
    }

    /// Move a task directly before a reference task
    pub fn insert_before(id: impl Into<TaskId>, reference: impl Into<TaskId>) -> Self {
        Self {
            reference: Some(reference.into()),
            after: false,
            ..Self::new(id)
        }
    }

    /// Move a task to an explicit position
    pub fn at_position(id: impl Into<TaskId>, position: i64) -> Self {
        Self {
            position: Some(position),
            ..Self::new(id)
        }
    }

    /// Set the target column
    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the explicit fallback position
    pub fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }
}

impl Operation for MoveTask {
    const VERB: &'static str = "move";
    const NOUN: &'static str = "task";
}

/// Move response: the updated task plus the rebalance marker
#[derive(Debug, Serialize)]
struct MoveResponse<'a> {
    #[serde(flatten)]
    task: &'a Task,
    rebalanced: bool,
}

#[async_trait]
impl Execute<BoardContext, OrderingError> for MoveTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let started = Instant::now();
        let input = serde_json::to_value(self)?;
        let board = ctx.read_board().await?;

        if self.reference.as_ref() == Some(&self.id) {
            return Err(OrderingError::invalid_value(
                "reference",
                "cannot move a task relative to itself",
            ));
        }

        let mut txn = ctx.begin().await?;
        let mut task = txn.task(&self.id).await?;

        // Resolve the placement intent. A reference takes priority over an
        // explicit position, which kicks in only when the reference cannot
        // be resolved.
        let (destination, intent) = match &self.reference {
            Some(reference) => match txn.task(reference).await {
                Ok(anchor) => {
                    let destination = anchor.column.clone();
                    (
                        destination,
                        Intent::Relative {
                            anchor,
                            after: self.after,
                        },
                    )
                }
                Err(OrderingError::TaskNotFound { .. }) => match self.position {
                    Some(position) => (
                        self.column.clone().unwrap_or_else(|| task.column.clone()),
                        Intent::Explicit(position),
                    ),
                    None => {
                        return Err(OrderingError::TaskNotFound {
                            id: reference.to_string(),
                        })
                    }
                },
                Err(err) => return Err(err),
            },
            None => {
                let destination = self.column.clone().unwrap_or_else(|| task.column.clone());
                match self.position {
                    Some(position) => (destination, Intent::Explicit(position)),
                    None => (destination, Intent::End),
                }
            }
        };

        if board.find_column(&destination).is_none() {
            return Err(OrderingError::ColumnNotFound {
                id: destination.to_string(),
            });
        }

        // The destination column's order without the task being moved
        let mut ordered = txn.column_tasks(&destination).await?;
        ordered.retain(|t| t.id != self.id);
        let positions: Vec<i64> = ordered.iter().map(|t| t.position).collect();

        let mut rebalanced = false;
        match intent {
            Intent::End => {
                task.column = destination.clone();
                task.position = end_position(&positions);
                txn.stage(task.clone());
            }
            Intent::Explicit(position) => {
                task.column = destination.clone();
                task.position = position;
                txn.stage(task.clone());
            }
            Intent::Relative { anchor, after } => {
                let anchor_idx = ordered
                    .iter()
                    .position(|t| t.id == anchor.id)
                    .ok_or_else(|| OrderingError::TaskNotFound {
                        id: anchor.id.to_string(),
                    })?;

                let placement = if after {
                    position_after(&positions, anchor_idx)
                } else {
                    position_before(&positions, anchor_idx)
                };

                match placement {
                    Placement::At(position) => {
                        task.column = destination.clone();
                        task.position = position;
                        txn.stage(task.clone());
                    }
                    Placement::Exhausted => {
                        // The local gap is spent. Rewrite the column with
                        // the task spliced into its slot instead of
                        // emitting a duplicate position.
                        task.column = destination.clone();
                        txn.stage(task.clone());

                        let insert_idx = if after { anchor_idx + 1 } else { anchor_idx };
                        let mut sequence = ordered.clone();
                        sequence.insert(insert_idx, task.clone());
                        txn.stage_rebalance(&sequence);
                        rebalanced = true;
                    }
                }
            }
        }

        if !rebalanced {
            let settled = txn.column_tasks(&destination).await?;
            let settled_positions: Vec<i64> = settled.iter().map(|t| t.position).collect();
            if needs_rebalance(&settled_positions, REBALANCE_THRESHOLD) {
                txn.stage_rebalance(&settled);
                rebalanced = true;
            }
        }
        if rebalanced {
            task = txn.task(&self.id).await?;
            tracing::info!(column = %destination, task = %self.id, "column rebalanced during move");
        }

        txn.commit().await?;

        let value = serde_json::to_value(MoveResponse {
            task: &task,
            rebalanced,
        })?;
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
