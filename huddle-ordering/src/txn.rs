//! ReorderTxn - the atomic unit of position writes.
//!
//! A transaction holds the exclusive board lock from `begin` until it is
//! dropped, stages task writes in memory, and applies them on `commit`.
//! Reads through the transaction see staged writes overlaid on the store,
//! so a gap check after staging a move observes the column as it will be
//! once committed. A dropped, uncommitted transaction writes nothing.

use crate::context::{BoardContext, BoardLock};
use crate::error::Result;
use crate::order::rebalance_plan;
use crate::types::{ColumnId, Task, TaskId};
use std::collections::HashMap;

/// An in-flight reorder transaction
pub struct ReorderTxn<'a> {
    ctx: &'a BoardContext,
    lock: BoardLock,
    staged: HashMap<TaskId, Task>,
}

impl BoardContext {
    /// Begin a reorder transaction, acquiring the exclusive board lock.
    ///
    /// Fails fast with [`OrderingError::LockBusy`](crate::OrderingError::LockBusy)
    /// when another transaction holds the lock.
    pub async fn begin(&self) -> Result<ReorderTxn<'_>> {
        let lock = self.lock().await?;
        Ok(ReorderTxn {
            ctx: self,
            lock,
            staged: HashMap::new(),
        })
    }
}

impl ReorderTxn<'_> {
    /// Read a task, preferring a staged copy over the stored one
    pub async fn task(&self, id: &TaskId) -> Result<Task> {
        if let Some(task) = self.staged.get(id) {
            return Ok(task.clone());
        }
        self.ctx.read_task(id).await
    }

    /// Stage a task write. Staging the same task twice keeps the last copy.
    pub fn stage(&mut self, task: Task) {
        self.staged.insert(task.id.clone(), task);
    }

    /// Stage a full-column rebalance over `tasks` (already in display
    /// order). Returns whether any row actually moves.
    pub fn stage_rebalance(&mut self, tasks: &[Task]) -> bool {
        let plan = rebalance_plan(tasks);
        if plan.is_empty() {
            return false;
        }
        tracing::debug!(rows = plan.len(), "staging column rebalance");
        for task in plan {
            self.stage(task);
        }
        true
    }

    /// Read one column's tasks in display order, staged writes included
    pub async fn column_tasks(&self, column: &ColumnId) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        for id in self.ctx.list_task_ids().await? {
            let task = match self.staged.get(&id) {
                Some(staged) => staged.clone(),
                None => self.ctx.read_task(&id).await?,
            };
            if &task.column == column {
                tasks.push(task);
            }
        }

        // Staged tasks not yet on disk
        for task in self.staged.values() {
            if &task.column == column && !tasks.iter().any(|t| t.id == task.id) {
                tasks.push(task.clone());
            }
        }

        tasks.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        Ok(tasks)
    }

    /// Apply all staged writes.
    ///
    /// Prior row states are snapshotted first; if a write fails partway,
    /// the rows already rewritten are restored and the original error is
    /// returned, so the column is never left partially reordered.
    pub async fn commit(self) -> Result<()> {
        let ReorderTxn {
            ctx,
            lock: _lock,
            staged,
        } = self;
        let staged: Vec<Task> = staged.into_values().collect();

        let mut snapshots: Vec<Option<Task>> = Vec::with_capacity(staged.len());
        for task in &staged {
            let prior = if ctx.task_path(&task.id).exists() {
                Some(ctx.read_task(&task.id).await?)
            } else {
                None
            };
            snapshots.push(prior);
        }

        tracing::debug!(writes = staged.len(), "committing reorder transaction");
        for (applied, task) in staged.iter().enumerate() {
            if let Err(err) = ctx.write_task(task).await {
                // Restore the rows already rewritten; the original error wins
                for (written, prior) in staged.iter().zip(&snapshots).take(applied) {
                    match prior {
                        Some(previous) => {
                            let _ = ctx.write_task(previous).await;
                        }
                        None => {
                            let _ = ctx.delete_task_file(&written.id).await;
                        }
                    }
                }
                return Err(err);
            }
        }

        Ok(())
    }
}
