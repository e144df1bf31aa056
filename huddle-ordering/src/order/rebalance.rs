//! Column rebalancing.
//!
//! A rebalance rewrites one column's positions to the uniform
//! `0, GAP, 2*GAP, ...` sequence, preserving relative order. The plan here
//! is pure; [`crate::txn::ReorderTxn::stage_rebalance`] stages it inside
//! the transaction that triggered it.

use crate::defaults::GAP;
use crate::types::Task;

/// The uniform position sequence for `count` tasks.
pub fn rebalanced_positions(count: usize) -> impl Iterator<Item = i64> {
    (0..count as i64).map(|i| i * GAP)
}

/// Rewritten task rows for a full-column rebalance.
///
/// `tasks` must already be in display order. Returns only rows whose
/// position actually changes, so rebalancing an already-uniform column
/// yields an empty plan and a repeated rebalance is a no-op in effect.
pub fn rebalance_plan(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .zip(rebalanced_positions(tasks.len()))
        .filter(|(task, position)| task.position != *position)
        .map(|(task, position)| {
            let mut task = task.clone();
            task.position = position;
            task
        })
        .collect()
}
