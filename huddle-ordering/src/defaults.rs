//! Engine-wide constants and board defaults

use crate::types::Column;

/// Spacing between consecutive positions assigned at creation and during a
/// rebalance. Large enough that a gap absorbs many midpoint insertions
/// (~log2(GAP / REBALANCE_THRESHOLD) bisections) before a rebalance is due.
pub const GAP: i64 = 1_000_000;

/// Position assigned to the first task of an empty column.
pub const BASE_POSITION: i64 = 0;

/// Minimum adjacent gap. A column whose spacing degrades below this is
/// rebalanced within the same transaction that degraded it.
pub const REBALANCE_THRESHOLD: i64 = 100;

/// The column set seeded by board initialization.
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("todo", "To Do", 0),
        Column::new("doing", "Doing", 1),
        Column::new("done", "Done", 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns() {
        let cols = default_columns();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].id.as_str(), "todo");
        assert_eq!(cols[2].id.as_str(), "done");
    }

    #[test]
    fn test_threshold_leaves_bisection_headroom() {
        // A fresh gap must survive several bisections before rebalancing
        assert!(GAP / REBALANCE_THRESHOLD >= 1 << 10);
    }
}
