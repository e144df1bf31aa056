//! Gap monitoring.

/// Check whether a column's spacing has degraded below `threshold`.
///
/// Scans consecutive pairs of the ordered position slice; true when any
/// adjacent delta is smaller than the threshold. Evaluated only for the
/// column(s) touched by the triggering operation - rebalancing is
/// column-scoped, never board-wide.
pub fn needs_rebalance(ordered: &[i64], threshold: i64) -> bool {
    ordered.windows(2).any(|pair| pair[1] - pair[0] < threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{GAP, REBALANCE_THRESHOLD};

    #[test]
    fn test_uniform_column_is_healthy() {
        let ordered = [0, GAP, 2 * GAP];
        assert!(!needs_rebalance(&ordered, REBALANCE_THRESHOLD));
    }

    #[test]
    fn test_degraded_pair_triggers() {
        let ordered = [0, 99, GAP];
        assert!(needs_rebalance(&ordered, REBALANCE_THRESHOLD));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // A delta exactly at the threshold is still acceptable
        let ordered = [0, REBALANCE_THRESHOLD, GAP];
        assert!(!needs_rebalance(&ordered, REBALANCE_THRESHOLD));
    }

    #[test]
    fn test_duplicate_positions_trigger() {
        // Zero delta is below any positive threshold
        let ordered = [0, 500_000, 500_000];
        assert!(needs_rebalance(&ordered, REBALANCE_THRESHOLD));
    }

    #[test]
    fn test_empty_and_singleton_columns_are_healthy() {
        assert!(!needs_rebalance(&[], REBALANCE_THRESHOLD));
        assert!(!needs_rebalance(&[0], REBALANCE_THRESHOLD));
    }
}
