//! Position allocation.
//!
//! Pure functions computing a new sparse position from the ordered position
//! slice of one column and an anchor index. Division truncates toward zero
//! (positions never go negative, so this matches floor), and the midpoint is
//! computed as `lo + (hi - lo) / 2` so it cannot overflow in-range inputs.

use crate::defaults::{BASE_POSITION, GAP};

/// Outcome of a placement computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A usable position strictly between (or beyond) the neighbors
    At(i64),
    /// The local gap is spent: the candidate would collide with a neighbor.
    /// The caller must rebalance the column instead of accepting it.
    Exhausted,
}

/// Position for appending at the end of a column.
pub fn end_position(ordered: &[i64]) -> i64 {
    match ordered.last() {
        Some(last) => last + GAP,
        None => BASE_POSITION,
    }
}

/// Position for inserting directly after `ordered[idx]`.
pub fn position_after(ordered: &[i64], idx: usize) -> Placement {
    let anchor = ordered[idx];
    match ordered.get(idx + 1) {
        Some(&successor) => guarded_midpoint(anchor, successor),
        None => Placement::At(anchor + GAP),
    }
}

/// Position for inserting directly before `ordered[idx]`.
pub fn position_before(ordered: &[i64], idx: usize) -> Placement {
    let anchor = ordered[idx];
    if idx == 0 {
        // Halve toward zero ahead of the column head
        let candidate = anchor / 2;
        if candidate == anchor {
            Placement::Exhausted
        } else {
            Placement::At(candidate)
        }
    } else {
        guarded_midpoint(ordered[idx - 1], anchor)
    }
}

/// Midpoint of `lo..hi` that refuses to land on either bound.
fn guarded_midpoint(lo: i64, hi: i64) -> Placement {
    let mid = lo + (hi - lo) / 2;
    if mid == lo || mid == hi {
        Placement::Exhausted
    } else {
        Placement::At(mid)
    }
}
