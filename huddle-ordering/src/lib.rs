//! Task ordering engine for the Huddle kanban board
//!
//! This crate keeps kanban tasks within a column in a stable,
//! user-controlled sequence while supporting drag-and-drop reordering with
//! minimal writes. Tasks carry sparse integer positions: new tasks land
//! `GAP` apart, a drag lands on the midpoint between its new neighbors, and
//! when repeated bisection wears the spacing down, the affected column is
//! rewritten to uniform spacing inside the same transaction.
//!
//! ## Overview
//!
//! - **Sparse positions** - most moves write exactly one row
//! - **Column-scoped rebalancing** - a degraded column is rewritten as
//!   `0, GAP, 2*GAP, ...`, never the whole board
//! - **Atomic transactions** - a move or batch reorder either fully
//!   applies (including any rebalance it triggered) or not at all
//! - **Serialized writers** - an exclusive board lock makes concurrent
//!   reorders fail fast and retryably instead of colliding on stale reads
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use huddle_ordering::{board::InitBoard, task::{AddTask, MoveTask}, BoardContext, Execute};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Initialize a new board
//! let ctx = BoardContext::new("/path/to/team/.huddle");
//! InitBoard::new("Huddle").execute(&ctx).await?;
//!
//! // Add two tasks, then drag the second above the first
//! let first = AddTask::new("Ship the status panel").execute(&ctx).await?;
//! let second = AddTask::new("Fix login flow").execute(&ctx).await?;
//!
//! let moved = MoveTask::insert_before(
//!     second["id"].as_str().unwrap_or_default(),
//!     first["id"].as_str().unwrap_or_default(),
//! )
//! .execute(&ctx)
//! .await?;
//!
//! if moved["rebalanced"].as_bool() == Some(true) {
//!     // Positions beyond the moved task changed; refetch the column
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! team/
//! └── .huddle/
//!     ├── board.json       # Board metadata + column reference data
//!     ├── tasks/
//!     │   └── {id}.json    # One task per file
//!     ├── activity.jsonl   # Committed ordering operations, append-only
//!     └── .lock            # Advisory lock serializing writers
//! ```
//!
//! Task files are written atomically (temp file + rename); multi-row
//! transactions snapshot prior states and restore them if a write fails
//! partway.

mod context;
pub mod defaults;
mod error;
mod execute;
pub mod order;
mod txn;
pub mod types;

// Command modules
pub mod board;
pub mod task;

pub use context::{BoardContext, BoardLock};
pub use error::{OrderingError, Result};
pub use execute::{async_trait, Execute, Operation};
pub use txn::ReorderTxn;

// Re-export commonly used types
pub use types::{Board, Column, ColumnId, LogEntry, LogEntryId, Task, TaskId};
