//! Core types for the ordering engine

mod board;
mod ids;
mod log;
mod task;

// Re-export all types
pub use board::{Board, Column};
pub use ids::{ColumnId, LogEntryId, TaskId};
pub use log::LogEntry;
pub use task::Task;
