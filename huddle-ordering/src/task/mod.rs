//! Task ordering commands

mod add;
mod list;
mod mv;
mod reorder;

pub use add::AddTask;
pub use list::ListColumnTasks;
pub use mv::MoveTask;
pub use reorder::{ReorderColumn, ReorderEntry};
