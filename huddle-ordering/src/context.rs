//! BoardContext - I/O primitives for board storage
//!
//! The context provides access to storage and utilities. No ordering logic
//! lives here, just data access primitives; operations and transactions do
//! all the work.

use crate::error::{OrderingError, Result};
use crate::types::{Board, ColumnId, LogEntry, Task, TaskId};
use fs2::FileExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Context passed to every operation - provides access, not logic
pub struct BoardContext {
    /// Path to the .huddle directory
    root: PathBuf,
}

impl BoardContext {
    /// Create a new context for the given .huddle directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    /// Get the root .huddle directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to board.json
    pub fn board_path(&self) -> PathBuf {
        self.root.join("board.json")
    }

    /// Path to the tasks directory
    pub fn tasks_dir(&self) -> PathBuf {
        self.root.join("tasks")
    }

    /// Path to a task's JSON file
    pub fn task_path(&self, id: &TaskId) -> PathBuf {
        self.root.join("tasks").join(format!("{}.json", id))
    }

    /// Path to the activity log
    pub fn activity_path(&self) -> PathBuf {
        self.root.join("activity.jsonl")
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Check if the board is initialized
    pub fn is_initialized(&self) -> bool {
        self.board_path().exists()
    }

    /// Create the directory structure for a new board.
    ///
    /// Idempotent - safe to call multiple times.
    pub async fn create_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(self.tasks_dir()).await?;
        Ok(())
    }

    // =========================================================================
    // Board I/O
    // =========================================================================

    /// Read the board file
    pub async fn read_board(&self) -> Result<Board> {
        let path = self.board_path();
        if !path.exists() {
            return Err(OrderingError::NotInitialized {
                path: self.root.clone(),
            });
        }

        let content = fs::read_to_string(&path).await?;
        let board: Board = serde_json::from_str(&content)?;
        Ok(board)
    }

    /// Write the board file (atomic write via temp file)
    pub async fn write_board(&self, board: &Board) -> Result<()> {
        let path = self.board_path();
        let content = serde_json::to_string_pretty(board)?;
        atomic_write(&path, content.as_bytes()).await
    }

    // =========================================================================
    // Task I/O
    // =========================================================================

    /// Read a task file
    pub async fn read_task(&self, id: &TaskId) -> Result<Task> {
        let path = self.task_path(id);
        if !path.exists() {
            return Err(OrderingError::TaskNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let task: Task = serde_json::from_str(&content)?;
        Ok(task)
    }

    /// Write a task file (atomic write via temp file)
    pub async fn write_task(&self, task: &Task) -> Result<()> {
        let path = self.task_path(&task.id);
        let content = serde_json::to_string_pretty(task)?;
        atomic_write(&path, content.as_bytes()).await
    }

    /// Delete a task file
    pub async fn delete_task_file(&self, id: &TaskId) -> Result<()> {
        let path = self.task_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// List all task IDs by reading the tasks directory
    pub async fn list_task_ids(&self) -> Result<Vec<TaskId>> {
        let tasks_dir = self.tasks_dir();
        if !tasks_dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&tasks_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(TaskId::from_string(stem));
                }
            }
        }

        Ok(ids)
    }

    /// Read one column's tasks in display order.
    ///
    /// Positions are unique by convention; ties (possible after explicit
    /// batch writes) fall back to task id so the read stays deterministic.
    pub async fn column_tasks(&self, column: &ColumnId) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        for id in self.list_task_ids().await? {
            let task = self.read_task(&id).await?;
            if &task.column == column {
                tasks.push(task);
            }
        }

        tasks.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        Ok(tasks)
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.activity_path())
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Append an activity entry for a committed operation.
    ///
    /// Never fails the caller: a committed transaction must not be unwound
    /// by a logging error.
    pub async fn log_activity(&self, entry: LogEntry) {
        if let Err(err) = self.append_activity(&entry).await {
            tracing::warn!(error = %err, op = %entry.op, "failed to append activity entry");
        }
    }

    /// Read activity log entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let path = self.activity_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).await?;
        let mut entries: Vec<LogEntry> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Try to acquire the exclusive writer lock (non-blocking).
    ///
    /// Writer serialization happens here: concurrent reorder transactions
    /// against the same board fail fast with [`OrderingError::LockBusy`]
    /// instead of computing midpoints from stale neighbor reads.
    pub async fn lock(&self) -> Result<BoardLock> {
        let file = self.open_lock_file().await?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(BoardLock { file }),
            Err(_) => Err(OrderingError::LockBusy),
        }
    }

    /// Acquire a shared lock for a consistent read (blocks until writers
    /// release).
    pub async fn lock_shared(&self) -> Result<BoardLock> {
        let file = self.open_lock_file().await?;
        file.lock_shared()?;
        Ok(BoardLock { file })
    }

    async fn open_lock_file(&self) -> Result<std::fs::File> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;
        Ok(file)
    }
}

/// RAII lock guard - releases on drop
pub struct BoardLock {
    file: std::fs::File,
}

impl Drop for BoardLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // Rename is atomic on the same filesystem
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}
