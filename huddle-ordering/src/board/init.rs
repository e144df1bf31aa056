//! InitBoard command

use crate::context::BoardContext;
use crate::defaults::default_columns;
use crate::error::{OrderingError, Result};
use crate::execute::{async_trait, Execute, Operation};
use crate::types::{Board, Column, LogEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Initialize a new board.
///
/// Seeds the column reference data the ordering engine validates against;
/// the engine itself never creates or deletes columns afterwards.
#[derive(Debug, Deserialize, Serialize)]
pub struct InitBoard {
    /// The board name
    pub name: String,
    /// Optional board description
    pub description: Option<String>,
    /// Columns to seed; defaults to todo/doing/done
    pub columns: Option<Vec<Column>>,
}

impl InitBoard {
    /// Create a new InitBoard command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            columns: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the column set
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }
}

impl Operation for InitBoard {
    const VERB: &'static str = "init";
    const NOUN: &'static str = "board";
}

#[async_trait]
impl Execute<BoardContext, OrderingError> for InitBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let started = Instant::now();
        let input = serde_json::to_value(self)?;

        if ctx.is_initialized() {
            return Err(OrderingError::AlreadyExists {
                path: ctx.root().to_path_buf(),
            });
        }

        ctx.create_directories().await?;

        let mut board = Board::new(&self.name);
        if let Some(description) = &self.description {
            board = board.with_description(description);
        }
        board.columns = self.columns.clone().unwrap_or_else(default_columns);

        ctx.write_board(&board).await?;

        let value = serde_json::to_value(&board)?;
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
