//! Board-level types: Board, Column

use super::ids::ColumnId;
use serde::{Deserialize, Serialize};

/// The kanban board: metadata plus its column set.
///
/// Columns are static reference data for the ordering engine - it validates
/// against them but never creates, reorders, or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    /// Create a new board with the given name and no columns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            columns: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Find a column by id
    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// The column with the lowest display order
    pub fn first_column(&self) -> Option<&Column> {
        self.columns.iter().min_by_key(|c| c.order)
    }
}

/// A column defines a workflow stage.
///
/// `order` is the column's own place among columns - unrelated to the
/// sparse task positions within it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub order: usize,
}

impl Column {
    /// Create a new column
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new("Huddle");
        assert_eq!(board.name, "Huddle");
        assert!(board.description.is_none());
        assert!(board.columns.is_empty());
    }

    #[test]
    fn test_board_with_description() {
        let board = Board::new("Huddle").with_description("Team dashboard board");
        assert_eq!(board.description, Some("Team dashboard board".into()));
    }

    #[test]
    fn test_find_column() {
        let mut board = Board::new("Test");
        board.columns = vec![
            Column::new("todo", "To Do", 0),
            Column::new("done", "Done", 1),
        ];

        assert!(board.find_column(&"todo".into()).is_some());
        assert!(board.find_column(&"missing".into()).is_none());
    }

    #[test]
    fn test_first_column_uses_display_order() {
        let mut board = Board::new("Test");
        board.columns = vec![
            Column::new("done", "Done", 2),
            Column::new("todo", "To Do", 0),
            Column::new("doing", "Doing", 1),
        ];

        assert_eq!(board.first_column().unwrap().id.as_str(), "todo");
    }

    #[test]
    fn test_board_serialization() {
        let mut board = Board::new("Test");
        board.columns = vec![Column::new("todo", "To Do", 0)];

        let json = serde_json::to_string_pretty(&board).unwrap();
        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, board.name);
        assert_eq!(parsed.columns.len(), 1);
        assert_eq!(parsed.columns[0].id.as_str(), "todo");
    }
}
