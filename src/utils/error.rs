//! Error handling for table construction and rendering
//!
//! This module provides the unified error type and result type used by
//! every fallible table operation.

use thiserror::Error;

/// Table error type
///
/// All variants are precondition violations reported at the call site;
/// nothing is retried internally.
#[derive(Debug, Error)]
pub enum TableError {
    /// A row traversal ran past the last row
    #[error("Row {row} not found (table has {rows} rows)")]
    RowNotFound { row: usize, rows: usize },

    /// A column traversal ran past the last column
    #[error("Column {col} not found (table has {cols} columns)")]
    ColumnNotFound { col: usize, cols: usize },

    /// No cell exists at the requested coordinates
    #[error("Cell ({row}, {col}) not found")]
    CellNotFound { row: usize, col: usize },

    /// Invalid argument, unknown style name or unknown property key
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// IO error (for the output sinks)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Config error: {message}")]
    Config { message: String },
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

// Convenience constructors for errors
impl TableError {
    pub fn row_not_found(row: usize, rows: usize) -> Self {
        TableError::RowNotFound { row, rows }
    }

    pub fn column_not_found(col: usize, cols: usize) -> Self {
        TableError::ColumnNotFound { col, cols }
    }

    pub fn cell_not_found(row: usize, col: usize) -> Self {
        TableError::CellNotFound { row, col }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        TableError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        TableError::Config {
            message: message.into(),
        }
    }
}
