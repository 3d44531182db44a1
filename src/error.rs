//! Error types for TableDB
//!
//! Every failure is local to the command being processed: the engine reports it
//! and the session carries on with its state untouched.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for TableDB
#[derive(Error, Debug)]
pub enum Error {
    // ========== Row Validation Errors ==========
    #[error("Column count mismatch. Expected {expected}, got {found}")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("Invalid {data_type} value for column {column}")]
    InvalidTypeValue { column: String, data_type: String },

    #[error("{}", null_message(.column, *.primary_key))]
    NullViolation { column: String, primary_key: bool },

    #[error("{}", unique_message(.column, *.primary_key))]
    UniqueViolation { column: String, primary_key: bool },

    // ========== Session Errors ==========
    #[error("No table selected. Create a table first.")]
    NoCurrentTable,

    #[error("Table {0} not found")]
    TableNotFound(String),

    // ========== Command Errors ==========
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid INSERT syntax")]
    InvalidInsertSyntax,

    // ========== File Errors ==========
    #[error("Error opening {} for {mode}: {source}", .path.display())]
    FileOpenFailure {
        path: PathBuf,
        mode: FileMode,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Direction of a database file access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Reading,
    Writing,
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileMode::Reading => write!(f, "reading"),
            FileMode::Writing => write!(f, "writing"),
        }
    }
}

fn null_message(column: &str, primary_key: bool) -> String {
    if primary_key {
        format!("Primary key column {} cannot be NULL", column)
    } else {
        format!("Column {} cannot be NULL", column)
    }
}

fn unique_message(column: &str, primary_key: bool) -> String {
    if primary_key {
        format!("Duplicate primary key value in column {}", column)
    } else {
        format!("Duplicate value in UNIQUE column {}", column)
    }
}

impl Error {
    /// True for failures raised by row validation (arity, type, constraints)
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::ColumnCountMismatch { .. }
                | Error::InvalidTypeValue { .. }
                | Error::NullViolation { .. }
                | Error::UniqueViolation { .. }
        )
    }
}

/// Result type alias for TableDB operations
pub type Result<T> = std::result::Result<T, Error>;
