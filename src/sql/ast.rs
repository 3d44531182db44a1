//! Command AST
//!
//! This module defines the parsed form of every command the engine accepts.

use crate::catalog::{Constraints, DataType};

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// CREATE TABLE <name>
    CreateTable { name: String },
    /// ADD COLUMN <name> <type> [PRIMARY] [NOTNULL] [UNIQUE]
    AddColumn(AddColumnCommand),
    /// INSERT INTO <table> VALUES (v1, v2, ...)
    Insert(InsertCommand),
    /// SELECT * FROM <name>
    Select { table_name: String },
    /// SAVE TO FILE
    Save,
    /// LOAD FROM FILE
    Load,
}

/// ADD COLUMN command
#[derive(Debug, Clone, PartialEq)]
pub struct AddColumnCommand {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Constraints,
}

/// INSERT command
#[derive(Debug, Clone, PartialEq)]
pub struct InsertCommand {
    /// Table named after INTO. Parsed but never used to pick the target:
    /// inserts always go to the current table.
    pub table_name: Option<String>,
    /// Field values, or `None` when the VALUES keyword is missing
    pub values: Option<Vec<String>>,
}
