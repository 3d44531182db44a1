//! Catalog module
//!
//! This module contains the table catalog, schema definitions and column types.

pub mod catalog;
pub mod schema;
pub mod types;

pub use catalog::{Catalog, LoadedTable, TableId};
pub use schema::{Column, Constraints, Schema};
pub use types::DataType;
