//! Storage module
//!
//! This module contains the in-memory table storage and the flat-file format:
//! - Records
//! - Tables with constraint validation
//! - Database file parsing helpers

pub mod format;
pub mod table;
pub mod tuple;

pub use table::{LoadSummary, SelectAll, Table, NO_RECORDS};
pub use tuple::Record;
