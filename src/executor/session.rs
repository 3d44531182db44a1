//! Session state
//!
//! The session remembers which table schema-building and insert commands
//! apply to. It holds a handle into the catalog, never the table itself.

use crate::catalog::{Catalog, TableId};
use crate::error::{Error, Result};
use crate::storage::Table;

/// Per-session command context
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_table: Option<TableId>,
}

impl Session {
    /// Create a session with no current table
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the current table, if any
    pub fn current_table(&self) -> Option<TableId> {
        self.current_table
    }

    /// Make `id` the current table
    pub fn select(&mut self, id: TableId) {
        self.current_table = Some(id);
    }

    /// Forget the current table
    pub fn reset(&mut self) {
        self.current_table = None;
    }

    /// Resolve the current table inside `catalog` for mutation
    pub fn current_mut<'c>(&self, catalog: &'c mut Catalog) -> Result<&'c mut Table> {
        self.current_table
            .and_then(|id| catalog.get_mut(id))
            .ok_or(Error::NoCurrentTable)
    }
}
