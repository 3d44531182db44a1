//! System Catalog for TableDB
//!
//! The catalog owns every table by value, in creation order. Tables are
//! addressed either by name (first match wins) or by a `TableId` handle.

use std::io::{BufRead, Write};

use tracing::info;

use crate::error::Result;
use crate::storage::format::{strip_line_ending, TABLE_PREFIX};
use crate::storage::{LoadSummary, Table};

/// Handle to a table inside a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

/// Per-table outcome of loading a database file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub name: String,
    pub summary: LoadSummary,
}

/// System Catalog - owns all tables
#[derive(Debug, Default)]
pub struct Catalog {
    tables: Vec<Table>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty table. Names are not required to be unique.
    pub fn create_table(&mut self, name: &str) -> TableId {
        self.tables.push(Table::new(name));
        info!(table = name, "table created");
        TableId(self.tables.len() - 1)
    }

    /// Get a table by handle
    pub fn get(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.0)
    }

    /// Get a mutable table by handle
    pub fn get_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.get_mut(id.0)
    }

    /// Get the first table with the given name (linear scan)
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// List all table names in creation order
    pub fn list_tables(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name()).collect()
    }

    /// Iterate over tables in creation order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Destroy every table
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Get table schema info as a formatted string (for `.schema`)
    pub fn get_table_info(&self, name: &str) -> Option<String> {
        let table = self.get_table(name)?;
        let mut info = format!("Table: {} ({} rows)\n", table.name(), table.row_count());
        info.push_str("Columns:\n");

        for col in table.schema().columns() {
            let flags = if col.constraints.is_empty() {
                String::new()
            } else {
                format!(" [{}]", col.constraints)
            };
            info.push_str(&format!("  {} {}{}\n", col.name, col.data_type, flags));
        }

        Some(info)
    }

    /// Write every table, in creation order
    pub fn save<W: Write>(&self, out: &mut W) -> Result<()> {
        for table in &self.tables {
            table.save(out)?;
        }
        Ok(())
    }

    /// Append every table block found in `input`.
    ///
    /// Lines outside a `TABLE` block are ignored.
    pub fn load<R: BufRead>(&mut self, input: R) -> Result<Vec<LoadedTable>> {
        let mut loaded = Vec::new();
        let mut lines = input.lines();

        while let Some(line) = lines.next() {
            let line = line?;
            let Some(name) = strip_line_ending(&line).strip_prefix(TABLE_PREFIX) else {
                continue;
            };

            let mut table = Table::new(name);
            let summary = table.load(&mut lines)?;
            info!(
                table = name,
                rows = summary.rows_loaded,
                dropped = summary.rows_dropped,
                "table loaded"
            );
            loaded.push(LoadedTable {
                name: name.to_string(),
                summary,
            });
            self.tables.push(table);
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Constraints, DataType};
    use std::io::Cursor;

    #[test]
    fn test_create_and_get_table() {
        let mut catalog = Catalog::new();
        let id = catalog.create_table("users");

        assert_eq!(catalog.get(id).unwrap().name(), "users");
        assert!(catalog.get_table("users").is_some());
        assert!(catalog.get_table("Users").is_none());
        assert!(catalog.get_table("posts").is_none());
    }

    #[test]
    fn test_duplicate_names_resolve_to_first() {
        let mut catalog = Catalog::new();
        let first = catalog.create_table("t");
        let second = catalog.create_table("t");
        assert_ne!(first, second);

        catalog
            .get_mut(second)
            .unwrap()
            .add_column("id", DataType::Int, Constraints::NONE);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.list_tables(), vec!["t", "t"]);
        assert_eq!(catalog.get_table("t").unwrap().schema().column_count(), 0);
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut catalog = Catalog::new();
        let id = catalog.create_table("t");
        catalog.clear();
        assert!(catalog.is_empty());
        assert!(catalog.get(id).is_none());
    }

    #[test]
    fn test_table_info() {
        let mut catalog = Catalog::new();
        let id = catalog.create_table("users");
        let table = catalog.get_mut(id).unwrap();
        table.add_column("id", DataType::Int, Constraints::PRIMARY_KEY | Constraints::NOT_NULL);
        table.add_column("bio", DataType::Text, Constraints::NONE);

        let info = catalog.get_table_info("users").unwrap();
        assert!(info.contains("id int [PRIMARY KEY, NOT NULL]"));
        assert!(info.contains("  bio text\n"));
        assert!(catalog.get_table_info("nosuch").is_none());
    }

    #[test]
    fn test_load_skips_stray_lines() {
        let file = "garbage\nTABLE a\nx int 0\nDATA\n1\nEND\n\nTABLE b\nDATA\nEND\n";
        let mut catalog = Catalog::new();
        let loaded = catalog.load(Cursor::new(file)).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "a");
        assert_eq!(loaded[0].summary.rows_loaded, 1);
        assert_eq!(catalog.list_tables(), vec!["a", "b"]);
        assert_eq!(catalog.get_table("b").unwrap().schema().column_count(), 0);
    }
}
