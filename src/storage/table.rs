//! Table storage for TableDB
//!
//! A table owns its schema and its records. Records are kept in insertion
//! order and every lookup is a linear scan.

use std::io::{self, Write};

use tracing::{debug, warn};

use super::format::{self, DATA_MARKER, END_MARKER, TABLE_PREFIX};
use super::tuple::Record;
use crate::catalog::{Column, Constraints, DataType, Schema};
use crate::error::{Error, Result};

/// Message shown by `SELECT *` on a table without records
pub const NO_RECORDS: &str = "No records found.";

/// Outcome of reading one table block from a data file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows that passed validation and were appended
    pub rows_loaded: usize,
    /// Rows rejected by validation and skipped
    pub rows_dropped: usize,
}

/// A named table
#[derive(Debug, Clone, Default)]
pub struct Table {
    name: String,
    schema: Schema,
    records: Vec<Record>,
}

impl Table {
    /// Create a new empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Schema::new(),
            records: Vec::new(),
        }
    }

    /// Get table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get table schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// All records in insertion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Get record count
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Append a column. Existing rows are not revisited.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        data_type: DataType,
        constraints: Constraints,
    ) -> &Column {
        let column = Column::new(name, data_type).constraints(constraints);
        debug!(
            table = %self.name,
            column = %column.name,
            data_type = %column.data_type,
            constraints = %column.constraints,
            "column added"
        );
        self.schema.add_column(column)
    }

    /// Validate and append a row. Nothing is appended on failure.
    pub fn insert_row(&mut self, values: Vec<String>) -> Result<()> {
        self.validate(&values)?;
        self.records.push(Record::new(values));
        debug!(table = %self.name, rows = self.records.len(), "record inserted");
        Ok(())
    }

    fn validate(&self, values: &[String]) -> Result<()> {
        let columns = self.schema.columns();

        if values.len() != columns.len() {
            return Err(Error::ColumnCountMismatch {
                expected: columns.len(),
                found: values.len(),
            });
        }

        for (col, value) in columns.iter().zip(values) {
            if !col.data_type.accepts(value) {
                return Err(Error::InvalidTypeValue {
                    column: col.name.clone(),
                    data_type: col.data_type.to_string(),
                });
            }
        }

        // Three fixed passes; the first violation in column order wins.
        for (col, value) in columns.iter().zip(values) {
            if col.has_constraint(Constraints::NOT_NULL) && value.is_empty() {
                return Err(Error::NullViolation {
                    column: col.name.clone(),
                    primary_key: false,
                });
            }
        }

        for (col, value) in columns.iter().zip(values) {
            if col.has_constraint(Constraints::UNIQUE) && self.column_contains(col.position, value)
            {
                return Err(Error::UniqueViolation {
                    column: col.name.clone(),
                    primary_key: false,
                });
            }
        }

        for (col, value) in columns.iter().zip(values) {
            if !col.has_constraint(Constraints::PRIMARY_KEY) {
                continue;
            }
            if value.is_empty() {
                return Err(Error::NullViolation {
                    column: col.name.clone(),
                    primary_key: true,
                });
            }
            if self.column_contains(col.position, value) {
                return Err(Error::UniqueViolation {
                    column: col.name.clone(),
                    primary_key: true,
                });
            }
        }

        Ok(())
    }

    fn column_contains(&self, index: usize, value: &str) -> bool {
        self.records.iter().any(|record| record.get(index) == value)
    }

    /// Render the table for `SELECT *`
    pub fn select_all(&self, column_width: usize) -> SelectAll<'_> {
        SelectAll {
            table: self,
            width: column_width,
        }
    }

    /// Write this table as one self-delimited block
    pub fn save<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}{}", TABLE_PREFIX, self.name)?;
        for col in self.schema.columns() {
            writeln!(
                out,
                "{} {} {}",
                col.name,
                col.data_type,
                col.constraints.bits()
            )?;
        }
        writeln!(out, "{}", DATA_MARKER)?;
        for record in &self.records {
            writeln!(out, "{}", record)?;
        }
        writeln!(out, "{}", END_MARKER)?;
        Ok(())
    }

    /// Read the rest of a table block (everything after its `TABLE` line).
    ///
    /// Column lines are read up to `DATA`, data lines up to `END`. Rows that
    /// fail validation are skipped rather than aborting the load.
    pub fn load<I>(&mut self, lines: &mut I) -> Result<LoadSummary>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let mut summary = LoadSummary::default();

        for line in lines.by_ref() {
            let line = line?;
            let line = format::strip_line_ending(&line);
            if line == DATA_MARKER {
                break;
            }
            if let Some(column) = format::parse_column_line(line) {
                self.add_column(column.name, column.data_type, column.constraints);
            }
        }

        for line in lines.by_ref() {
            let line = line?;
            let line = format::strip_line_ending(&line);
            if line == END_MARKER {
                break;
            }
            let values = format::parse_data_line(line);
            if values.is_empty() {
                continue;
            }
            match self.insert_row(values) {
                Ok(()) => summary.rows_loaded += 1,
                Err(e) if e.is_constraint_violation() => {
                    warn!(table = %self.name, error = %e, "dropping row during load");
                    summary.rows_dropped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }
}

/// Lazy `SELECT *` rendering of a table.
///
/// Every call to `lines` starts a fresh pass over the table.
#[derive(Debug, Clone, Copy)]
pub struct SelectAll<'a> {
    table: &'a Table,
    width: usize,
}

impl<'a> SelectAll<'a> {
    /// Output lines: header, separator, then one line per record
    pub fn lines(&self) -> Box<dyn Iterator<Item = String> + 'a> {
        let table = self.table;
        let width = self.width;

        if table.records.is_empty() {
            return Box::new(std::iter::once(NO_RECORDS.to_string()));
        }

        let header = pad_fields(table.schema.column_names(), width);
        let separator = "-".repeat(width * table.schema.column_count());
        let rows = table
            .records
            .iter()
            .map(move |record| pad_fields(record.values().iter().map(String::as_str), width));

        Box::new([header, separator].into_iter().chain(rows))
    }
}

impl std::fmt::Display for SelectAll<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn pad_fields<'s>(fields: impl IntoIterator<Item = &'s str>, width: usize) -> String {
    fields
        .into_iter()
        .map(|field| format!("{:<width$}", field, width = width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_table() -> Table {
        let mut table = Table::new("users");
        table.add_column("id", DataType::Int, Constraints::PRIMARY_KEY);
        table.add_column("name", DataType::Text, Constraints::NOT_NULL);
        table.add_column("email", DataType::Text, Constraints::UNIQUE);
        table
    }

    #[test]
    fn test_table_insert() {
        let mut table = create_test_table();
        table.insert_row(values(&["1", "Alice", "a@x"])).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.records()[0].get(1), "Alice");
    }

    #[test]
    fn test_add_column_returns_appended_column() {
        let mut table = create_test_table();
        let column = table.add_column("age", DataType::Int, Constraints::NONE);
        assert_eq!(column.name, "age");
        assert_eq!(column.position, 3);

        let positions: Vec<usize> = table.schema().columns().iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_table_wrong_column_count() {
        let mut table = create_test_table();
        let result = table.insert_row(values(&["1", "Alice"]));
        assert!(matches!(
            result,
            Err(Error::ColumnCountMismatch {
                expected: 3,
                found: 2
            })
        ));
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_table_invalid_integer() {
        let mut table = create_test_table();
        let result = table.insert_row(values(&["1x", "Alice", "a@x"]));
        assert!(matches!(result, Err(Error::InvalidTypeValue { ref column, .. }) if column == "id"));

        // Loose integer check is kept as is.
        table.insert_row(values(&["--1", "Bob", "b@x"])).unwrap();
    }

    #[test]
    fn test_table_not_null_constraint() {
        let mut table = create_test_table();
        let result = table.insert_row(values(&["1", "", "a@x"]));
        assert!(matches!(
            result,
            Err(Error::NullViolation { ref column, primary_key: false }) if column == "name"
        ));
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_table_unique_constraint() {
        let mut table = create_test_table();
        table.insert_row(values(&["1", "Alice", "a@x"])).unwrap();
        let result = table.insert_row(values(&["2", "Bob", "a@x"]));
        assert!(matches!(
            result,
            Err(Error::UniqueViolation { ref column, primary_key: false }) if column == "email"
        ));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_table_primary_key_constraint() {
        let mut table = create_test_table();
        table.insert_row(values(&["1", "Alice", "a@x"])).unwrap();

        let result = table.insert_row(values(&["1", "Bob", "b@x"]));
        assert!(matches!(
            result,
            Err(Error::UniqueViolation { primary_key: true, .. })
        ));

        let result = table.insert_row(values(&["", "Bob", "b@x"]));
        assert!(matches!(
            result,
            Err(Error::NullViolation { primary_key: true, .. })
        ));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_validation_pass_order() {
        let mut table = create_test_table();
        table.insert_row(values(&["1", "Alice", "a@x"])).unwrap();

        // Duplicate primary key and empty NOT NULL field: the NOT NULL pass runs first.
        let result = table.insert_row(values(&["1", "", "b@x"]));
        assert!(matches!(result, Err(Error::NullViolation { primary_key: false, .. })));

        // Duplicate primary key and duplicate UNIQUE field: the UNIQUE pass runs first.
        let result = table.insert_row(values(&["1", "Bob", "a@x"]));
        assert!(matches!(result, Err(Error::UniqueViolation { primary_key: false, .. })));
    }

    #[test]
    fn test_select_all_rendering() {
        let mut table = Table::new("t");
        table.add_column("id", DataType::Int, Constraints::NONE);
        table.add_column("name", DataType::Text, Constraints::NONE);

        let lines: Vec<String> = table.select_all(6).lines().collect();
        assert_eq!(lines, vec![NO_RECORDS.to_string()]);

        table.insert_row(values(&["1", "Alice"])).unwrap();
        table.insert_row(values(&["2", "Bob"])).unwrap();

        let view = table.select_all(6);
        let lines: Vec<String> = view.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id    name  ".to_string(),
                "------------".to_string(),
                "1     Alice ".to_string(),
                "2     Bob   ".to_string(),
            ]
        );
        // Rendering can be restarted.
        assert_eq!(view.lines().count(), 4);
        assert_eq!(view.to_string().lines().count(), 4);
    }

    #[test]
    fn test_save_block() {
        let mut table = create_test_table();
        table.insert_row(values(&["1", "Alice", "a@x"])).unwrap();

        let mut out = Vec::new();
        table.save(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "TABLE users\nid int 1\nname text 2\nemail text 4\nDATA\n1 Alice a@x\nEND\n"
        );
    }

    #[test]
    fn test_load_block_drops_invalid_rows() {
        let block = "id int 1\n\nname text 0\nDATA\n1 Alice\n\n1 Bob\n2\n2 Carol\nEND\nTABLE next\n";
        let mut lines = block.lines().map(|l| Ok::<_, io::Error>(l.to_string()));

        let mut table = Table::new("users");
        let summary = table.load(&mut lines).unwrap();

        assert_eq!(table.schema().column_names(), vec!["id", "name"]);
        assert_eq!(
            summary,
            LoadSummary {
                rows_loaded: 2,
                rows_dropped: 2
            }
        );
        assert_eq!(table.records()[1].values(), &values(&["2", "Carol"])[..]);
        // The iterator stops right after END.
        assert_eq!(lines.next().unwrap().unwrap(), "TABLE next");
    }
}
