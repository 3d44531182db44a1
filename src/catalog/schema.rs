//! Schema definitions for TableDB
//!
//! This module defines column metadata, the constraint bit-set and the ordered
//! column list owned by every table.

use super::types::DataType;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit-set over the column constraints.
///
/// The bits are stored exactly as given; PRIMARY_KEY does not imply the other
/// two bits here, the table enforces its NOT NULL/UNIQUE meaning on insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Constraints(u32);

impl Constraints {
    pub const NONE: Constraints = Constraints(0);
    pub const PRIMARY_KEY: Constraints = Constraints(1);
    pub const NOT_NULL: Constraints = Constraints(2);
    pub const UNIQUE: Constraints = Constraints(4);

    /// Build from the raw integer used in the data file
    pub fn from_bits(bits: u32) -> Self {
        Constraints(bits)
    }

    /// Raw integer value, as written to the data file
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Map a command keyword to its flag
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "PRIMARY" => Some(Self::PRIMARY_KEY),
            "NOTNULL" => Some(Self::NOT_NULL),
            "UNIQUE" => Some(Self::UNIQUE),
            _ => None,
        }
    }

    /// Check whether every bit of `flag` is set
    pub fn contains(&self, flag: Constraints) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Constraints {
    type Output = Constraints;

    fn bitor(self, rhs: Self) -> Self::Output {
        Constraints(self.0 | rhs.0)
    }
}

impl BitOrAssign for Constraints {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(Self::PRIMARY_KEY) {
            flags.push("PRIMARY KEY");
        }
        if self.contains(Self::NOT_NULL) {
            flags.push("NOT NULL");
        }
        if self.contains(Self::UNIQUE) {
            flags.push("UNIQUE");
        }

        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join(", "))
        }
    }
}

/// Column definition in a table
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared type tag
    pub data_type: DataType,
    /// Column position (0-indexed), assigned by the owning schema
    pub position: usize,
    /// Constraint flags
    pub constraints: Constraints,
}

impl Column {
    /// Create a new column without constraints
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            position: 0,
            constraints: Constraints::NONE,
        }
    }

    /// Set the constraint flags
    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Capability test for a single flag
    pub fn has_constraint(&self, flag: Constraints) -> bool {
        self.constraints.contains(flag)
    }
}

/// Table schema - the ordered column list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column at the end, assigning its position
    pub fn add_column(&mut self, mut column: Column) -> &Column {
        let position = self.columns.len();
        column.position = position;
        self.columns.push(column);
        &self.columns[position]
    }

    /// Get column by name (first match; names are not required to be unique)
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creation() {
        let mut schema = Schema::new();
        schema.add_column(
            Column::new("id", DataType::Int).constraints(Constraints::PRIMARY_KEY),
        );
        schema.add_column(Column::new("name", DataType::Text));

        assert_eq!(schema.column_count(), 2);
        assert_eq!(schema.column_names(), vec!["id", "name"]);

        let id_col = schema.get_column("id").unwrap();
        assert_eq!(id_col.position, 0);
        assert!(id_col.has_constraint(Constraints::PRIMARY_KEY));
        assert!(!id_col.has_constraint(Constraints::NOT_NULL));
        assert!(schema.get_column("unknown").is_none());
    }

    #[test]
    fn test_constraint_bits_and_rendering() {
        let flags = Constraints::PRIMARY_KEY | Constraints::UNIQUE;
        assert_eq!(flags.bits(), 5);
        assert_eq!(flags.to_string(), "PRIMARY KEY, UNIQUE");
        assert_eq!(Constraints::NONE.to_string(), "NONE");
        assert_eq!(Constraints::from_bits(7).to_string(), "PRIMARY KEY, NOT NULL, UNIQUE");
        assert_eq!(Constraints::from_keyword("NOTNULL"), Some(Constraints::NOT_NULL));
        assert_eq!(Constraints::from_keyword("notnull"), None);
    }

    #[test]
    fn test_contains_requires_every_bit() {
        let pk_unique = Constraints::PRIMARY_KEY | Constraints::UNIQUE;
        assert!(!Constraints::PRIMARY_KEY.contains(pk_unique));
        assert!(!Constraints::UNIQUE.contains(pk_unique));
        assert!(pk_unique.contains(Constraints::UNIQUE));
        assert!(Constraints::from_bits(7).contains(pk_unique));

        let column = Column::new("id", DataType::Int).constraints(Constraints::PRIMARY_KEY);
        assert!(!column.has_constraint(pk_unique));
    }

    #[test]
    fn test_add_column_assigns_position() {
        let mut schema = Schema::new();
        schema.add_column(Column::new("a", DataType::Int));
        let added = schema.add_column(Column::new("b", DataType::Text));
        assert_eq!(added.name, "b");
        assert_eq!(added.position, 1);
    }
}
