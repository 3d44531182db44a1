//! Records for TableDB
//!
//! A record is an ordered list of text fields. Fields are never typed at rest.

use std::fmt;

/// A row of field values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    /// Create a record from its field values
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Field value at `index`, or the empty string when out of range
    pub fn get(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    /// All field values in column order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Space-joined fields, the data-line format of the database file
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values.join(" "))
    }
}
