//! Column type tags for TableDB
//!
//! Values are always stored as text. A type tag only matters while an insert
//! is validated, and only `int` is enforced.

use std::fmt;

/// Declared column type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// `int`: every character must be an ASCII digit or `-`
    Int,
    /// `text`: anything goes
    Text,
    /// Any other tag, kept verbatim and never enforced
    Other(String),
}

impl DataType {
    /// Interpret a type tag as written in a command or data file.
    /// Tags are case-sensitive.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "int" => DataType::Int,
            "text" => DataType::Text,
            other => DataType::Other(other.to_string()),
        }
    }

    /// Check whether a raw field value is acceptable for this type.
    ///
    /// The integer check is deliberately loose: `"--1"` and `""` both pass.
    pub fn accepts(&self, value: &str) -> bool {
        if !self.is_enforced() {
            return true;
        }
        value.chars().all(|c| c.is_ascii_digit() || c == '-')
    }

    /// Is this tag enforced during insert validation?
    pub fn is_enforced(&self) -> bool {
        matches!(self, DataType::Int)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "int"),
            DataType::Text => write!(f, "text"),
            DataType::Other(tag) => write!(f, "{}", tag),
        }
    }
}
