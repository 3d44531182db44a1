//! Flat-file database format
//!
//! ```text
//! TABLE <tableName>
//! <colName> <colType> <constraintBits>
//! DATA
//! <field> <field> ...
//! END
//! ```

use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{digit1, space0, space1},
    combinator::{map, map_res, opt, rest},
    sequence::{preceded, tuple},
    IResult,
};

use crate::catalog::{Constraints, DataType};

/// Prefix of the line opening a table block
pub const TABLE_PREFIX: &str = "TABLE ";
/// Marker between column definitions and data lines
pub const DATA_MARKER: &str = "DATA";
/// Marker closing a table block
pub const END_MARKER: &str = "END";

/// A parsed `<name> <type> <bits>` line
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLine {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Constraints,
}

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace())(input)
}

fn bits(input: &str) -> IResult<&str, u32> {
    alt((map_res(digit1, str::parse::<u32>), map(rest, |_| 0u32)))(input)
}

fn column_line(input: &str) -> IResult<&str, ColumnLine> {
    map(
        tuple((
            preceded(space0, word),
            opt(preceded(space1, word)),
            opt(preceded(space1, bits)),
        )),
        |(name, data_type, bits)| ColumnLine {
            name: name.to_string(),
            data_type: DataType::parse(data_type.unwrap_or("")),
            constraints: Constraints::from_bits(bits.unwrap_or(0)),
        },
    )(input)
}

/// Parse a column definition line.
///
/// Parsing is lenient: a missing type becomes an empty tag and missing or
/// non-numeric constraint bits become 0. Returns `None` only for blank lines.
pub fn parse_column_line(line: &str) -> Option<ColumnLine> {
    column_line(line).ok().map(|(_, column)| column)
}

/// Split a data line into its fields
pub fn parse_data_line(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Drop a trailing carriage return left by files edited on Windows
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_column_line() {
        let column = parse_column_line("id int 3").unwrap();
        assert_eq!(column.name, "id");
        assert_eq!(column.data_type, DataType::Int);
        assert_eq!(column.constraints, Constraints::PRIMARY_KEY | Constraints::NOT_NULL);
    }

    #[test]
    fn test_parse_lenient_column_lines() {
        let column = parse_column_line("name").unwrap();
        assert_eq!(column.data_type, DataType::Other(String::new()));
        assert!(column.constraints.is_empty());

        let column = parse_column_line("name text x").unwrap();
        assert_eq!(column.data_type, DataType::Text);
        assert!(column.constraints.is_empty());

        assert!(parse_column_line("").is_none());
        assert!(parse_column_line("   ").is_none());
    }

    #[test]
    fn test_parse_data_line() {
        assert_eq!(parse_data_line("1  Alice\tx"), vec!["1", "Alice", "x"]);
        assert!(parse_data_line("   ").is_empty());
        assert_eq!(strip_line_ending("DATA\r"), "DATA");
    }
}
