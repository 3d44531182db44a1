//! Command Lexer
//!
//! Commands are split on whitespace. The parenthesized value list of an
//! INSERT goes through its own quote-aware splitter.

/// Split a command line into whitespace-separated tokens
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Remove one leading `(` and one trailing `)` if present
pub fn strip_parens(list: &str) -> &str {
    let list = list.strip_prefix('(').unwrap_or(list);
    list.strip_suffix(')').unwrap_or(list)
}

/// Split a comma-separated value list into fields.
///
/// A single quote toggles quoting and is dropped from the output; commas
/// inside quotes are kept. Whitespace is never trimmed. Empty fields are
/// dropped, including `''`.
pub fn split_values(list: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in list.chars() {
        match ch {
            '\'' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                if !current.is_empty() {
                    values.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        values.push(current);
    }

    values
}

/// Tokenize the value list of an INSERT, given the tokens after `VALUES`.
///
/// Tokens are re-joined with single spaces, so runs of whitespace inside the
/// list collapse.
pub fn parse_value_list(tokens: &[&str]) -> Vec<String> {
    let joined = tokens.join(" ");
    split_values(strip_parens(&joined))
}
