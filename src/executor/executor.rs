//! Command Executor for TableDB
//!
//! This module dispatches parsed commands to catalog and table operations
//! and turns their outcome into status lines.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use super::session::Session;
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::{Error, FileMode, Result};
use crate::sql::{AddColumnCommand, Command, InsertCommand, Parser};

/// Command result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Output lines
    pub lines: Vec<String>,
    /// Number of affected rows (for INSERT)
    pub affected_rows: usize,
}

impl QueryResult {
    /// Create a new empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a result with a single message line
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            lines: vec![message.into()],
            affected_rows: 0,
        }
    }

    /// Create a result with affected rows count
    pub fn with_affected_rows(count: usize, message: impl Into<String>) -> Self {
        Self {
            lines: vec![message.into()],
            affected_rows: count,
        }
    }

    /// Create a result from rendered output lines
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            affected_rows: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// Execution engine: the catalog, the session and the command dispatcher
#[derive(Debug, Default)]
pub struct ExecutionEngine {
    catalog: Catalog,
    session: Session,
    config: EngineConfig,
}

impl ExecutionEngine {
    /// Create an engine with an empty catalog
    pub fn new(config: EngineConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            session: Session::new(),
            config,
        }
    }

    /// Get the catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute one line of command text. Blank lines are a no-op.
    pub fn execute(&mut self, line: &str) -> Result<QueryResult> {
        let mut parser = Parser::new(line);
        if parser.is_empty() {
            return Ok(QueryResult::empty());
        }

        let command = parser.parse()?;
        debug!(?command, "executing");
        self.execute_command(command)
    }

    /// Execute a parsed command
    pub fn execute_command(&mut self, command: Command) -> Result<QueryResult> {
        let catalog = &mut self.catalog;
        let session = &mut self.session;

        match command {
            Command::CreateTable { name } => Ok(create_table(catalog, session, &name)),
            Command::AddColumn(cmd) => add_column(catalog, session, cmd),
            Command::Insert(cmd) => insert(catalog, session, cmd),
            Command::Select { table_name } => {
                select_all(catalog, &table_name, self.config.column_width)
            }
            Command::Save => save_to_file(catalog, &self.config.data_file),
            Command::Load => load_from_file(catalog, session, &self.config.data_file),
        }
    }
}

fn create_table(catalog: &mut Catalog, session: &mut Session, name: &str) -> QueryResult {
    let id = catalog.create_table(name);
    session.select(id);
    QueryResult::with_message(format!("Table {} created successfully.", name))
}

fn add_column(
    catalog: &mut Catalog,
    session: &Session,
    cmd: AddColumnCommand,
) -> Result<QueryResult> {
    let table = session.current_mut(catalog)?;
    let column = table.add_column(cmd.name, cmd.data_type, cmd.constraints);
    Ok(QueryResult::with_message(format!(
        "Column {} added successfully.",
        column.name
    )))
}

fn insert(catalog: &mut Catalog, session: &Session, cmd: InsertCommand) -> Result<QueryResult> {
    let table = session.current_mut(catalog)?;
    let values = cmd.values.ok_or(Error::InvalidInsertSyntax)?;

    if let Some(named) = cmd.table_name.as_deref() {
        if named != table.name() {
            debug!(
                named,
                current = table.name(),
                "INSERT names another table; using the current table"
            );
        }
    }

    table.insert_row(values)?;
    Ok(QueryResult::with_affected_rows(1, "Record inserted."))
}

fn select_all(catalog: &Catalog, table_name: &str, column_width: usize) -> Result<QueryResult> {
    let table = catalog
        .get_table(table_name)
        .ok_or_else(|| Error::TableNotFound(table_name.to_string()))?;
    Ok(QueryResult::from_lines(
        table.select_all(column_width).lines().collect(),
    ))
}

fn save_to_file(catalog: &Catalog, path: &Path) -> Result<QueryResult> {
    let file = File::create(path).map_err(|source| Error::FileOpenFailure {
        path: path.to_path_buf(),
        mode: FileMode::Writing,
        source,
    })?;

    let mut out = BufWriter::new(file);
    catalog.save(&mut out)?;
    out.flush()?;

    info!(path = %path.display(), tables = catalog.len(), "database saved");
    Ok(QueryResult::with_message(format!(
        "Database saved to {}",
        path.display()
    )))
}

fn load_from_file(catalog: &mut Catalog, session: &mut Session, path: &Path) -> Result<QueryResult> {
    // The catalog is only cleared once the file is known to be readable.
    let file = File::open(path).map_err(|source| Error::FileOpenFailure {
        path: path.to_path_buf(),
        mode: FileMode::Reading,
        source,
    })?;

    catalog.clear();
    session.reset();

    let loaded = catalog.load(BufReader::new(file))?;
    info!(path = %path.display(), tables = loaded.len(), "database loaded");

    let mut lines: Vec<String> = loaded
        .iter()
        .map(|table| format!("Table {} loaded successfully.", table.name))
        .collect();
    lines.push(format!("Database loaded from {}", path.display()));
    Ok(QueryResult::from_lines(lines))
}
