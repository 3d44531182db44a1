//! Engine configuration for TableDB

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default database file
pub const DEFAULT_DATA_FILE: &str = "database.txt";

/// Default `SELECT *` column width
pub const DEFAULT_COLUMN_WIDTH: usize = 15;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// File used by SAVE TO FILE / LOAD FROM FILE
    pub data_file: PathBuf,
    /// Width each column is left-justified to in `SELECT *` output
    pub column_width: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Set the column width
    pub fn column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    /// Load a config from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }
}
