//! TableDB - A minimal in-process relational table store
//!
//! This library provides:
//! - A catalog of named tables with typed, constrained columns
//! - Row insertion with arity, type and constraint checks
//! - A fixed command vocabulary (lexer, parser, executor)
//! - Flat-file persistence of the whole catalog

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod sql;
pub mod storage;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use executor::{ExecutionEngine, QueryResult, Session};
