//! Command execution module
//!
//! This module contains the session context and the command executor.

pub mod executor;
pub mod session;

pub use executor::{ExecutionEngine, QueryResult};
pub use session::Session;
