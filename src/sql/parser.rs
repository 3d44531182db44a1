//! Command Parser
//!
//! Dispatch is on the leading keywords only: case-sensitive, exact matches.
//! Tokens past the ones a command needs are ignored.

use super::ast::*;
use super::lexer;
use crate::catalog::{Constraints, DataType};
use crate::error::{Error, Result};

/// Command Parser
pub struct Parser<'a> {
    line: &'a str,
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for one command line
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            tokens: lexer::tokenize(line),
            position: 0,
        }
    }

    /// Is the line blank?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Parse the command
    pub fn parse(&mut self) -> Result<Command> {
        match (self.peek(0), self.peek(1)) {
            (Some("CREATE"), Some("TABLE")) => self.parse_create_table(),
            (Some("INSERT"), Some("INTO")) => Ok(Command::Insert(self.parse_insert())),
            (Some("SELECT"), _) => self.parse_select(),
            (Some("SAVE"), Some("TO")) if self.peek(2) == Some("FILE") => Ok(Command::Save),
            (Some("LOAD"), Some("FROM")) if self.peek(2) == Some("FILE") => Ok(Command::Load),
            (Some("ADD"), Some("COLUMN")) => self.parse_add_column(),
            _ => Err(self.unknown()),
        }
    }

    // ========== Token Helpers ==========

    fn peek(&self, offset: usize) -> Option<&'a str> {
        self.tokens.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<&'a str> {
        let token = self.peek(0);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        match self.advance() {
            Some(token) if token == keyword => Ok(()),
            _ => Err(self.unknown()),
        }
    }

    fn expect_operand(&mut self) -> Result<&'a str> {
        self.advance().ok_or_else(|| self.unknown())
    }

    fn unknown(&self) -> Error {
        Error::UnknownCommand(self.line.trim().to_string())
    }

    // ========== Commands ==========

    fn parse_create_table(&mut self) -> Result<Command> {
        self.expect_keyword("CREATE")?;
        self.expect_keyword("TABLE")?;
        let name = self.expect_operand()?;
        Ok(Command::CreateTable {
            name: name.to_string(),
        })
    }

    fn parse_add_column(&mut self) -> Result<Command> {
        self.expect_keyword("ADD")?;
        self.expect_keyword("COLUMN")?;
        let name = self.expect_operand()?;
        let data_type = self.expect_operand()?;

        let mut constraints = Constraints::NONE;
        while let Some(token) = self.advance() {
            if let Some(flag) = Constraints::from_keyword(token) {
                constraints |= flag;
            }
        }

        Ok(Command::AddColumn(AddColumnCommand {
            name: name.to_string(),
            data_type: DataType::parse(data_type),
            constraints,
        }))
    }

    fn parse_insert(&mut self) -> InsertCommand {
        let table_name = self
            .peek(2)
            .filter(|token| *token != "VALUES")
            .map(str::to_string);

        let values = self
            .tokens
            .iter()
            .position(|token| *token == "VALUES")
            .map(|pos| lexer::parse_value_list(&self.tokens[pos + 1..]));

        self.position = self.tokens.len();
        InsertCommand { table_name, values }
    }

    fn parse_select(&mut self) -> Result<Command> {
        self.expect_keyword("SELECT")?;
        self.expect_keyword("*")?;
        self.expect_keyword("FROM")?;
        let table_name = self.expect_operand()?;
        Ok(Command::Select {
            table_name: table_name.to_string(),
        })
    }
}

/// Parse a single command line
pub fn parse_command(line: &str) -> Result<Command> {
    Parser::new(line).parse()
}
