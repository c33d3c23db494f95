use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{Error, Result};
use crate::sql::parser::ast::{
    CreateStatement, DeleteStatement, DropStatement, InsertStatement, InsertValues, Operator,
    SelectStatement, Statement, WhereClause,
};
use crate::sql::parser::lexer::{Keyword, Token};
use crate::sql::schema::Column;
use crate::sql::types::{Kind, Value};

pub mod ast;
pub mod lexer;

/// SQL Parser - Converts one statement's tokens into a [`Statement`]
///
/// The parser owns a cursor over the token slice and never backtracks.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

/// Tokenizes and parses one statement's text
pub fn parse(sql: &str) -> Result<Statement> {
    let tokens = lexer::tokenize(sql)?;
    Parser::new(&tokens).parse()
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Parses the tokens into exactly one statement
    pub fn parse(&mut self) -> Result<Statement> {
        let stmt = self.parse_statement()?;
        // optional terminator, nothing after it
        self.next_if_token(&Token::Semicolon);
        if let Some(token) = self.peek() {
            return Err(self.error(format!("unexpected token {} after end of statement", token)));
        }
        trace!(table = stmt.table_name(), "parsed statement");
        Ok(stmt)
    }

    /// Parses a statement based on the first token
    fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Some(Token::Keyword(Keyword::Create)) => self.parse_create(),
            Some(Token::Keyword(Keyword::Select)) => self.parse_select(),
            Some(Token::Keyword(Keyword::Insert)) => self.parse_insert(),
            Some(Token::Keyword(Keyword::Delete)) => self.parse_delete(),
            Some(Token::Keyword(Keyword::Drop)) => self.parse_drop(),
            _ => Err(self.unexpected("one of CREATE, SELECT, INSERT, DELETE, DROP")),
        }
    }

    /// Parses CREATE TABLE statement
    fn parse_create(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Create))?;
        self.next_expect(Token::Keyword(Keyword::Table))?;
        let table_name = self.next_ident()?;
        self.next_expect(Token::OpenParen)?;

        let mut columns: Vec<Column> = Vec::new();
        let mut primary_key: Option<String> = None;
        loop {
            let (column, is_primary) = self.parse_column()?;
            if columns.iter().any(|c| c.name == column.name) {
                return Err(Error::DuplicateColumn(column.name));
            }
            if is_primary {
                if let Some(first) = primary_key {
                    return Err(Error::DuplicatePrimaryKey {
                        first,
                        second: column.name,
                    });
                }
                primary_key = Some(column.name.clone());
            }
            columns.push(column);
            if !self.next_if_token(&Token::Comma) {
                break;
            }
        }
        self.next_expect(Token::CloseParen)?;

        let primary_key = primary_key.ok_or_else(|| Error::PrimaryKeyNotDefined(table_name.clone()))?;
        Ok(Statement::Create(CreateStatement {
            table_name,
            columns,
            primary_key,
        }))
    }

    /// Parses `name kind [PRIMARY KEY]`
    fn parse_column(&mut self) -> Result<(Column, bool)> {
        let name = self.next_ident()?;
        let kind_name = self.next_ident()?;
        let kind = Kind::from_name(&kind_name).ok_or(Error::UnknownKind(kind_name))?;

        let is_primary = self.next_if_token(&Token::Keyword(Keyword::Primary));
        if is_primary {
            self.next_expect(Token::Keyword(Keyword::Key))?;
        }
        Ok((Column { name, kind }, is_primary))
    }

    /// Parses SELECT statement
    fn parse_select(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Select))?;

        let mut columns = Vec::new();
        if !self.next_if_token(&Token::Asterisk) {
            loop {
                columns.push(self.next_ident()?);
                if !self.next_if_token(&Token::Comma) {
                    break;
                }
            }
        }

        self.next_expect(Token::Keyword(Keyword::From))?;
        let table_name = self.next_ident()?;
        let where_clause = if self.next_if_token(&Token::Keyword(Keyword::Where)) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };

        Ok(Statement::Select(SelectStatement {
            table_name,
            columns,
            where_clause,
        }))
    }

    /// Parses INSERT statement
    fn parse_insert(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Insert))?;
        self.next_expect(Token::Keyword(Keyword::Into))?;
        let table_name = self.next_ident()?;

        // Check if specific columns are specified
        let columns = if self.next_if_token(&Token::OpenParen) {
            let mut cols = Vec::new();
            loop {
                cols.push(self.next_ident()?);
                if !self.next_if_token(&Token::Comma) {
                    break;
                }
            }
            self.next_expect(Token::CloseParen)?;
            Some(cols)
        } else {
            None
        };

        self.next_expect_word("VALUES")?;
        self.next_expect(Token::OpenParen)?;
        let mut values = Vec::new();
        loop {
            values.push(self.parse_literal()?);
            if !self.next_if_token(&Token::Comma) {
                break;
            }
        }
        self.next_expect(Token::CloseParen)?;

        let values = match columns {
            Some(columns) => {
                if columns.len() != values.len() {
                    return Err(Error::ColumnCountMismatch {
                        columns: columns.len(),
                        values: values.len(),
                    });
                }
                let mut named = BTreeMap::new();
                for (column, value) in columns.into_iter().zip(values) {
                    if named.contains_key(&column) {
                        return Err(Error::DuplicateColumn(column));
                    }
                    named.insert(column, value);
                }
                InsertValues::Named(named)
            }
            None => InsertValues::Positional(values),
        };

        Ok(Statement::Insert(InsertStatement { table_name, values }))
    }

    /// Parses DELETE statement, WHERE is mandatory
    fn parse_delete(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Delete))?;
        self.next_expect(Token::Keyword(Keyword::From))?;
        let table_name = self.next_ident()?;
        self.next_expect(Token::Keyword(Keyword::Where))?;
        let where_clause = self.parse_where_clause()?;
        Ok(Statement::Delete(DeleteStatement {
            table_name,
            where_clause,
        }))
    }

    /// Parses DROP TABLE statement
    fn parse_drop(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Drop))?;
        self.next_expect(Token::Keyword(Keyword::Table))?;
        let table_name = self.next_ident()?;
        Ok(Statement::Drop(DropStatement { table_name }))
    }

    /// Parses `column = literal` (the WHERE keyword is already consumed)
    fn parse_where_clause(&mut self) -> Result<WhereClause> {
        let column = self.next_ident()?;
        self.next_expect(Token::Equal)?;
        let value = self.parse_literal()?;
        Ok(WhereClause {
            column,
            operator: Operator::Equal,
            value,
        })
    }

    fn parse_literal(&mut self) -> Result<Value> {
        let value = match self.peek() {
            Some(Token::String(s)) => Value::String(s.clone()),
            Some(Token::Integer(n)) => Value::Integer(*n),
            Some(Token::Float(n)) => Value::Float(*n),
            Some(Token::Boolean(b)) => Value::Boolean(*b),
            _ => return Err(self.unexpected("literal")),
        };
        self.pos += 1;
        Ok(value)
    }

    /// Peeks at the next token
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Expects and consumes an identifier
    fn next_ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(Token::Ident(ident)) => {
                self.pos += 1;
                Ok(ident.clone())
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Expects a specific token, returns error if different
    fn next_expect(&mut self, expect: Token) -> Result<()> {
        if self.next_if_token(&expect) {
            return Ok(());
        }
        Err(self.unexpected(&expect.to_string()))
    }

    /// Expects an unreserved word, matched case-insensitively
    fn next_expect_word(&mut self, word: &str) -> Result<()> {
        match self.peek() {
            Some(Token::Ident(ident)) if ident.eq_ignore_ascii_case(word) => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.unexpected(word)),
        }
    }

    /// Consumes next token if it matches the given token
    fn next_if_token(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(token) => self.error(format!("expected {}, got {}", expected, token)),
            None => self.error(format!("expected {}, got end of input", expected)),
        }
    }

    fn error(&self, message: String) -> Error {
        Error::Syntax {
            position: self.pos,
            message,
        }
    }
}
