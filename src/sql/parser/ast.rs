use std::collections::BTreeMap;

use crate::sql::{
    schema::Column,
    types::{Row, Value},
};

/// Statement forms produced by the parser
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Create(CreateStatement),
    Select(SelectStatement),
    Insert(InsertStatement),
    Delete(DeleteStatement),
    Drop(DropStatement),
}

impl Statement {
    /// Table the statement operates on
    pub fn table_name(&self) -> &str {
        match self {
            Statement::Create(s) => &s.table_name,
            Statement::Select(s) => &s.table_name,
            Statement::Insert(s) => &s.table_name,
            Statement::Delete(s) => &s.table_name,
            Statement::Drop(s) => &s.table_name,
        }
    }

    /// Whether the statement mutates the catalog
    pub fn is_write(&self) -> bool {
        !matches!(self, Statement::Select(_))
    }
}

/// CREATE TABLE name ( col kind [PRIMARY KEY], ... )
#[derive(Debug, Clone, PartialEq)]
pub struct CreateStatement {
    pub table_name: String,
    /// Columns in declaration order
    pub columns: Vec<Column>,
    pub primary_key: String,
}

/// SELECT (* | col, ...) FROM name [WHERE col = literal]
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub table_name: String,
    /// Requested columns, empty for `*`
    pub columns: Vec<String>,
    pub where_clause: Option<WhereClause>,
}

/// INSERT INTO name [( col, ... )] VALUES ( literal, ... )
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table_name: String,
    pub values: InsertValues,
}

/// Values supplied by an INSERT
#[derive(Debug, Clone, PartialEq)]
pub enum InsertValues {
    /// Column list given: column name to value
    Named(BTreeMap<String, Value>),
    /// No column list: values in the table's declaration order
    Positional(Vec<Value>),
}

/// DELETE FROM name WHERE col = literal
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table_name: String,
    pub where_clause: WhereClause,
}

/// DROP TABLE name
#[derive(Debug, Clone, PartialEq)]
pub struct DropStatement {
    pub table_name: String,
}

/// Filter of the form `column = literal`
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
}

impl WhereClause {
    /// Whether a stored row satisfies the clause (structural equality)
    pub fn matches(&self, row: &Row) -> bool {
        match self.operator {
            Operator::Equal => row.get(&self.column) == Some(&self.value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
}
