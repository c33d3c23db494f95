use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    sql::types::{Kind, Row, Value},
    storage::memory::MemoryRows,
};

/// A table: fixed schema and primary key, plus its rows
#[derive(Debug)]
pub struct Table {
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<Column>,
    pub primary_key: String,
    pub(crate) rows: MemoryRows,
}

impl Table {
    /// Builds an empty table after validating its schema
    pub fn new(name: String, columns: Vec<Column>, primary_key: String) -> Result<Self> {
        let table = Self {
            name,
            columns,
            primary_key,
            rows: MemoryRows::new(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Validates table schema
    pub fn validate(&self) -> Result<()> {
        if self.column_kind(&self.primary_key).is_none() {
            return Err(Error::PrimaryKeyNotDefined(self.name.clone()));
        }
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(Error::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(())
    }

    pub fn column_kind(&self, col_name: &str) -> Option<Kind> {
        self.columns
            .iter()
            .find(|c| c.name == col_name)
            .map(|c| c.kind)
    }

    /// Returns the kind of a column, error if the column doesn't exist
    pub fn must_get_column_kind(&self, col_name: &str) -> Result<Kind> {
        self.column_kind(col_name).ok_or_else(|| Error::UnknownColumn {
            table: self.name.clone(),
            column: col_name.to_string(),
        })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Extracts the primary key value from a row
    pub fn get_primary_key(&self, row: &Row) -> Result<Value> {
        match row.get(&self.primary_key) {
            Some(value) if !value.is_unset() => Ok(value.clone()),
            _ => Err(Error::MissingPrimaryKey(self.primary_key.clone())),
        }
    }

    /// Checks a value against the declared kind of a column
    pub fn check_kind(&self, col_name: &str, value: &Value) -> Result<()> {
        let expected = self.must_get_column_kind(col_name)?;
        match value.kind() {
            Some(kind) if kind != expected => Err(Error::TypeMismatch {
                column: col_name.to_string(),
                expected,
                found: value.kind_name().to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Column schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: Kind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}
