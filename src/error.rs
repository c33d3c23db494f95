use std::num::{ParseFloatError, ParseIntError};

use bincode::ErrorKind as BincodeError;
use thiserror::Error;

use crate::sql::types::Kind;

/// Custom Result type for SimpleDB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for SimpleDB
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Statement text could not be tokenized
    #[error("lexical error: {0}")]
    Lex(String),

    /// Token sequence does not match any statement grammar
    #[error("syntax error at token {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("primary key not defined for table {0}")]
    PrimaryKeyNotDefined(String),

    #[error("duplicate primary key: {first} and {second}")]
    DuplicatePrimaryKey { first: String, second: String },

    #[error("column {0} is given more than once")]
    DuplicateColumn(String),

    #[error("unsupported kind {0}")]
    UnknownKind(String),

    #[error("number of columns ({columns}) not equal to number of values ({values})")]
    ColumnCountMismatch { columns: usize, values: usize },

    /// Positional INSERT whose value count differs from the table's columns
    #[error("table {table} has {columns} columns but {values} values were given")]
    ValueCountMismatch {
        table: String,
        columns: usize,
        values: usize,
    },

    #[error("table {0} already exists")]
    TableAlreadyExists(String),

    #[error("table {0} does not exist")]
    UnknownTable(String),

    #[error("column {column} does not exist in table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("primary key {0} is not given")]
    MissingPrimaryKey(String),

    #[error("invalid type for column {column}: expected {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: Kind,
        found: String,
    },

    /// Internal error (key encoding, invariant breakage)
    #[error("internal error {0}")]
    Internal(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Schema,
    Storage,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lex(_) => ErrorKind::Lexical,
            Error::Syntax { .. }
            | Error::DuplicatePrimaryKey { .. }
            | Error::DuplicateColumn(_)
            | Error::UnknownKind(_)
            | Error::ColumnCountMismatch { .. } => ErrorKind::Syntax,
            Error::PrimaryKeyNotDefined(_)
            | Error::TableAlreadyExists(_)
            | Error::UnknownTable(_)
            | Error::UnknownColumn { .. }
            | Error::ValueCountMismatch { .. } => ErrorKind::Schema,
            Error::MissingPrimaryKey(_) | Error::TypeMismatch { .. } => ErrorKind::Storage,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<ParseIntError> for Error {
    fn from(value: ParseIntError) -> Self {
        Error::Lex(value.to_string())
    }
}

impl From<ParseFloatError> for Error {
    fn from(value: ParseFloatError) -> Self {
        Error::Lex(value.to_string())
    }
}

impl From<Box<BincodeError>> for Error {
    fn from(value: Box<BincodeError>) -> Self {
        Error::Internal(value.to_string())
    }
}
