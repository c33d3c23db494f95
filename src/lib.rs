//! SimpleDB - an embedded SQL-like interpreter over an in-memory row store
//!
//! This crate provides:
//! - SQL tokenizing and parsing into a fixed set of statement forms
//! - An interpreter that validates statements before applying them
//! - A schema-enforced, primary-key keyed in-memory catalog guarded by one lock

pub mod error;
pub mod sql;
pub mod storage;

pub use error::{Error, ErrorKind, Result};
pub use sql::engine::Session;
pub use sql::executor::{interpret, ResultSet};
pub use storage::Database;
