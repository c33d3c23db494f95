use tracing::debug;

use crate::{
    error::Result,
    sql::{executor::{interpret, ResultSet}, parser},
    storage::Database,
};

/// SQL session for executing statements against one database
///
/// Lexical and syntax errors are returned before the catalog is touched.
pub struct Session<'a> {
    db: &'a Database,
}

impl<'a> Session<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Executes one complete SQL statement
    pub fn execute(&self, sql: &str) -> Result<ResultSet> {
        let stmt = parser::parse(sql)?;
        let result = interpret(self.db, stmt);
        if let Err(err) = &result {
            debug!(error = %err, "statement failed");
        }
        result
    }
}
