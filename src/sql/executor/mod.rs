use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Result,
    sql::{parser::ast::Statement, types::Row},
    storage::Database,
};

mod mutation;
mod query;
mod schema;

/// Applies one statement to the database
///
/// Every handler validates fully before mutating. CREATE, INSERT, DELETE
/// and DROP run under the exclusive lock, SELECT under the shared one.
pub fn interpret(db: &Database, stmt: Statement) -> Result<ResultSet> {
    debug!(table = stmt.table_name(), write = stmt.is_write(), "interpreting statement");
    match stmt {
        Statement::Create(s) => schema::create_table(&mut db.write(), s),
        Statement::Drop(s) => schema::drop_table(&mut db.write(), s),
        Statement::Insert(s) => mutation::insert(&mut db.write(), s),
        Statement::Delete(s) => mutation::delete(&mut db.write(), s),
        Statement::Select(s) => query::select(&db.read(), s),
    }
}

/// Execution result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultSet {
    CreateTable { table_name: String },
    DropTable { table_name: String },
    Insert { count: usize },
    Delete { count: usize },
    /// Query outcome: column names and one projection per row
    Scan { columns: Vec<String>, rows: Vec<Row> },
}

impl ResultSet {
    /// Acknowledgement text for mutations, None for queries
    pub fn message(&self) -> Option<String> {
        match self {
            ResultSet::CreateTable { .. } => Some("TABLE CREATED".to_string()),
            ResultSet::DropTable { .. } => Some("TABLE DROPPED".to_string()),
            ResultSet::Insert { count: 1 } => Some("1 ROW INSERTED".to_string()),
            ResultSet::Insert { count } => Some(format!("{} ROWS INSERTED", count)),
            ResultSet::Delete { count } => Some(format!("{} ROWS DELETED", count)),
            ResultSet::Scan { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::{interpret, ResultSet};
    use crate::{
        error::{Error, Result},
        sql::{
            parser::parse,
            types::{Row, Value},
        },
        storage::Database,
    };

    fn run(db: &Database, sql: &str) -> Result<ResultSet> {
        interpret(db, parse(sql)?)
    }

    #[test]
    fn test_messages() -> Result<()> {
        let db = Database::new();
        let created = run(&db, "create table t (id integer primary key, v string)")?;
        assert_eq!(created.message().as_deref(), Some("TABLE CREATED"));
        let inserted = run(&db, "insert into t (id, v) values (1, 'a')")?;
        assert_eq!(inserted.message().as_deref(), Some("1 ROW INSERTED"));
        let deleted = run(&db, "delete from t where id = 1")?;
        assert_eq!(deleted.message().as_deref(), Some("1 ROWS DELETED"));
        assert_eq!(run(&db, "select * from t")?.message(), None);
        let dropped = run(&db, "drop table t")?;
        assert_eq!(dropped.message().as_deref(), Some("TABLE DROPPED"));
        Ok(())
    }

    #[test]
    fn test_errors_leave_engine_usable() -> Result<()> {
        let db = Database::new();
        run(&db, "create table t (id integer primary key, v string)")?;
        assert!(matches!(
            run(&db, "insert into t (id, v) values (1, 2)"),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            run(&db, "select * from missing"),
            Err(Error::UnknownTable(_))
        ));
        run(&db, "insert into t (id, v) values (1, 'ok')")?;
        assert_eq!(db.row_count("t")?, 1);
        Ok(())
    }

    #[test]
    fn test_concurrent_select_never_sees_partial_row() -> Result<()> {
        let db = Database::new();
        run(&db, "create table t (id integer primary key, a string, b float, c boolean)")?;

        let db = &db;
        thread::scope(|s| {
            let writer = s.spawn(move || -> Result<()> {
                for i in 0..200 {
                    run(
                        db,
                        &format!("insert into t (id, a, b, c) values ({}, 'row', 1.5, true)", i),
                    )?;
                }
                Ok(())
            });

            let readers: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(move || -> Result<()> {
                        for _ in 0..50 {
                            let ResultSet::Scan { rows, .. } = run(db, "select * from t")? else {
                                panic!("expected scan result");
                            };
                            for row in rows {
                                assert_full_row(&row);
                            }
                        }
                        Ok(())
                    })
                })
                .collect();

            writer.join().expect("writer panicked")?;
            for reader in readers {
                reader.join().expect("reader panicked")?;
            }
            Ok::<(), Error>(())
        })?;

        assert_eq!(db.row_count("t")?, 200);
        Ok(())
    }

    fn assert_full_row(row: &Row) {
        assert_eq!(row.len(), 4);
        assert_eq!(row.get("a"), Some(&Value::String("row".to_string())));
        assert_eq!(row.get("b"), Some(&Value::Float(1.5)));
        assert_eq!(row.get("c"), Some(&Value::Boolean(true)));
    }
}
