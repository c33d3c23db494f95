use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    sql::{
        executor::ResultSet,
        parser::ast::{DeleteStatement, InsertStatement, InsertValues, WhereClause},
        schema::Table,
        types::{Row, Value},
    },
    storage::Catalog,
};

// Positional values line up with the declared columns:
// tbl (a, b, c)
// insert into tbl values (1, 2, 3);
//    a       b       c
//    1       2       3
fn resolve_values(table: &Table, values: InsertValues) -> Result<BTreeMap<String, Value>> {
    match values {
        InsertValues::Named(named) => Ok(named),
        InsertValues::Positional(values) => {
            if values.len() != table.columns.len() {
                return Err(Error::ValueCountMismatch {
                    table: table.name.clone(),
                    columns: table.columns.len(),
                    values: values.len(),
                });
            }
            Ok(table
                .columns
                .iter()
                .map(|c| c.name.clone())
                .zip(values)
                .collect())
        }
    }
}

// Builds the stored row, columns not given stay unset:
// tbl (a, b, c)
// insert into tbl (c, a) values (2, 1);
//    a       b       c
//    1     unset     2
fn make_row(table: &Table, supplied: BTreeMap<String, Value>) -> Result<Row> {
    if supplied
        .get(&table.primary_key)
        .is_none_or(|value| value.is_unset())
    {
        return Err(Error::MissingPrimaryKey(table.primary_key.clone()));
    }
    for (col_name, value) in supplied.iter() {
        table.check_kind(col_name, value)?;
    }

    let mut row: Row = table
        .columns
        .iter()
        .map(|c| (c.name.clone(), Value::Unset))
        .collect();
    row.extend(supplied);
    Ok(row)
}

/// Checks a WHERE clause against the table schema
pub(super) fn check_where_clause(table: &Table, where_clause: &WhereClause) -> Result<()> {
    let expected = table.must_get_column_kind(&where_clause.column)?;
    if where_clause.value.kind() != Some(expected) {
        return Err(Error::TypeMismatch {
            column: where_clause.column.clone(),
            expected,
            found: where_clause.value.kind_name().to_string(),
        });
    }
    Ok(())
}

/// INSERT, replacing any row with the same primary key
pub fn insert(catalog: &mut Catalog, stmt: InsertStatement) -> Result<ResultSet> {
    let table = catalog.must_get_table_mut(&stmt.table_name)?;
    let supplied = resolve_values(table, stmt.values)?;
    let row = make_row(table, supplied)?;
    let key = table.get_primary_key(&row)?;

    if table.rows.upsert(&key, row)?.is_some() {
        warn!(table = %table.name, key = %key, "insert replaced an existing row");
    }
    debug!(table = %table.name, key = %key, "row inserted");
    Ok(ResultSet::Insert { count: 1 })
}

/// DELETE, removing every row whose column equals the literal
pub fn delete(catalog: &mut Catalog, stmt: DeleteStatement) -> Result<ResultSet> {
    let table = catalog.must_get_table_mut(&stmt.table_name)?;
    check_where_clause(table, &stmt.where_clause)?;

    let count = table.rows.delete_where(|row| stmt.where_clause.matches(row));
    debug!(table = %table.name, count, "rows deleted");
    Ok(ResultSet::Delete { count })
}

#[cfg(test)]
mod tests {
    use super::{delete, insert};
    use crate::{
        error::{Error, Result},
        sql::{
            executor::{ResultSet, schema::create_table},
            parser::{ast::Statement, parse},
            types::Value,
        },
        storage::Catalog,
    };

    fn setup(sql: &str) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        let Statement::Create(stmt) = parse(sql)? else {
            panic!("expected CREATE");
        };
        create_table(&mut catalog, stmt)?;
        Ok(catalog)
    }

    fn run_insert(catalog: &mut Catalog, sql: &str) -> Result<ResultSet> {
        let Statement::Insert(stmt) = parse(sql)? else {
            panic!("expected INSERT");
        };
        insert(catalog, stmt)
    }

    fn run_delete(catalog: &mut Catalog, sql: &str) -> Result<ResultSet> {
        let Statement::Delete(stmt) = parse(sql)? else {
            panic!("expected DELETE");
        };
        delete(catalog, stmt)
    }

    #[test]
    fn test_insert_type_mismatch() -> Result<()> {
        let mut catalog = setup("create table t (id integer primary key, v string)")?;
        assert_eq!(
            run_insert(&mut catalog, "insert into t (id, v) values (1, 2)"),
            Err(Error::TypeMismatch {
                column: "v".to_string(),
                expected: crate::sql::types::Kind::String,
                found: "integer".to_string(),
            })
        );
        assert_eq!(catalog.must_get_table("t")?.rows.len(), 0);
        Ok(())
    }

    #[test]
    fn test_insert_validation() -> Result<()> {
        let mut catalog = setup("create table t (id integer primary key, v string)")?;
        assert_eq!(
            run_insert(&mut catalog, "insert into t (v) values ('a')"),
            Err(Error::MissingPrimaryKey("id".to_string()))
        );
        assert!(matches!(
            run_insert(&mut catalog, "insert into t (id, x) values (1, 'a')"),
            Err(Error::UnknownColumn { .. })
        ));
        // no coercion from integer to float
        let mut floats = setup("create table f (id integer primary key, x float)")?;
        assert!(matches!(
            run_insert(&mut floats, "insert into f (id, x) values (1, 2)"),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            run_insert(&mut catalog, "insert into missing (id) values (1)"),
            Err(Error::UnknownTable(_))
        ));
        assert_eq!(catalog.must_get_table("t")?.rows.len(), 0);
        Ok(())
    }

    #[test]
    fn test_insert_upsert() -> Result<()> {
        let mut catalog = setup("create table t (id integer primary key, v string, n integer)")?;
        run_insert(&mut catalog, "insert into t (id, v, n) values (1, 'first', 10)")?;
        assert_eq!(
            run_insert(&mut catalog, "insert into t (id, v) values (1, 'second')")?,
            ResultSet::Insert { count: 1 }
        );

        let table = catalog.must_get_table("t")?;
        assert_eq!(table.rows.len(), 1);
        let row = table.rows.get(&Value::Integer(1))?.expect("row 1 missing");
        assert_eq!(row.get("v"), Some(&Value::String("second".to_string())));
        // the whole row is replaced, not merged
        assert_eq!(row.get("n"), Some(&Value::Unset));
        Ok(())
    }

    #[test]
    fn test_insert_positional() -> Result<()> {
        let mut catalog = setup("create table t (id integer primary key, v string)")?;
        run_insert(&mut catalog, "insert into t values (5, 'five')")?;
        let row = catalog
            .must_get_table("t")?
            .rows
            .get(&Value::Integer(5))?
            .cloned()
            .expect("row 5 missing");
        assert_eq!(row.get("v"), Some(&Value::String("five".to_string())));

        assert_eq!(
            run_insert(&mut catalog, "insert into t values (6)"),
            Err(Error::ValueCountMismatch {
                table: "t".to_string(),
                columns: 2,
                values: 1
            })
        );
        Ok(())
    }

    #[test]
    fn test_delete() -> Result<()> {
        let mut catalog = setup("create table t (id integer primary key, v string)")?;
        run_insert(&mut catalog, "insert into t (id, v) values (1, 'a')")?;
        run_insert(&mut catalog, "insert into t (id, v) values (2, 'a')")?;
        run_insert(&mut catalog, "insert into t (id, v) values (3, 'b')")?;

        assert_eq!(
            run_delete(&mut catalog, "delete from t where id = 1")?,
            ResultSet::Delete { count: 1 }
        );
        assert_eq!(
            run_delete(&mut catalog, "delete from t where id = 1")?,
            ResultSet::Delete { count: 0 }
        );
        assert_eq!(
            run_delete(&mut catalog, "delete from t where v = 'a'")?,
            ResultSet::Delete { count: 1 }
        );
        assert_eq!(catalog.must_get_table("t")?.rows.len(), 1);
        Ok(())
    }

    #[test]
    fn test_delete_validation() -> Result<()> {
        let mut catalog = setup("create table t (id integer primary key, v string)")?;
        run_insert(&mut catalog, "insert into t (id, v) values (1, 'a')")?;
        assert!(matches!(
            run_delete(&mut catalog, "delete from t where id = 'a'"),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            run_delete(&mut catalog, "delete from t where nope = 1"),
            Err(Error::UnknownColumn { .. })
        ));
        assert!(matches!(
            run_delete(&mut catalog, "delete from missing where id = 1"),
            Err(Error::UnknownTable(_))
        ));
        assert_eq!(catalog.must_get_table("t")?.rows.len(), 1);
        Ok(())
    }

    #[test]
    fn test_delete_skips_unset_fields() -> Result<()> {
        let mut catalog = setup("create table t (id integer primary key, v string)")?;
        run_insert(&mut catalog, "insert into t (id) values (1)")?;
        assert_eq!(
            run_delete(&mut catalog, "delete from t where v = 'x'")?,
            ResultSet::Delete { count: 0 }
        );
        assert_eq!(
            run_delete(&mut catalog, "delete from t where v = ''")?,
            ResultSet::Delete { count: 0 }
        );
        assert_eq!(catalog.must_get_table("t")?.rows.len(), 1);
        Ok(())
    }
}
