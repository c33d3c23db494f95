use tracing::debug;

use crate::{
    error::Result,
    sql::{
        executor::{ResultSet, mutation::check_where_clause},
        parser::ast::SelectStatement,
        types::{Row, Value},
    },
    storage::Catalog,
};

/// SELECT, projecting every matching row onto the requested columns
///
/// Rows come back in storage order; callers must not rely on it.
pub fn select(catalog: &Catalog, stmt: SelectStatement) -> Result<ResultSet> {
    let table = catalog.must_get_table(&stmt.table_name)?;

    // `*` expands to every column in declaration order
    let columns = if stmt.columns.is_empty() {
        table.column_names()
    } else {
        for column in stmt.columns.iter() {
            table.must_get_column_kind(column)?;
        }
        stmt.columns
    };
    if let Some(where_clause) = &stmt.where_clause {
        check_where_clause(table, where_clause)?;
    }

    let rows: Vec<Row> = table
        .rows
        .iter()
        .filter(|row| stmt.where_clause.as_ref().is_none_or(|w| w.matches(row)))
        .map(|row| {
            columns
                .iter()
                .map(|c| (c.clone(), row.get(c).cloned().unwrap_or(Value::Unset)))
                .collect()
        })
        .collect();

    debug!(table = %table.name, rows = rows.len(), "rows selected");
    Ok(ResultSet::Scan { columns, rows })
}
