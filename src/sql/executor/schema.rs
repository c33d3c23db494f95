use tracing::debug;

use crate::{
    error::{Error, Result},
    sql::{
        executor::ResultSet,
        parser::ast::{CreateStatement, DropStatement},
        schema::Table,
    },
    storage::Catalog,
};

/// CREATE TABLE
pub fn create_table(catalog: &mut Catalog, stmt: CreateStatement) -> Result<ResultSet> {
    if !stmt.columns.iter().any(|c| c.name == stmt.primary_key) {
        return Err(Error::PrimaryKeyNotDefined(stmt.table_name));
    }
    if catalog.contains_table(&stmt.table_name) {
        return Err(Error::TableAlreadyExists(stmt.table_name));
    }

    let table = Table::new(stmt.table_name.clone(), stmt.columns, stmt.primary_key)?;
    catalog.create_table(table)?;
    debug!(table = %stmt.table_name, "table created");
    Ok(ResultSet::CreateTable {
        table_name: stmt.table_name,
    })
}

/// DROP TABLE
pub fn drop_table(catalog: &mut Catalog, stmt: DropStatement) -> Result<ResultSet> {
    let table = catalog.drop_table(&stmt.table_name)?;
    debug!(table = %stmt.table_name, rows = table.rows.len(), "table dropped");
    Ok(ResultSet::DropTable {
        table_name: stmt.table_name,
    })
}
