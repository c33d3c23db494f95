use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    sql::schema::Table,
};

/// Table name to table mapping
#[derive(Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Adds a table, error if the name is taken
    pub fn create_table(&mut self, table: Table) -> Result<()> {
        if self.tables.contains_key(&table.name) {
            return Err(Error::TableAlreadyExists(table.name));
        }
        self.tables.insert(table.name.clone(), table);
        Ok(())
    }

    pub fn contains_table(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    pub fn get_table(&self, table_name: &str) -> Option<&Table> {
        self.tables.get(table_name)
    }

    /// Returns table info, returns error if table doesn't exist
    pub fn must_get_table(&self, table_name: &str) -> Result<&Table> {
        self.tables
            .get(table_name)
            .ok_or_else(|| Error::UnknownTable(table_name.to_string()))
    }

    pub fn must_get_table_mut(&mut self, table_name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(table_name)
            .ok_or_else(|| Error::UnknownTable(table_name.to_string()))
    }

    /// Removes a table and all of its rows
    pub fn drop_table(&mut self, table_name: &str) -> Result<Table> {
        self.tables
            .remove(table_name)
            .ok_or_else(|| Error::UnknownTable(table_name.to_string()))
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }
}
