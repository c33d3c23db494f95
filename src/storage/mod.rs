use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{error::Result, sql::schema::Column};

pub mod catalog;
pub mod memory;

pub use catalog::Catalog;

/// Database handle owning the catalog behind one readers-writer lock
///
/// Built once and passed by reference to every entry point. Writers hold
/// the exclusive guard for a whole statement, readers share the other one.
///
/// The catalog is only reachable through statements; callers outside the
/// crate cannot take the guards:
///
/// ```compile_fail
/// let db = simpledb::Database::new();
/// let _catalog = db.write();
/// ```
#[derive(Debug, Default)]
pub struct Database {
    catalog: RwLock<Catalog>,
}

impl Database {
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog::new()),
        }
    }

    /// Shared access, for queries
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read()
    }

    /// Exclusive access, for statements that mutate the catalog
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog.write()
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> Vec<String> {
        self.read().table_names()
    }

    pub fn row_count(&self, table_name: &str) -> Result<usize> {
        Ok(self.read().must_get_table(table_name)?.rows.len())
    }

    /// Columns and primary key of a table
    pub fn schema(&self, table_name: &str) -> Result<(Vec<Column>, String)> {
        let catalog = self.read();
        let table = catalog.must_get_table(table_name)?;
        Ok((table.columns.clone(), table.primary_key.clone()))
    }
}
