use std::collections::{BTreeMap, btree_map};

use crate::{
    error::Result,
    sql::types::{Row, Value},
};

/// In-memory row map of one table, keyed by primary key
///
/// Keys are the bincode encoding of the primary-key [`Value`], which gives a
/// total order and equality even for float keys.
#[derive(Debug, Default)]
pub struct MemoryRows {
    data: BTreeMap<Vec<u8>, Row>,
}

impl MemoryRows {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Stores a row under its key, returning the row it replaced
    pub(crate) fn upsert(&mut self, key: &Value, row: Row) -> Result<Option<Row>> {
        let key = encode_key(key)?;
        Ok(self.data.insert(key, row))
    }

    pub fn get(&self, key: &Value) -> Result<Option<&Row>> {
        let key = encode_key(key)?;
        Ok(self.data.get(&key))
    }

    /// Removes every row matching the predicate, returning how many were removed
    pub(crate) fn delete_where<F: Fn(&Row) -> bool>(&mut self, predicate: F) -> usize {
        let before = self.data.len();
        self.data.retain(|_, row| !predicate(row));
        before - self.data.len()
    }

    pub fn iter(&self) -> MemoryRowsIterator<'_> {
        MemoryRowsIterator {
            inner: self.data.values(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn encode_key(key: &Value) -> Result<Vec<u8>> {
    Ok(bincode::serialize(key)?)
}

/// Iterator over stored rows, in key order
pub struct MemoryRowsIterator<'a> {
    inner: btree_map::Values<'a, Vec<u8>, Row>,
}

impl<'a> Iterator for MemoryRowsIterator<'a> {
    type Item = &'a Row;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryRows;
    use crate::{
        error::Result,
        sql::types::{Row, Value},
    };

    fn row(id: Value, v: &str) -> Row {
        let mut row = Row::new();
        row.insert("id".to_string(), id);
        row.insert("v".to_string(), Value::String(v.to_string()));
        row
    }

    #[test]
    fn test_upsert_and_get() -> Result<()> {
        let mut rows = MemoryRows::new();
        assert_eq!(rows.get(&Value::Integer(1))?, None);

        assert_eq!(rows.upsert(&Value::Integer(1), row(Value::Integer(1), "a"))?, None);
        let replaced = rows.upsert(&Value::Integer(1), row(Value::Integer(1), "b"))?;
        assert_eq!(replaced, Some(row(Value::Integer(1), "a")));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.get(&Value::Integer(1))?, Some(&row(Value::Integer(1), "b")));
        Ok(())
    }

    #[test]
    fn test_keys_are_kind_sensitive() -> Result<()> {
        let mut rows = MemoryRows::new();
        rows.upsert(&Value::Integer(1), row(Value::Integer(1), "int"))?;
        rows.upsert(&Value::Float(1.0), row(Value::Float(1.0), "float"))?;
        rows.upsert(&Value::String("1".to_string()), row(Value::String("1".to_string()), "str"))?;
        assert_eq!(rows.len(), 3);
        Ok(())
    }

    #[test]
    fn test_delete_where() -> Result<()> {
        let mut rows = MemoryRows::new();
        for i in 0..5 {
            let v = if i % 2 == 0 { "even" } else { "odd" };
            rows.upsert(&Value::Integer(i), row(Value::Integer(i), v))?;
        }
        let even = Value::String("even".to_string());
        assert_eq!(rows.delete_where(|r| r.get("v") == Some(&even)), 3);
        assert_eq!(rows.delete_where(|r| r.get("v") == Some(&even)), 0);
        assert_eq!(rows.iter().count(), 2);
        Ok(())
    }
}
