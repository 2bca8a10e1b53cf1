use std::collections::HashMap;

use crate::errors::ServiceError;
use crate::record::{merge_into, Collection, Record};

/// In-memory `key -> record` map for a single collection.
///
/// The key is derived from the collection's identifier field on create and
/// never changes afterwards, even if an update rewrites that field.
#[derive(Debug, Clone)]
pub struct RecordTable {
    collection: Collection,
    rows: HashMap<String, Record>,
}

impl RecordTable {
    pub fn new(collection: Collection) -> Self {
        Self { collection, rows: HashMap::new() }
    }

    pub(crate) fn len(&self) -> usize { self.rows.len() }

    /// All records, order unspecified.
    pub fn list(&self) -> Vec<Record> {
        self.rows.values().cloned().collect()
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&Record> {
        self.rows.get(key)
    }

    /// Store `record` verbatim under its identifier. Fails without touching the
    /// table when the identifier is missing or taken.
    pub fn create(&mut self, record: Record) -> Result<Record, ServiceError> {
        let key = self
            .collection
            .key_of(&record)
            .filter(|k| !self.rows.contains_key(k))
            .ok_or_else(|| ServiceError::Validation(self.collection.rejected_create_reason().into()))?;
        self.rows.insert(key, record.clone());
        Ok(record)
    }

    /// Shallow-merge `patch` into the record at `key` and return the result.
    pub fn update(&mut self, key: &str, patch: Record) -> Result<Record, ServiceError> {
        let entity = self.collection.entity();
        let stored = self.rows.get_mut(key).ok_or_else(|| ServiceError::not_found(entity))?;
        merge_into(stored, patch);
        Ok(stored.clone())
    }

    pub fn delete(&mut self, key: &str) -> Result<(), ServiceError> {
        match self.rows.remove(key) {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found(self.collection.entity())),
        }
    }

    /// Replace every row with `rows` (already keyed).
    pub fn replace(&mut self, rows: HashMap<String, Record>) {
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn rec(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn create_returns_stored_record_and_lists_it() {
        let mut t = RecordTable::new(Collection::Categories);
        let created = t.create(rec(json!({"category_name": "drinks", "visible": true}))).unwrap();
        assert_eq!(t.get("drinks"), Some(&created));
        assert_eq!(t.list(), vec![created]);
    }

    #[test]
    fn duplicate_or_missing_identifier_leaves_table_unchanged() {
        let mut t = RecordTable::new(Collection::Categories);
        t.create(rec(json!({"category_name": "drinks", "v": 1}))).unwrap();

        let dup = t.create(rec(json!({"category_name": "drinks", "v": 2})));
        assert_eq!(dup, Err(ServiceError::Validation("Category already exists or no name".into())));
        let missing = t.create(rec(json!({"v": 3})));
        assert!(matches!(missing, Err(ServiceError::Validation(_))));

        assert_eq!(t.len(), 1);
        assert_eq!(t.get("drinks").unwrap()["v"], 1);
    }

    #[test]
    fn numeric_item_id_collides_with_its_string_form() {
        let mut t = RecordTable::new(Collection::Items);
        t.create(rec(json!({"item_id": 5, "name": "tea"}))).unwrap();
        assert!(t.create(rec(json!({"item_id": "5"}))).is_err());
        assert_eq!(t.get("5").unwrap()["item_id"], 5);
    }

    #[test]
    fn update_merges_and_keeps_key() {
        let mut t = RecordTable::new(Collection::Categories);
        t.create(rec(json!({"category_name": "drinks", "order": 1}))).unwrap();
        let merged = t.update("drinks", rec(json!({"category_name": "beverages", "visible": false}))).unwrap();
        assert_eq!(Value::Object(merged), json!({"category_name": "beverages", "order": 1, "visible": false}));
        assert!(t.get("drinks").is_some());
        assert!(t.get("beverages").is_none());
    }

    #[test]
    fn update_and_delete_missing_are_not_found() {
        let mut t = RecordTable::new(Collection::Items);
        assert_eq!(t.update("9", Record::new()), Err(ServiceError::NotFound("Item not found".into())));
        assert_eq!(t.delete("9"), Err(ServiceError::NotFound("Item not found".into())));
    }

    #[test]
    fn delete_twice_fails_second_time() {
        let mut t = RecordTable::new(Collection::Items);
        t.create(rec(json!({"item_id": "a"}))).unwrap();
        assert!(t.delete("a").is_ok());
        assert_eq!(t.len(), 0);
        assert!(t.delete("a").is_err());
    }
}
