use std::collections::HashMap;

use configs::SeedConfig;

use crate::errors::ServiceError;
use crate::record::{Collection, Record};

/// Pre-keyed contents installed by a reset.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    categories: HashMap<String, Record>,
    items: HashMap<String, Record>,
}

impl Seed {
    pub fn empty() -> Self { Self::default() }

    /// Key every configured record, rejecting missing or duplicate identifiers.
    pub fn from_config(cfg: &SeedConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            categories: key_records(Collection::Categories, &cfg.categories)?,
            items: key_records(Collection::Items, &cfg.items)?,
        })
    }

    pub fn rows(&self, collection: Collection) -> &HashMap<String, Record> {
        match collection {
            Collection::Categories => &self.categories,
            Collection::Items => &self.items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.items.is_empty()
    }
}

fn key_records(collection: Collection, records: &[Record]) -> Result<HashMap<String, Record>, ServiceError> {
    let mut rows = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let key = collection.key_of(record).ok_or_else(|| {
            ServiceError::Validation(format!(
                "seed {}[{}] has no usable {}",
                collection.as_str(),
                idx,
                collection.identifier_field()
            ))
        })?;
        if rows.insert(key.clone(), record.clone()).is_some() {
            return Err(ServiceError::Validation(format!(
                "seed {} repeats {} {:?}",
                collection.as_str(),
                collection.identifier_field(),
                key
            )));
        }
    }
    Ok(rows)
}
