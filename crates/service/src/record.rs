//! Open-ended JSON records and the identifier rules of each collection.

use serde_json::{Map, Value};

/// A category or item: any JSON object.
pub type Record = Map<String, Value>;

/// The two tables of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Categories,
    Items,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Categories, Collection::Items];

    /// Field whose value keys a record within the table.
    pub fn identifier_field(self) -> &'static str {
        match self {
            Collection::Categories => "category_name",
            Collection::Items => "item_id",
        }
    }

    /// Singular entity name used in error reasons.
    pub fn entity(self) -> &'static str {
        match self {
            Collection::Categories => "Category",
            Collection::Items => "Item",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Categories => "categories",
            Collection::Items => "items",
        }
    }

    /// Reason given when a create carries no usable or an already taken identifier.
    pub fn rejected_create_reason(self) -> &'static str {
        match self {
            Collection::Categories => "Category already exists or no name",
            Collection::Items => "Item already exists or no id",
        }
    }

    /// Storage key of `record`, or `None` when the identifier is absent or falsy.
    pub fn key_of(self, record: &Record) -> Option<String> {
        record.get(self.identifier_field()).and_then(identifier_key)
    }
}

/// String form of an identifier value. `null`, `false`, zero, `""`, `[]` and
/// `{}` count as missing; strings are used as-is and anything else is keyed by
/// its compact JSON text (`42` -> `"42"`, `true` -> `"true"`).
fn identifier_key(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64().map_or(false, |f| f == 0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Shallow merge: every top-level key of `patch` overwrites the one in `target`.
pub fn merge_into(target: &mut Record, patch: Record) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}
