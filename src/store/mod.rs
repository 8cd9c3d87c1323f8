//! Generic row-store access.
//!
//! The storefront consumes its external data store through this seam:
//! JSON rows addressed by table name, equality filters, and CRUD calls
//! whose constraint violations surface as typed errors. [`memory`] holds
//! the in-process reference backend used by the test suite.

pub mod memory;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;

/// Errors surfaced by a [`Store`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint on the table rejected the write.
    #[error("unique constraint violated on {0}")]
    UniqueViolation(String),

    /// A row could not be decoded into its record type.
    #[error("malformed row in {table}")]
    MalformedRow {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store could not be reached or failed internally.
    #[error("store unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Equality filter over row columns.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column` to equal `value`.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: Value) -> Self {
        self.clauses.push((column.into(), value));
        self
    }

    /// Whether `row` satisfies every clause. Absent columns compare as
    /// null.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        self.clauses
            .iter()
            .all(|(column, value)| row.get(column).unwrap_or(&Value::Null) == value)
    }
}

/// A typed row in a named table.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    /// Table this record lives in.
    const TABLE: &'static str;

    /// Primary key.
    fn id(&self) -> Uuid;
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Rows of `table` matching `filter`.
    async fn query(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// Insert a row, returning it as stored.
    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError>;

    /// Patch columns of the row with the given id. Returns rows affected.
    async fn update(&self, table: &str, id: Uuid, patch: Value) -> Result<u64, StoreError>;

    /// Delete the row with the given id. Returns rows affected.
    async fn delete(&self, table: &str, id: Uuid) -> Result<u64, StoreError>;
}

/// Fetch and decode every matching record.
pub async fn fetch_all<R: Record>(store: &dyn Store, filter: &Filter) -> Result<Vec<R>, StoreError> {
    let rows = store.query(R::TABLE, filter).await?;

    rows.into_iter().map(decode::<R>).collect()
}

/// Fetch and decode the first matching record, if any.
pub async fn fetch_first<R: Record>(
    store: &dyn Store,
    filter: &Filter,
) -> Result<Option<R>, StoreError> {
    let rows = store.query(R::TABLE, filter).await?;

    rows.into_iter().next().map(decode::<R>).transpose()
}

/// Fetch the record with the given primary key.
pub async fn fetch_by_id<R: Record>(store: &dyn Store, id: Uuid) -> Result<Option<R>, StoreError> {
    fetch_first::<R>(store, &Filter::new().eq("id", Value::String(id.to_string()))).await
}

/// Encode and insert a record.
pub async fn insert_record<R: Record>(store: &dyn Store, record: &R) -> Result<(), StoreError> {
    let row = serde_json::to_value(record).map_err(|source| StoreError::MalformedRow {
        table: R::TABLE.to_string(),
        source,
    })?;

    store.insert(R::TABLE, row).await?;

    Ok(())
}

fn decode<R: Record>(row: Value) -> Result<R, StoreError> {
    serde_json::from_value(row).map_err(|source| StoreError::MalformedRow {
        table: R::TABLE.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn filter_matches_on_all_clauses() {
        let filter = Filter::new().eq("a", json!(1)).eq("b", json!("x"));

        assert!(filter.matches(&json!({"a": 1, "b": "x", "c": true})));
        assert!(!filter.matches(&json!({"a": 1, "b": "y"})));
    }

    #[test]
    fn absent_column_compares_as_null() {
        let filter = Filter::new().eq("variant", Value::Null);

        assert!(filter.matches(&json!({"id": 1})));
        assert!(filter.matches(&json!({"id": 1, "variant": null})));
        assert!(!filter.matches(&json!({"id": 1, "variant": "Red"})));
    }
}
