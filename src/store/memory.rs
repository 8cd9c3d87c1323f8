//! In-memory [`Store`] backend.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{Filter, Store, StoreError};

/// In-memory store used by the test suite and as a reference backend.
///
/// Rows live in per-table vectors in insertion order. Uniqueness
/// constraints mirror the ones the external store declares; violating
/// one fails the insert with [`StoreError::UniqueViolation`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<FxHashMap<String, Vec<Value>>>,
    unique_keys: FxHashMap<String, Vec<Vec<&'static str>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a uniqueness constraint over `columns` of `table`.
    #[must_use]
    pub fn with_unique_key(mut self, table: &str, columns: &[&'static str]) -> Self {
        self.unique_keys
            .entry(table.to_string())
            .or_default()
            .push(columns.to_vec());
        self
    }

    /// Store with the storefront schema's uniqueness constraints
    /// declared: primary keys, the cart line selection tuple, coupon
    /// codes, and the one-per-user wishlist and review rows.
    #[must_use]
    pub fn for_storefront() -> Self {
        let store = Self::new()
            .with_unique_key("cart_lines", &["user_id", "product_id", "variant", "measurement"])
            .with_unique_key("coupons", &["code"])
            .with_unique_key("wishlist_items", &["user_id", "product_id"])
            .with_unique_key("reviews", &["product_id", "user_id"]);

        ["products", "cart_lines", "coupons", "orders", "order_lines", "wishlist_items", "reviews"]
            .into_iter()
            .fold(store, |store, table| store.with_unique_key(table, &["id"]))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn query(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .get(table)
            .map(|rows| rows.iter().filter(|row| filter.matches(row)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();

        if let Some(keys) = self.unique_keys.get(table) {
            for key in keys {
                let collides = rows.iter().any(|existing| {
                    key.iter().all(|column| {
                        existing.get(*column).unwrap_or(&Value::Null)
                            == row.get(*column).unwrap_or(&Value::Null)
                    })
                });

                if collides {
                    return Err(StoreError::UniqueViolation(table.to_string()));
                }
            }
        }

        rows.push(row.clone());

        Ok(row)
    }

    async fn update(&self, table: &str, id: Uuid, patch: Value) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;

        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };

        let mut affected = 0;

        for row in rows.iter_mut() {
            if row_id(row) != Some(id) {
                continue;
            }

            if let (Value::Object(target), Value::Object(fields)) = (row, &patch) {
                for (column, value) in fields {
                    target.insert(column.clone(), value.clone());
                }
            }

            affected += 1;
        }

        Ok(affected)
    }

    async fn delete(&self, table: &str, id: Uuid) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;

        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };

        let before = rows.len();
        rows.retain(|row| row_id(row) != Some(id));

        Ok((before - rows.len()) as u64)
    }
}

fn row_id(row: &Value) -> Option<Uuid> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
}
