//! Catalog Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::store::Record;

/// Product row as stored.
///
/// Option lists are kept raw here: upstream writers have stored plain
/// strings, JSON-encoded strings, and structured objects in these
/// columns. Normalization happens once, in
/// [`options`](crate::domain::catalog::options), when the row becomes a
/// [`Product`](crate::domain::catalog::models::Product).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub base_price: f64,
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub variant_options: Vec<Value>,
    #[serde(default)]
    pub measurement_options: Vec<Value>,
    pub stock_qty: u32,
    pub created_at: Timestamp,
}

impl Record for ProductRecord {
    const TABLE: &'static str = "products";

    fn id(&self) -> Uuid {
        self.id
    }
}
