//! Catalog Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::catalog::{options, records::ProductRecord};

/// Normalized product option: a variant or measurement choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ProductOption {
    /// The option as a raw row value, in its normalized object shape.
    #[must_use]
    pub fn to_raw(&self) -> Value {
        let mut object = serde_json::Map::new();

        object.insert("label".to_string(), Value::String(self.label.clone()));

        if let Some(image_ref) = &self.image_ref {
            object.insert("image_ref".to_string(), Value::String(image_ref.clone()));
        }

        if let Some(price) = self.price {
            if let Some(number) = serde_json::Number::from_f64(price) {
                object.insert("price".to_string(), Value::Number(number));
            }
        }

        Value::Object(object)
    }
}

/// Product with its option lists normalized.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub base_price: f64,
    pub sale_price: Option<f64>,
    pub variant_options: Vec<ProductOption>,
    pub measurement_options: Vec<ProductOption>,
    pub stock_qty: u32,
    pub created_at: Timestamp,
}

impl Product {
    /// Parse a raw row, normalizing the option lists and dropping entries
    /// without a usable label.
    #[must_use]
    pub fn from_record(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            category: record.category,
            base_price: record.base_price,
            sale_price: record.sale_price,
            variant_options: options::parse_options(&record.variant_options),
            measurement_options: options::parse_options(&record.measurement_options),
            stock_qty: record.stock_qty,
            created_at: record.created_at,
        }
    }

    /// Variant with the given label, if the product offers one.
    #[must_use]
    pub fn variant(&self, label: &str) -> Option<&ProductOption> {
        self.variant_options.iter().find(|option| option.label == label)
    }

    /// Measurement with the given label, if the product offers one.
    #[must_use]
    pub fn measurement(&self, label: &str) -> Option<&ProductOption> {
        self.measurement_options.iter().find(|option| option.label == label)
    }
}

/// New Product Model
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub base_price: f64,
    pub sale_price: Option<f64>,
    pub variant_options: Vec<Value>,
    pub measurement_options: Vec<Value>,
    pub stock_qty: u32,
}

impl NewProduct {
    /// Minimal product with the given name and base price.
    #[must_use]
    pub fn new(name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            category: None,
            base_price,
            sale_price: None,
            variant_options: Vec::new(),
            measurement_options: Vec::new(),
            stock_qty: 0,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_sale_price(mut self, sale_price: f64) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    #[must_use]
    pub fn with_variants(mut self, variants: Vec<Value>) -> Self {
        self.variant_options = variants;
        self
    }

    #[must_use]
    pub fn with_measurements(mut self, measurements: Vec<Value>) -> Self {
        self.measurement_options = measurements;
        self
    }

    #[must_use]
    pub fn with_stock(mut self, stock_qty: u32) -> Self {
        self.stock_qty = stock_qty;
        self
    }
}

/// Patchable product fields.
///
/// `sale_price` distinguishes "leave as is" (`None`) from "set"
/// (`Some(Some(price))`) and "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub base_price: Option<f64>,
    pub sale_price: Option<Option<f64>>,
    pub stock_qty: Option<u32>,
}
