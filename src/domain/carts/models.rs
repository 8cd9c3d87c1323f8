//! Cart Models

use uuid::Uuid;

use crate::domain::catalog::models::ProductOption;

/// Cart line with its snapshots parsed and its price resolved.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub variant: Option<ProductOption>,
    pub measurement: Option<ProductOption>,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Cart Model
#[derive(Debug, Clone)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
}

/// Add-to-cart request.
#[derive(Debug, Clone)]
pub struct AddToCart {
    pub product_id: Uuid,
    pub quantity: u32,
    pub variant_label: Option<String>,
    pub measurement_label: Option<String>,
}

impl AddToCart {
    /// One unit of the product with no selections.
    #[must_use]
    pub fn product(product_id: Uuid) -> Self {
        Self {
            product_id,
            quantity: 1,
            variant_label: None,
            measurement_label: None,
        }
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_variant(mut self, label: impl Into<String>) -> Self {
        self.variant_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_measurement(mut self, label: impl Into<String>) -> Self {
        self.measurement_label = Some(label.into());
        self
    }
}
