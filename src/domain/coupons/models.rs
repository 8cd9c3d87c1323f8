//! Coupon Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

/// Discount scheme a coupon applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Coupon row. Codes are stored uppercase and matched
/// case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub min_order_amount: Option<f64>,
    pub max_discount_amount: Option<f64>,
    pub valid_from: Timestamp,
    pub valid_until: Option<Timestamp>,
    pub active: bool,
}

impl Record for Coupon {
    const TABLE: &'static str = "coupons";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Successful evaluation of a coupon against a subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCoupon {
    pub code: String,
    pub discount_amount: f64,
}

/// New Coupon Model
#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub min_order_amount: Option<f64>,
    pub max_discount_amount: Option<f64>,
    pub valid_from: Timestamp,
    pub valid_until: Option<Timestamp>,
}

impl NewCoupon {
    /// Percentage coupon with no minimum, cap, or expiry.
    #[must_use]
    pub fn percentage(code: impl Into<String>, value: f64, valid_from: Timestamp) -> Self {
        Self {
            code: code.into(),
            discount_type: DiscountType::Percentage,
            discount_value: value,
            min_order_amount: None,
            max_discount_amount: None,
            valid_from,
            valid_until: None,
        }
    }

    /// Fixed-amount coupon with no minimum or expiry.
    #[must_use]
    pub fn fixed(code: impl Into<String>, value: f64, valid_from: Timestamp) -> Self {
        Self {
            code: code.into(),
            discount_type: DiscountType::Fixed,
            discount_value: value,
            min_order_amount: None,
            max_discount_amount: None,
            valid_from,
            valid_until: None,
        }
    }

    #[must_use]
    pub fn with_min_order(mut self, minimum: f64) -> Self {
        self.min_order_amount = Some(minimum);
        self
    }

    #[must_use]
    pub fn with_max_discount(mut self, maximum: f64) -> Self {
        self.max_discount_amount = Some(maximum);
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, valid_until: Timestamp) -> Self {
        self.valid_until = Some(valid_until);
        self
    }
}
