//! Coupons service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{Caller, ensure_admin},
    domain::coupons::{
        errors::CouponsServiceError,
        models::{AppliedCoupon, Coupon, DiscountType, NewCoupon},
    },
    store::{self, Filter, Record, Store},
};

#[derive(Clone)]
pub struct StoreCouponsService {
    store: Arc<dyn Store>,
}

impl StoreCouponsService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn fetch_by_code(&self, code: &str) -> Result<Option<Coupon>, CouponsServiceError> {
        let filter = Filter::new().eq("code", json!(code));

        Ok(store::fetch_first::<Coupon>(self.store.as_ref(), &filter).await?)
    }
}

#[async_trait]
impl CouponsService for StoreCouponsService {
    async fn evaluate(
        &self,
        code: &str,
        subtotal: f64,
        now: Timestamp,
    ) -> Result<AppliedCoupon, CouponsServiceError> {
        let code = normalize_code(code);

        let coupon = self
            .fetch_by_code(&code)
            .await?
            .filter(|coupon| coupon.active)
            .ok_or(CouponsServiceError::InvalidCode)?;

        if let Some(minimum) = coupon.min_order_amount {
            if subtotal < minimum {
                return Err(CouponsServiceError::BelowMinimum);
            }
        }

        if let Some(valid_until) = coupon.valid_until {
            if now > valid_until {
                return Err(CouponsServiceError::Expired);
            }
        }

        let discount_amount = match coupon.discount_type {
            DiscountType::Percentage => {
                let discount = subtotal * coupon.discount_value / 100.0;

                match coupon.max_discount_amount {
                    Some(maximum) => discount.min(maximum),
                    None => discount,
                }
            }
            // Fixed discounts apply verbatim and are not clamped to the
            // subtotal; a large one can drive the final amount negative.
            DiscountType::Fixed => coupon.discount_value,
        };

        Ok(AppliedCoupon {
            code: coupon.code,
            discount_amount,
        })
    }

    #[tracing::instrument(
        name = "coupons.service.create_coupon",
        skip(self, caller, coupon),
        fields(code = %coupon.code),
        err
    )]
    async fn create_coupon(
        &self,
        caller: &Caller,
        coupon: NewCoupon,
    ) -> Result<Coupon, CouponsServiceError> {
        ensure_admin(caller, "create coupons")?;

        let record = Coupon {
            id: Uuid::now_v7(),
            code: normalize_code(&coupon.code),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            min_order_amount: coupon.min_order_amount,
            max_discount_amount: coupon.max_discount_amount,
            valid_from: coupon.valid_from,
            valid_until: coupon.valid_until,
            active: true,
        };

        store::insert_record(self.store.as_ref(), &record).await?;

        info!(code = %record.code, "created coupon");

        Ok(record)
    }

    #[tracing::instrument(name = "coupons.service.deactivate_coupon", skip(self, caller), err)]
    async fn deactivate_coupon(
        &self,
        caller: &Caller,
        code: &str,
    ) -> Result<(), CouponsServiceError> {
        ensure_admin(caller, "deactivate coupons")?;

        let coupon = self
            .fetch_by_code(&normalize_code(code))
            .await?
            .ok_or(CouponsServiceError::NotFound)?;

        self.store
            .update(Coupon::TABLE, coupon.id, json!({"active": false}))
            .await?;

        info!(code = %coupon.code, "deactivated coupon");

        Ok(())
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Validate a code against the given subtotal and compute its
    /// discount. Checks run in order: existence and active flag,
    /// minimum order amount, expiry; the first failure wins.
    async fn evaluate(
        &self,
        code: &str,
        subtotal: f64,
        now: Timestamp,
    ) -> Result<AppliedCoupon, CouponsServiceError>;

    /// Creates a new active coupon. Admin only.
    async fn create_coupon(
        &self,
        caller: &Caller,
        coupon: NewCoupon,
    ) -> Result<Coupon, CouponsServiceError>;

    /// Deactivates the coupon with the given code. Admin only.
    async fn deactivate_coupon(
        &self,
        caller: &Caller,
        code: &str,
    ) -> Result<(), CouponsServiceError>;
}
