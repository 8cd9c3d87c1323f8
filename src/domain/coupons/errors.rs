//! Coupons service errors.

use thiserror::Error;

use crate::{auth::AccessError, store::StoreError};

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    #[error("invalid coupon code")]
    InvalidCode,

    #[error("order subtotal is below the coupon minimum")]
    BelowMinimum,

    #[error("coupon has expired")]
    Expired,

    #[error("coupon already exists")]
    AlreadyExists,

    #[error("coupon not found")]
    NotFound,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for CouponsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation(_) => Self::AlreadyExists,
            other => Self::Store(other),
        }
    }
}
