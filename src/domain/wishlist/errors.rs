//! Wishlist service errors.

use thiserror::Error;

use crate::{auth::AccessError, store::StoreError};

#[derive(Debug, Error)]
pub enum WishlistServiceError {
    #[error("product not found")]
    InvalidReference,

    #[error("wishlist entry already exists")]
    Conflict,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for WishlistServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation(_) => Self::Conflict,
            other => Self::Store(other),
        }
    }
}
