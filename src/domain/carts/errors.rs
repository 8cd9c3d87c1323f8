//! Carts service errors.

use thiserror::Error;

use crate::{auth::AccessError, store::StoreError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart line not found")]
    NotFound,

    #[error("product not found")]
    InvalidReference,

    #[error("product has no such option")]
    UnknownOption,

    #[error("quantity out of range")]
    InvalidQuantity,

    #[error("a matching cart line already exists")]
    Conflict,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for CartsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation(_) => Self::Conflict,
            other => Self::Store(other),
        }
    }
}
