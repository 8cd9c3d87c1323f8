//! Catalog service errors.

use thiserror::Error;

use crate::{auth::AccessError, store::StoreError};

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("invalid product data")]
    InvalidData,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for CatalogServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation(_) => Self::AlreadyExists,
            other => Self::Store(other),
        }
    }
}
