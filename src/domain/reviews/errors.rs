//! Reviews service errors.

use thiserror::Error;

use crate::{auth::AccessError, store::StoreError};

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("rating must be between 1 and 5")]
    InvalidRating,

    #[error("product not found")]
    InvalidReference,

    #[error("product already reviewed by this user")]
    AlreadyReviewed,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ReviewsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation(_) => Self::AlreadyReviewed,
            other => Self::Store(other),
        }
    }
}
