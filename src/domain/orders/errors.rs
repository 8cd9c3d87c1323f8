//! Orders service errors.

use thiserror::Error;

use crate::{auth::AccessError, domain::carts::CartsServiceError, store::StoreError};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("incomplete shipping address")]
    InvalidAddress,

    #[error("order not found")]
    NotFound,

    #[error("invalid status transition")]
    InvalidTransition,

    #[error("cart unavailable")]
    Cart(#[from] CartsServiceError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for OrdersServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}
