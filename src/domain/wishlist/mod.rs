//! Wishlist

pub mod errors;
pub mod models;
pub mod service;

pub use errors::WishlistServiceError;
pub use service::*;
