//! Storefront Context

use std::sync::Arc;

use crate::{
    config::StorefrontConfig,
    domain::{
        carts::{CartsService, StoreCartsService},
        catalog::{CatalogService, StoreCatalogService},
        coupons::{CouponsService, StoreCouponsService},
        orders::{OrdersService, StoreOrdersService},
        reviews::{ReviewsService, StoreReviewsService},
        wishlist::{StoreWishlistService, WishlistService},
    },
    store::{MemoryStore, Store},
};

/// Service handles wired over a shared store.
#[derive(Clone)]
pub struct Storefront {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlist: Arc<dyn WishlistService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
    pub reviews: Arc<dyn ReviewsService>,
}

impl Storefront {
    /// Wire every service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: StorefrontConfig) -> Self {
        let carts: Arc<dyn CartsService> =
            Arc::new(StoreCartsService::new(store.clone(), config.clone()));

        Self {
            catalog: Arc::new(StoreCatalogService::new(store.clone(), config)),
            orders: Arc::new(StoreOrdersService::new(store.clone(), carts.clone())),
            wishlist: Arc::new(StoreWishlistService::new(store.clone())),
            coupons: Arc::new(StoreCouponsService::new(store.clone())),
            reviews: Arc::new(StoreReviewsService::new(store)),
            carts,
        }
    }

    /// Context over a fresh in-memory store carrying the storefront's
    /// uniqueness constraints.
    #[must_use]
    pub fn in_memory(config: StorefrontConfig) -> Self {
        Self::new(Arc::new(MemoryStore::for_storefront()), config)
    }
}
