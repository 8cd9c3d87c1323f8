//! Wishlist service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{Caller, ensure_owner},
    domain::{catalog::records::ProductRecord, wishlist::{errors::WishlistServiceError, models::WishlistItem}},
    store::{self, Filter, Record, Store},
};

#[derive(Clone)]
pub struct StoreWishlistService {
    store: Arc<dyn Store>,
}

impl StoreWishlistService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WishlistService for StoreWishlistService {
    #[tracing::instrument(
        name = "wishlist.service.toggle",
        skip(self, caller),
        fields(user_id = %user, product_id = %product),
        err
    )]
    async fn toggle(
        &self,
        caller: &Caller,
        user: Uuid,
        product: Uuid,
    ) -> Result<bool, WishlistServiceError> {
        ensure_owner(caller, user, "modify this wishlist")?;

        let filter = Filter::new()
            .eq("user_id", json!(user))
            .eq("product_id", json!(product));

        if let Some(existing) =
            store::fetch_first::<WishlistItem>(self.store.as_ref(), &filter).await?
        {
            self.store.delete(WishlistItem::TABLE, existing.id).await?;

            info!(product_id = %product, "removed wishlist entry");

            return Ok(false);
        }

        store::fetch_by_id::<ProductRecord>(self.store.as_ref(), product)
            .await?
            .ok_or(WishlistServiceError::InvalidReference)?;

        let item = WishlistItem {
            id: Uuid::now_v7(),
            user_id: user,
            product_id: product,
            created_at: Timestamp::now(),
        };

        store::insert_record(self.store.as_ref(), &item).await?;

        info!(product_id = %product, "added wishlist entry");

        Ok(true)
    }

    async fn list(
        &self,
        caller: &Caller,
        user: Uuid,
    ) -> Result<Vec<WishlistItem>, WishlistServiceError> {
        ensure_owner(caller, user, "read this wishlist")?;

        let filter = Filter::new().eq("user_id", json!(user));
        let mut items = store::fetch_all::<WishlistItem>(self.store.as_ref(), &filter).await?;

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(items)
    }
}

#[automock]
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Add the product to the user's wishlist, or remove it when it is
    /// already there. Returns whether the product is saved afterwards.
    async fn toggle(
        &self,
        caller: &Caller,
        user: Uuid,
        product: Uuid,
    ) -> Result<bool, WishlistServiceError>;

    /// The user's saved products, most recent first.
    async fn list(
        &self,
        caller: &Caller,
        user: Uuid,
    ) -> Result<Vec<WishlistItem>, WishlistServiceError>;
}
