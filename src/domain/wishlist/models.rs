//! Wishlist Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

/// Wishlist row: one per (user, product).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: Timestamp,
}

impl Record for WishlistItem {
    const TABLE: &'static str = "wishlist_items";

    fn id(&self) -> Uuid {
        self.id
    }
}
