//! Review Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

/// Review row: one per (product, user). Ratings run 1 to 5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl Record for Review {
    const TABLE: &'static str = "reviews";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// New Review Model
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
}
