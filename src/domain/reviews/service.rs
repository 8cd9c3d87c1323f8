//! Reviews service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{Caller, ensure_owner},
    domain::{
        catalog::records::ProductRecord,
        reviews::{
            errors::ReviewsServiceError,
            models::{NewReview, Review},
        },
    },
    store::{self, Filter, Store},
};

#[derive(Clone)]
pub struct StoreReviewsService {
    store: Arc<dyn Store>,
}

impl StoreReviewsService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReviewsService for StoreReviewsService {
    #[tracing::instrument(
        name = "reviews.service.add_review",
        skip(self, caller, review),
        fields(user_id = %user, product_id = %review.product_id),
        err
    )]
    async fn add_review(
        &self,
        caller: &Caller,
        user: Uuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError> {
        ensure_owner(caller, user, "review as this user")?;

        if !(1..=5).contains(&review.rating) {
            return Err(ReviewsServiceError::InvalidRating);
        }

        store::fetch_by_id::<ProductRecord>(self.store.as_ref(), review.product_id)
            .await?
            .ok_or(ReviewsServiceError::InvalidReference)?;

        let record = Review {
            id: Uuid::now_v7(),
            product_id: review.product_id,
            user_id: user,
            rating: review.rating,
            comment: review.comment,
            created_at: Timestamp::now(),
        };

        store::insert_record(self.store.as_ref(), &record).await?;

        info!(review_id = %record.id, rating = record.rating, "added review");

        Ok(record)
    }

    async fn list_for_product(&self, product: Uuid) -> Result<Vec<Review>, ReviewsServiceError> {
        let filter = Filter::new().eq("product_id", json!(product));
        let mut reviews = store::fetch_all::<Review>(self.store.as_ref(), &filter).await?;

        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(reviews)
    }

    async fn average_rating(&self, product: Uuid) -> Result<Option<f64>, ReviewsServiceError> {
        let reviews = self.list_for_product(product).await?;

        if reviews.is_empty() {
            return Ok(None);
        }

        let total: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();

        Ok(Some(f64::from(total) / reviews.len() as f64))
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Record the user's review of a product. One review per user and
    /// product.
    async fn add_review(
        &self,
        caller: &Caller,
        user: Uuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError>;

    /// Reviews for a product, most recent first. Public.
    async fn list_for_product(&self, product: Uuid) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Mean rating for a product, when it has reviews. Public.
    async fn average_rating(&self, product: Uuid) -> Result<Option<f64>, ReviewsServiceError>;
}
