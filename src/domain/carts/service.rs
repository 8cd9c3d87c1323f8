//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{Caller, ensure_owner},
    config::StorefrontConfig,
    domain::{
        carts::{
            errors::CartsServiceError,
            matcher::find_matching_line,
            models::{AddToCart, Cart, CartLine},
            records::CartLineRecord,
        },
        catalog::{models::Product, pricing::resolve_price, records::ProductRecord},
    },
    store::{self, Filter, Record, Store},
};

#[derive(Clone)]
pub struct StoreCartsService {
    store: Arc<dyn Store>,
    config: StorefrontConfig,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: StorefrontConfig) -> Self {
        Self { store, config }
    }

    async fn fetch_product(&self, product: Uuid) -> Result<Product, CartsServiceError> {
        let record = store::fetch_by_id::<ProductRecord>(self.store.as_ref(), product)
            .await?
            .ok_or(CartsServiceError::InvalidReference)?;

        Ok(Product::from_record(record))
    }

    async fn fetch_line(&self, line: Uuid) -> Result<CartLineRecord, CartsServiceError> {
        store::fetch_by_id::<CartLineRecord>(self.store.as_ref(), line)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    async fn lines_for(
        &self,
        user: Uuid,
        product: Uuid,
    ) -> Result<Vec<CartLineRecord>, CartsServiceError> {
        let filter = Filter::new()
            .eq("user_id", json!(user))
            .eq("product_id", json!(product));

        Ok(store::fetch_all::<CartLineRecord>(self.store.as_ref(), &filter).await?)
    }

    fn check_quantity(&self, quantity: u32) -> Result<(), CartsServiceError> {
        if quantity == 0 || quantity > self.config.max_line_quantity {
            return Err(CartsServiceError::InvalidQuantity);
        }

        Ok(())
    }
}

#[async_trait]
impl CartsService for StoreCartsService {
    #[tracing::instrument(
        name = "carts.service.add_line",
        skip(self, caller, request),
        fields(user_id = %user, product_id = %request.product_id),
        err
    )]
    async fn add_line(
        &self,
        caller: &Caller,
        user: Uuid,
        request: AddToCart,
    ) -> Result<CartLineRecord, CartsServiceError> {
        ensure_owner(caller, user, "modify this cart")?;

        self.check_quantity(request.quantity)?;

        let product = self.fetch_product(request.product_id).await?;

        // Selections must name options the product actually offers; the
        // snapshots below are taken from the product, not the request.
        let variant = match &request.variant_label {
            Some(label) => Some(
                product
                    .variant(label)
                    .ok_or(CartsServiceError::UnknownOption)?
                    .clone(),
            ),
            None => None,
        };

        let measurement = match &request.measurement_label {
            Some(label) => Some(
                product
                    .measurement(label)
                    .ok_or(CartsServiceError::UnknownOption)?
                    .clone(),
            ),
            None => None,
        };

        let existing = self.lines_for(user, request.product_id).await?;

        let now = Timestamp::now();

        if let Some(line) = find_matching_line(
            &existing,
            request.variant_label.as_deref(),
            request.measurement_label.as_deref(),
        ) {
            let quantity = line.quantity + request.quantity;

            self.store
                .update(
                    CartLineRecord::TABLE,
                    line.id,
                    json!({"quantity": quantity, "updated_at": now}),
                )
                .await?;

            info!(line_id = %line.id, quantity, "merged into existing cart line");

            return Ok(CartLineRecord {
                quantity,
                updated_at: now,
                ..line.clone()
            });
        }

        let record = CartLineRecord {
            id: Uuid::now_v7(),
            user_id: user,
            product_id: request.product_id,
            quantity: request.quantity,
            variant: variant.as_ref().map(|option| option.to_raw()),
            measurement: measurement.as_ref().map(|option| option.to_raw()),
            created_at: now,
            updated_at: now,
        };

        store::insert_record(self.store.as_ref(), &record).await?;

        info!(line_id = %record.id, "added cart line");

        Ok(record)
    }

    async fn get_cart(&self, caller: &Caller, user: Uuid) -> Result<Cart, CartsServiceError> {
        ensure_owner(caller, user, "read this cart")?;

        let filter = Filter::new().eq("user_id", json!(user));
        let records = store::fetch_all::<CartLineRecord>(self.store.as_ref(), &filter).await?;

        let mut lines = Vec::with_capacity(records.len());

        for record in records {
            let product = self.fetch_product(record.product_id).await?;

            let variant = record.variant_option();
            let measurement = record.measurement_option();

            // Snapshot prices pin the line; priceless snapshots fall back
            // to the live catalog price.
            let resolved = resolve_price(&product, variant.as_ref(), measurement.as_ref());
            let line_total = resolved.unit_price * f64::from(record.quantity);

            lines.push(CartLine {
                id: record.id,
                user_id: record.user_id,
                product_id: record.product_id,
                product_name: product.name,
                quantity: record.quantity,
                variant,
                measurement,
                unit_price: resolved.unit_price,
                line_total,
            });
        }

        let subtotal = lines.iter().map(|line| line.line_total).sum();

        Ok(Cart { lines, subtotal })
    }

    #[tracing::instrument(
        name = "carts.service.set_quantity",
        skip(self, caller),
        fields(line_id = %line, quantity),
        err
    )]
    async fn set_quantity(
        &self,
        caller: &Caller,
        line: Uuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        self.check_quantity(quantity)?;

        let record = self.fetch_line(line).await?;

        ensure_owner(caller, record.user_id, "modify this cart")?;

        self.store
            .update(
                CartLineRecord::TABLE,
                line,
                json!({"quantity": quantity, "updated_at": Timestamp::now()}),
            )
            .await?;

        info!(line_id = %line, quantity, "updated cart line quantity");

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.remove_line",
        skip(self, caller),
        fields(line_id = %line),
        err
    )]
    async fn remove_line(&self, caller: &Caller, line: Uuid) -> Result<(), CartsServiceError> {
        let record = self.fetch_line(line).await?;

        ensure_owner(caller, record.user_id, "modify this cart")?;

        let affected = self.store.delete(CartLineRecord::TABLE, line).await?;

        if affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        info!(line_id = %line, "removed cart line");

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.clear_cart",
        skip(self, caller),
        fields(user_id = %user),
        err
    )]
    async fn clear_cart(&self, caller: &Caller, user: Uuid) -> Result<(), CartsServiceError> {
        ensure_owner(caller, user, "modify this cart")?;

        let filter = Filter::new().eq("user_id", json!(user));
        let records = store::fetch_all::<CartLineRecord>(self.store.as_ref(), &filter).await?;

        for record in &records {
            self.store.delete(CartLineRecord::TABLE, record.id).await?;
        }

        info!(user_id = %user, line_count = records.len(), "cleared cart");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add the requested product to the user's cart, merging into an
    /// existing line when one carries the same selections.
    async fn add_line(
        &self,
        caller: &Caller,
        user: Uuid,
        request: AddToCart,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// The user's cart with every line priced.
    async fn get_cart(&self, caller: &Caller, user: Uuid) -> Result<Cart, CartsServiceError>;

    /// Set the quantity on a cart line.
    async fn set_quantity(
        &self,
        caller: &Caller,
        line: Uuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError>;

    /// Remove a cart line.
    async fn remove_line(&self, caller: &Caller, line: Uuid) -> Result<(), CartsServiceError>;

    /// Remove every line in the user's cart.
    async fn clear_cart(&self, caller: &Caller, user: Uuid) -> Result<(), CartsServiceError>;
}
