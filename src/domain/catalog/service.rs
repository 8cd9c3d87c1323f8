//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{Caller, ensure_admin},
    config::StorefrontConfig,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{NewProduct, Product, ProductUpdate},
        records::ProductRecord,
    },
    store::{self, Filter, Record, Store},
};

#[derive(Clone)]
pub struct StoreCatalogService {
    store: Arc<dyn Store>,
    config: StorefrontConfig,
}

impl StoreCatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: StorefrontConfig) -> Self {
        Self { store, config }
    }

    async fn fetch_product(&self, product: Uuid) -> Result<ProductRecord, CatalogServiceError> {
        store::fetch_by_id::<ProductRecord>(self.store.as_ref(), product)
            .await?
            .ok_or(CatalogServiceError::NotFound)
    }
}

#[async_trait]
impl CatalogService for StoreCatalogService {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let records =
            store::fetch_all::<ProductRecord>(self.store.as_ref(), &Filter::new()).await?;

        Ok(records.into_iter().map(Product::from_record).collect())
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, CatalogServiceError> {
        let record = self.fetch_product(product).await?;

        Ok(Product::from_record(record))
    }

    async fn related_products(&self, product: Uuid) -> Result<Vec<Product>, CatalogServiceError> {
        let subject = self.get_product(product).await?;

        let mut candidates = self.list_products().await?;
        candidates.retain(|candidate| candidate.id != product);
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // Same-category candidates lead; the rest backfill. Both groups
        // keep their recency ordering.
        let (mut related, backfill): (Vec<Product>, Vec<Product>) = match &subject.category {
            Some(category) => candidates
                .into_iter()
                .partition(|candidate| candidate.category.as_ref() == Some(category)),
            None => (Vec::new(), candidates),
        };

        related.extend(backfill);
        related.truncate(self.config.related_products_limit);

        Ok(related)
    }

    #[tracing::instrument(
        name = "catalog.service.create_product",
        skip(self, caller, product),
        fields(product_id = %product.id),
        err
    )]
    async fn create_product(
        &self,
        caller: &Caller,
        product: NewProduct,
    ) -> Result<Product, CatalogServiceError> {
        ensure_admin(caller, "create products")?;

        if !product.base_price.is_finite() || product.base_price < 0.0 {
            return Err(CatalogServiceError::InvalidData);
        }

        if matches!(product.sale_price, Some(sale) if !sale.is_finite() || sale < 0.0) {
            return Err(CatalogServiceError::InvalidData);
        }

        let record = ProductRecord {
            id: product.id,
            name: product.name,
            category: product.category,
            base_price: product.base_price,
            sale_price: product.sale_price,
            variant_options: product.variant_options,
            measurement_options: product.measurement_options,
            stock_qty: product.stock_qty,
            created_at: Timestamp::now(),
        };

        store::insert_record(self.store.as_ref(), &record).await?;

        info!(product_id = %record.id, "created product");

        Ok(Product::from_record(record))
    }

    #[tracing::instrument(
        name = "catalog.service.update_product",
        skip(self, caller, update),
        fields(product_id = %product),
        err
    )]
    async fn update_product(
        &self,
        caller: &Caller,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<(), CatalogServiceError> {
        ensure_admin(caller, "update products")?;

        let mut patch = serde_json::Map::new();

        if let Some(name) = update.name {
            patch.insert("name".to_string(), Value::String(name));
        }

        if let Some(base_price) = update.base_price {
            if !base_price.is_finite() || base_price < 0.0 {
                return Err(CatalogServiceError::InvalidData);
            }

            patch.insert("base_price".to_string(), json!(base_price));
        }

        if let Some(sale_price) = update.sale_price {
            patch.insert("sale_price".to_string(), json!(sale_price));
        }

        if let Some(stock_qty) = update.stock_qty {
            patch.insert("stock_qty".to_string(), json!(stock_qty));
        }

        let affected = self
            .store
            .update(ProductRecord::TABLE, product, Value::Object(patch))
            .await?;

        if affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        info!(product_id = %product, "updated product");

        Ok(())
    }

    #[tracing::instrument(
        name = "catalog.service.delete_product",
        skip(self, caller),
        fields(product_id = %product),
        err
    )]
    async fn delete_product(
        &self,
        caller: &Caller,
        product: Uuid,
    ) -> Result<(), CatalogServiceError> {
        ensure_admin(caller, "delete products")?;

        let affected = self.store.delete(ProductRecord::TABLE, product).await?;

        if affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        info!(product_id = %product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// Retrieve a single product with its options normalized.
    async fn get_product(&self, product: Uuid) -> Result<Product, CatalogServiceError>;

    /// Products related to the given one: same category first, then
    /// others, most recent first within each group.
    async fn related_products(&self, product: Uuid) -> Result<Vec<Product>, CatalogServiceError>;

    /// Creates a new product. Admin only.
    async fn create_product(
        &self,
        caller: &Caller,
        product: NewProduct,
    ) -> Result<Product, CatalogServiceError>;

    /// Updates a product. Admin only.
    async fn update_product(
        &self,
        caller: &Caller,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<(), CatalogServiceError>;

    /// Deletes a product. Admin only.
    async fn delete_product(
        &self,
        caller: &Caller,
        product: Uuid,
    ) -> Result<(), CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_product_returns_normalized_options() -> TestResult {
        let ctx = TestContext::new();

        let product = ctx
            .storefront
            .catalog
            .create_product(
                &ctx.admin,
                ctx.new_product("Jug", 12.0)
                    .with_variants(vec![serde_json::json!("Red"), serde_json::json!("")]),
            )
            .await?;

        let labels: Vec<&str> = product
            .variant_options
            .iter()
            .map(|option| option.label.as_str())
            .collect();

        assert_eq!(labels, vec!["Red"]);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.storefront.catalog.get_product(Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_requires_admin() {
        let ctx = TestContext::new();

        let result = ctx
            .storefront
            .catalog
            .create_product(&ctx.customer, ctx.new_product("Jug", 12.0))
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::Access(_))),
            "expected Access denial, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_rejects_negative_price() {
        let ctx = TestContext::new();

        let result = ctx
            .storefront
            .catalog
            .create_product(&ctx.admin, ctx.new_product("Jug", -1.0))
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_id_returns_already_exists() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.new_product("Jug", 12.0);

        ctx.storefront
            .catalog
            .create_product(&ctx.admin, product.clone())
            .await?;

        let result = ctx.storefront.catalog.create_product(&ctx.admin, product).await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_reflects_new_price() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.create_product("Jug", 12.0).await;

        ctx.storefront
            .catalog
            .update_product(
                &ctx.admin,
                product.id,
                ProductUpdate {
                    base_price: Some(9.0),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        let updated = ctx.storefront.catalog.get_product(product.id).await?;

        assert_eq!(updated.base_price, 9.0);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_can_clear_sale_price() -> TestResult {
        let ctx = TestContext::new();

        let product = ctx
            .storefront
            .catalog
            .create_product(&ctx.admin, ctx.new_product("Jug", 12.0).with_sale_price(10.0))
            .await?;

        ctx.storefront
            .catalog
            .update_product(
                &ctx.admin,
                product.id,
                ProductUpdate {
                    sale_price: Some(None),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        let updated = ctx.storefront.catalog.get_product(product.id).await?;

        assert_eq!(updated.sale_price, None);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.create_product("Jug", 12.0).await;

        ctx.storefront
            .catalog
            .delete_product(&ctx.admin, product.id)
            .await?;

        let result = ctx.storefront.catalog.get_product(product.id).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn related_products_prefer_same_category_most_recent_first() -> TestResult {
        let ctx = TestContext::new();

        let subject = ctx
            .storefront
            .catalog
            .create_product(&ctx.admin, ctx.new_product("Jug", 12.0).with_category("kitchen"))
            .await?;

        let older_match = ctx
            .storefront
            .catalog
            .create_product(&ctx.admin, ctx.new_product("Mug", 4.0).with_category("kitchen"))
            .await?;

        // Creation timestamps decide the ordering within each group.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let newer_match = ctx
            .storefront
            .catalog
            .create_product(&ctx.admin, ctx.new_product("Pan", 18.0).with_category("kitchen"))
            .await?;

        let backfill = ctx
            .storefront
            .catalog
            .create_product(&ctx.admin, ctx.new_product("Lamp", 25.0).with_category("lighting"))
            .await?;

        let related = ctx.storefront.catalog.related_products(subject.id).await?;

        let ids: Vec<Uuid> = related.iter().map(|product| product.id).collect();

        assert_eq!(ids, vec![newer_match.id, older_match.id, backfill.id]);

        Ok(())
    }
}
