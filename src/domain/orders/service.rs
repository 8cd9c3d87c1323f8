//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{Caller, ensure_admin, ensure_owner},
    domain::{
        carts::CartsService,
        coupons::models::AppliedCoupon,
        orders::{
            composer::compose_order,
            errors::OrdersServiceError,
            models::{Address, Order, OrderDetail, OrderLine, OrderStatus, PaymentStatus},
        },
    },
    store::{self, Filter, Record, Store},
};

#[derive(Clone)]
pub struct StoreOrdersService {
    store: Arc<dyn Store>,
    carts: Arc<dyn CartsService>,
}

impl StoreOrdersService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, carts: Arc<dyn CartsService>) -> Self {
        Self { store, carts }
    }

    async fn fetch_order(&self, order: Uuid) -> Result<Order, OrdersServiceError> {
        store::fetch_by_id::<Order>(self.store.as_ref(), order)
            .await?
            .ok_or(OrdersServiceError::NotFound)
    }
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, caller, address, coupon),
        fields(user_id = %user),
        err
    )]
    async fn place_order(
        &self,
        caller: &Caller,
        user: Uuid,
        address: Address,
        coupon: Option<AppliedCoupon>,
    ) -> Result<Order, OrdersServiceError> {
        ensure_owner(caller, user, "place this order")?;

        if !address.is_complete() {
            return Err(OrdersServiceError::InvalidAddress);
        }

        let cart = self.carts.get_cart(caller, user).await?;

        if cart.lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let (order, lines) =
            compose_order(user, &cart, address, coupon.as_ref(), Timestamp::now());

        store::insert_record(self.store.as_ref(), &order).await?;

        for line in &lines {
            store::insert_record(self.store.as_ref(), line).await?;
        }

        // Cart lines stay in place; callers clear the cart once the
        // order is durably created.
        info!(order_id = %order.id, line_count = lines.len(), "placed order");

        Ok(order)
    }

    async fn get_order(
        &self,
        caller: &Caller,
        order: Uuid,
    ) -> Result<OrderDetail, OrdersServiceError> {
        let order = self.fetch_order(order).await?;

        ensure_owner(caller, order.user_id, "read this order")?;

        let filter = Filter::new().eq("order_id", json!(order.id));
        let lines = store::fetch_all::<OrderLine>(self.store.as_ref(), &filter).await?;

        Ok(OrderDetail { order, lines })
    }

    async fn list_orders(
        &self,
        caller: &Caller,
        user: Uuid,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        ensure_owner(caller, user, "read these orders")?;

        let filter = Filter::new().eq("user_id", json!(user));
        let mut orders = store::fetch_all::<Order>(self.store.as_ref(), &filter).await?;

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.update_status",
        skip(self, caller),
        fields(order_id = %order),
        err
    )]
    async fn update_status(
        &self,
        caller: &Caller,
        order: Uuid,
        next: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        ensure_admin(caller, "update order status")?;

        let record = self.fetch_order(order).await?;

        if !record.status.can_transition_to(next) {
            return Err(OrdersServiceError::InvalidTransition);
        }

        self.store
            .update(Order::TABLE, order, json!({"status": next}))
            .await?;

        info!(order_id = %order, ?next, "updated order status");

        Ok(())
    }

    #[tracing::instrument(
        name = "orders.service.update_payment_status",
        skip(self, caller),
        fields(order_id = %order),
        err
    )]
    async fn update_payment_status(
        &self,
        caller: &Caller,
        order: Uuid,
        next: PaymentStatus,
    ) -> Result<(), OrdersServiceError> {
        ensure_admin(caller, "update payment status")?;

        let record = self.fetch_order(order).await?;

        if !record.payment_status.can_transition_to(next) {
            return Err(OrdersServiceError::InvalidTransition);
        }

        self.store
            .update(Order::TABLE, order, json!({"payment_status": next}))
            .await?;

        info!(order_id = %order, ?next, "updated payment status");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Compose and persist an order from the user's current cart.
    ///
    /// The cart is left untouched; clear it after this returns
    /// successfully.
    async fn place_order(
        &self,
        caller: &Caller,
        user: Uuid,
        address: Address,
        coupon: Option<AppliedCoupon>,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve an order and its lines. Owner or admin.
    async fn get_order(
        &self,
        caller: &Caller,
        order: Uuid,
    ) -> Result<OrderDetail, OrdersServiceError>;

    /// The user's orders, most recent first. Owner or admin.
    async fn list_orders(
        &self,
        caller: &Caller,
        user: Uuid,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Advance the fulfilment status. Admin only.
    async fn update_status(
        &self,
        caller: &Caller,
        order: Uuid,
        next: OrderStatus,
    ) -> Result<(), OrdersServiceError>;

    /// Advance the payment status. Admin only.
    async fn update_payment_status(
        &self,
        caller: &Caller,
        order: Uuid,
        next: PaymentStatus,
    ) -> Result<(), OrdersServiceError>;
}
