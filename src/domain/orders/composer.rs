//! Order composition.

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::{
    carts::models::Cart,
    coupons::models::AppliedCoupon,
    orders::models::{Address, Order, OrderLine, OrderStatus, PaymentStatus},
};

/// Compose an order and its lines from a priced cart.
///
/// Unit prices, product names, and option labels are copied out of the
/// cart view; the resulting rows never consult the catalog again. The
/// discount is applied as given — a fixed coupon larger than the
/// subtotal yields a negative final amount.
#[must_use]
pub fn compose_order(
    user: Uuid,
    cart: &Cart,
    address: Address,
    coupon: Option<&AppliedCoupon>,
    now: Timestamp,
) -> (Order, Vec<OrderLine>) {
    let discount_amount = coupon.map_or(0.0, |applied| applied.discount_amount);

    let order = Order {
        id: Uuid::now_v7(),
        user_id: user,
        subtotal: cart.subtotal,
        discount_amount,
        final_amount: cart.subtotal - discount_amount,
        coupon_code: coupon.map(|applied| applied.code.clone()),
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        shipping_address: address,
        created_at: now,
    };

    let lines = cart
        .lines
        .iter()
        .map(|line| OrderLine {
            id: Uuid::now_v7(),
            order_id: order.id,
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            variant: line.variant.clone(),
            measurement: line.measurement.clone(),
        })
        .collect();

    (order, lines)
}

#[cfg(test)]
mod tests {
    use crate::domain::carts::models::CartLine;

    use super::*;

    fn address() -> Address {
        Address {
            recipient: "A. Customer".to_string(),
            line1: "1 High Street".to_string(),
            city: "Leeds".to_string(),
            postal_code: "LS1 1AA".to_string(),
            country: "GB".to_string(),
        }
    }

    fn cart_line(name: &str, quantity: u32, unit_price: f64) -> CartLine {
        CartLine {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            product_id: Uuid::now_v7(),
            product_name: name.to_string(),
            quantity,
            variant: None,
            measurement: None,
            unit_price,
            line_total: unit_price * f64::from(quantity),
        }
    }

    #[test]
    fn order_totals_and_lines_snapshot_the_cart() {
        let lines = vec![cart_line("Jug", 2, 50.0), cart_line("Mug", 1, 50.0)];
        let subtotal = lines.iter().map(|line| line.line_total).sum();
        let cart = Cart { lines, subtotal };

        let coupon = AppliedCoupon {
            code: "SAVE20".to_string(),
            discount_amount: 20.0,
        };

        let user = Uuid::now_v7();
        let (order, order_lines) =
            compose_order(user, &cart, address(), Some(&coupon), Timestamp::now());

        assert_eq!(order.user_id, user);
        assert_eq!(order.subtotal, 150.0);
        assert_eq!(order.discount_amount, 20.0);
        assert_eq!(order.final_amount, 130.0);
        assert_eq!(order.coupon_code.as_deref(), Some("SAVE20"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);

        assert_eq!(order_lines.len(), 2);
        assert!(order_lines.iter().all(|line| line.order_id == order.id));
        assert_eq!(order_lines[0].product_name, "Jug");
        assert_eq!(order_lines[0].unit_price, 50.0);
    }

    #[test]
    fn without_coupon_final_equals_subtotal() {
        let lines = vec![cart_line("Jug", 1, 12.0)];
        let cart = Cart {
            subtotal: 12.0,
            lines,
        };

        let (order, _) = compose_order(Uuid::now_v7(), &cart, address(), None, Timestamp::now());

        assert_eq!(order.discount_amount, 0.0);
        assert_eq!(order.final_amount, 12.0);
        assert_eq!(order.coupon_code, None);
    }

    #[test]
    fn oversized_fixed_discount_goes_negative() {
        let lines = vec![cart_line("Mug", 1, 30.0)];
        let cart = Cart {
            subtotal: 30.0,
            lines,
        };

        let coupon = AppliedCoupon {
            code: "FLAT50".to_string(),
            discount_amount: 50.0,
        };

        let (order, _) = compose_order(
            Uuid::now_v7(),
            &cart,
            address(),
            Some(&coupon),
            Timestamp::now(),
        );

        assert_eq!(order.final_amount, -20.0);
    }
}
