//! Price resolution.

use crate::domain::catalog::models::{Product, ProductOption};

/// Effective unit price for a product under the given selections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPrice {
    /// Price charged per unit.
    pub unit_price: f64,

    /// Catalog base price the discount is measured against.
    pub base_price: f64,

    /// Rounded percentage off the base price, present when the effective
    /// price is below it.
    pub discount_percent: Option<u32>,
}

/// Resolve the effective unit price.
///
/// Option-level pricing overrides the product-level sale price outright:
/// when either selection carries a price, the two are summed (a missing
/// one counts as zero) and the sale price is ignored. Only without any
/// option price does the sale price, then the base price, apply.
///
/// Selections are normalized options, so any price they carry is already
/// known to be a usable number.
#[must_use]
pub fn resolve_price(
    product: &Product,
    variant: Option<&ProductOption>,
    measurement: Option<&ProductOption>,
) -> ResolvedPrice {
    let variant_price = variant.and_then(|option| option.price);
    let measurement_price = measurement.and_then(|option| option.price);

    let unit_price = if variant_price.is_some() || measurement_price.is_some() {
        variant_price.unwrap_or(0.0) + measurement_price.unwrap_or(0.0)
    } else {
        product.sale_price.unwrap_or(product.base_price)
    };

    ResolvedPrice {
        unit_price,
        base_price: product.base_price,
        discount_percent: discount_percent(product.base_price, unit_price),
    }
}

fn discount_percent(base: f64, effective: f64) -> Option<u32> {
    if base > 0.0 && effective < base {
        Some(((base - effective) / base * 100.0).round() as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use uuid::Uuid;

    use super::*;

    fn product(base_price: f64, sale_price: Option<f64>) -> Product {
        Product {
            id: Uuid::now_v7(),
            name: "Jug".to_string(),
            category: None,
            base_price,
            sale_price,
            variant_options: Vec::new(),
            measurement_options: Vec::new(),
            stock_qty: 5,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn option(label: &str, price: Option<f64>) -> ProductOption {
        ProductOption {
            label: label.to_string(),
            image_ref: None,
            price,
        }
    }

    #[test]
    fn no_selections_uses_sale_price_over_base() {
        let resolved = resolve_price(&product(20.0, Some(15.0)), None, None);

        assert_eq!(resolved.unit_price, 15.0);
        assert_eq!(resolved.discount_percent, Some(25));
    }

    #[test]
    fn no_selections_and_no_sale_uses_base() {
        let resolved = resolve_price(&product(20.0, None), None, None);

        assert_eq!(resolved.unit_price, 20.0);
        assert_eq!(resolved.discount_percent, None);
    }

    #[test]
    fn both_option_prices_sum_regardless_of_sale_price() {
        let variant = option("Red", Some(8.0));
        let measurement = option("1L", Some(4.0));

        let resolved = resolve_price(
            &product(20.0, Some(1.0)),
            Some(&variant),
            Some(&measurement),
        );

        assert_eq!(resolved.unit_price, 12.0);
        assert_eq!(resolved.discount_percent, Some(40));
    }

    #[test]
    fn single_option_price_overrides_sale_price() {
        let variant = option("Red", Some(8.0));

        let resolved = resolve_price(&product(20.0, Some(1.0)), Some(&variant), None);

        assert_eq!(resolved.unit_price, 8.0);
        assert_eq!(resolved.discount_percent, Some(60));
    }

    #[test]
    fn priceless_selections_fall_back_to_sale_price() {
        let variant = option("Red", None);
        let measurement = option("1L", None);

        let resolved = resolve_price(
            &product(20.0, Some(15.0)),
            Some(&variant),
            Some(&measurement),
        );

        assert_eq!(resolved.unit_price, 15.0);
    }

    #[test]
    fn option_price_above_base_is_not_a_discount() {
        let variant = option("Deluxe", Some(30.0));

        let resolved = resolve_price(&product(20.0, None), Some(&variant), None);

        assert_eq!(resolved.unit_price, 30.0);
        assert_eq!(resolved.discount_percent, None);
    }

    #[test]
    fn discount_percentage_is_rounded() {
        // 20 -> 13.4 is a 33% discount once rounded.
        let resolved = resolve_price(&product(20.0, Some(13.4)), None, None);

        assert_eq!(resolved.discount_percent, Some(33));
    }

    #[test]
    fn zero_base_price_never_reports_a_discount() {
        let resolved = resolve_price(&product(0.0, None), None, None);

        assert_eq!(resolved.discount_percent, None);
    }
}
