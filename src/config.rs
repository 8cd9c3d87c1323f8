//! Storefront configuration.

use serde::Deserialize;

/// Tunables threaded through the service context.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// How many products a related-products lookup returns at most.
    pub related_products_limit: usize,

    /// Upper bound on a single cart line's quantity.
    pub max_line_quantity: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            related_products_limit: 4,
            max_line_quantity: 99,
        }
    }
}
