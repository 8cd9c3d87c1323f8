//! Cart Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    domain::catalog::{models::ProductOption, options},
    store::Record,
};

/// Cart line row.
///
/// `variant` and `measurement` are stored raw: older writers persisted
/// bare label strings where newer ones persist the normalized option
/// object, label plus any price override captured at add time. Readers
/// go through [`variant_option`](Self::variant_option) and friends
/// rather than inspecting the raw values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,

    #[serde(default)]
    pub variant: Option<Value>,

    #[serde(default)]
    pub measurement: Option<Value>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for CartLineRecord {
    const TABLE: &'static str = "cart_lines";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl CartLineRecord {
    /// Parsed variant snapshot, whatever shape it was stored in.
    #[must_use]
    pub fn variant_option(&self) -> Option<ProductOption> {
        self.variant.as_ref().and_then(options::parse_option)
    }

    /// Parsed measurement snapshot, whatever shape it was stored in.
    #[must_use]
    pub fn measurement_option(&self) -> Option<ProductOption> {
        self.measurement.as_ref().and_then(options::parse_option)
    }

    /// Bare label of the stored variant.
    #[must_use]
    pub fn variant_label(&self) -> Option<String> {
        self.variant_option().map(|option| option.label)
    }

    /// Bare label of the stored measurement.
    #[must_use]
    pub fn measurement_label(&self) -> Option<String> {
        self.measurement_option().map(|option| option.label)
    }
}
