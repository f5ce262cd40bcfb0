//! Price record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::placeholder_metadata;

/// A normalized price row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PriceRecord {
    /// External id, e.g. "price_XXXX"
    pub id: String,
    pub active: bool,
    pub currency: Option<String>,
    pub billing_scheme: Option<String>,
    /// "one_time" or "recurring"
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub price_type: Option<String>,
    /// Minor currency units, e.g. cents for USD.
    pub unit_amount: Option<i64>,
    pub unit_amount_decimal: Option<String>,

    pub product_id: Option<String>,

    /// Interval, usage_type, etc.
    pub recurring: Option<Value>,

    pub livemode: bool,
    pub deleted: bool,
    pub created: Option<DateTime<Utc>>,

    pub nickname: Option<String>,
    pub lookup_key: Option<String>,
    pub metadata: Value,

    pub tax_behavior: Option<String>,
    pub tiers_mode: Option<String>,
    pub custom_unit_amount: Option<Value>,
    pub transform_quantity: Option<Value>,
}

impl PriceRecord {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
            metadata: placeholder_metadata(),
            ..Default::default()
        }
    }
}
