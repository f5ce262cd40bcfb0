//! Subscription record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::placeholder_metadata;

/// A normalized subscription row.
///
/// `price_id`, `subscription_item_id`, and `plan_interval` are derived from
/// the first entry of the items collection; an empty collection leaves all
/// three null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubscriptionRecord {
    /// External id, e.g. "sub_XXXX"
    pub id: String,
    pub status: Option<String>,
    pub currency: Option<String>,

    pub customer_id: Option<String>,
    pub price_id: Option<String>,
    pub subscription_item_id: Option<String>,
    /// Billing interval of the first item's plan, e.g. "month".
    pub plan_interval: Option<String>,

    pub start_date: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
    pub cancel_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,

    pub cancel_at_period_end: bool,
    pub livemode: bool,
    pub deleted: bool,

    pub metadata: Value,
    /// The full items envelope, kept opaque for downstream consumers.
    pub items: Value,
    pub invoice_settings: Option<Value>,
    pub automatic_tax: Option<Value>,
    pub payment_settings: Option<Value>,
    pub trial_settings: Option<Value>,

    pub latest_invoice: Option<String>,
}

impl SubscriptionRecord {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
            metadata: placeholder_metadata(),
            ..Default::default()
        }
    }
}
