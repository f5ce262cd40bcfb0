//! Payment intent record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::placeholder_metadata;

/// A normalized payment intent row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentIntentRecord {
    /// External id, e.g. "pi_XXXX"
    pub id: String,
    pub status: Option<String>,
    pub currency: Option<String>,

    pub amount: Option<i64>,
    pub amount_capturable: Option<i64>,
    pub amount_received: Option<i64>,
    pub capture_method: Option<String>,
    pub confirmation_method: Option<String>,
    /// Not always exported; kept nullable for security-trimmed dumps.
    pub client_secret: Option<String>,

    pub created: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,

    pub livemode: bool,
    pub deleted: bool,

    pub customer_id: Option<String>,
    pub payment_method_id: Option<String>,

    pub description: Option<String>,
    pub receipt_email: Option<String>,

    pub payment_method_types: Value,
    pub payment_method_options: Option<Value>,
    pub amount_details: Option<Value>,
    pub metadata: Value,
    pub next_action: Option<Value>,
    pub statement_descriptor: Option<String>,
    pub statement_descriptor_suffix: Option<String>,

    pub setup_future_usage: Option<String>,
}

impl PaymentIntentRecord {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
            metadata: placeholder_metadata(),
            ..Default::default()
        }
    }
}
