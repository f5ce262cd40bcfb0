//! Payment method record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::placeholder_metadata;

/// A normalized payment method row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentMethodRecord {
    /// External id, e.g. "pm_XXXX"
    pub id: String,
    /// e.g. "card", "us_bank_account"
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub method_type: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub livemode: bool,
    pub deleted: bool,

    pub customer_id: Option<String>,

    pub billing_details: Value,
    pub metadata: Value,

    pub us_bank_account: Option<Value>,
    pub card: Option<Value>,
}

impl PaymentMethodRecord {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
            metadata: placeholder_metadata(),
            ..Default::default()
        }
    }
}
