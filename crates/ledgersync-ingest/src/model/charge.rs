//! Charge record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::placeholder_metadata;

/// A normalized charge row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChargeRecord {
    /// External id, e.g. "ch_XXXX"
    pub id: String,

    pub amount: Option<i64>,
    pub amount_captured: Option<i64>,
    pub amount_refunded: Option<i64>,

    pub currency: Option<String>,
    pub status: Option<String>,
    pub paid: bool,
    pub captured: bool,
    pub disputed: bool,
    pub refunded: bool,

    pub created: Option<DateTime<Utc>>,
    pub livemode: bool,
    pub deleted: bool,

    pub payment_intent_id: Option<String>,
    /// Bare payment method id; not resolved as a reference because charges
    /// may carry methods that were never attached to a customer.
    pub payment_method: Option<String>,
    pub receipt_url: Option<String>,
    pub receipt_email: Option<String>,
    pub receipt_number: Option<String>,

    pub billing_details: Value,
    pub outcome: Option<Value>,
    pub payment_method_details: Option<Value>,
    pub metadata: Value,
    pub fraud_details: Value,

    pub description: Option<String>,
    pub statement_descriptor: Option<String>,
    pub statement_descriptor_suffix: Option<String>,

    pub balance_transaction: Option<String>,

    pub invoice_id: Option<String>,
}

impl ChargeRecord {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
            metadata: placeholder_metadata(),
            ..Default::default()
        }
    }
}
