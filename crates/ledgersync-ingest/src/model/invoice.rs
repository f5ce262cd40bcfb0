//! Invoice record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::placeholder_metadata;

/// A normalized invoice row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InvoiceRecord {
    /// External id, e.g. "in_XXXX"
    pub id: String,
    pub customer_id: Option<String>,

    pub status: Option<String>,
    pub billing_reason: Option<String>,
    pub collection_method: Option<String>,

    pub currency: Option<String>,
    pub amount_due: Option<i64>,
    pub amount_paid: Option<i64>,
    pub amount_remaining: Option<i64>,
    pub total: Option<i64>,
    pub subtotal: Option<i64>,

    pub created: Option<DateTime<Utc>>,
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: Option<DateTime<Utc>>,

    pub livemode: bool,
    pub auto_advance: bool,
    pub attempted: bool,
    pub attempt_count: i64,
    pub deleted: bool,

    pub hosted_invoice_url: Option<String>,
    pub invoice_pdf: Option<String>,
    pub number: Option<String>,
    pub receipt_number: Option<String>,

    pub metadata: Value,
    pub lines: Value,
    pub discounts: Value,
    pub automatic_tax: Option<Value>,
    pub payment_settings: Option<Value>,
    pub shipping_cost: Option<Value>,
    pub status_transitions: Option<Value>,
}

impl InvoiceRecord {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
            metadata: placeholder_metadata(),
            ..Default::default()
        }
    }
}
