//! Customer record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::placeholder_metadata;

/// A normalized customer row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomerRecord {
    /// External id, e.g. "cus_XXXX"
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,

    /// Current balance in minor currency units; negative means credit.
    pub balance: Option<i64>,
    pub currency: Option<String>,
    pub delinquent: Option<bool>,
    pub livemode: bool,
    /// True for customers deleted upstream and for placeholder rows.
    pub deleted: bool,
    pub created: Option<DateTime<Utc>>,

    pub invoice_prefix: Option<String>,
    pub next_invoice_sequence: Option<i64>,

    pub address: Option<Value>,
    pub shipping: Option<Value>,
    pub invoice_settings: Option<Value>,
    pub metadata: Value,

    /// "none", "exempt", or "reverse"
    pub tax_exempt: Option<String>,
}

impl CustomerRecord {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
            metadata: placeholder_metadata(),
            ..Default::default()
        }
    }
}
