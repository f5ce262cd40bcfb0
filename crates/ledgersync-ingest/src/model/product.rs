//! Product record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::placeholder_metadata;

/// A normalized product row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRecord {
    /// External id, e.g. "prod_XXXX"
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    pub livemode: bool,
    pub deleted: bool,

    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,

    /// Stored as a bare price id; not resolved as a reference because prices
    /// are ingested after products.
    pub default_price: Option<String>,
    pub tax_code: Option<String>,
    pub unit_label: Option<String>,
    pub statement_descriptor: Option<String>,
    pub url: Option<String>,

    pub images: Value,
    pub marketing_features: Value,
    pub metadata: Value,

    pub package_dimensions: Option<Value>,
    pub shippable: Option<bool>,
}

impl ProductRecord {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
            metadata: placeholder_metadata(),
            ..Default::default()
        }
    }
}
