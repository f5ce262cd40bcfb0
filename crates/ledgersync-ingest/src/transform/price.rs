//! Price transformer

use serde::Deserialize;
use serde_json::Value;

use super::object_or_empty;
use crate::model::PriceRecord;
use crate::raw::{epoch_to_datetime, reference_id, Expandable};
use ledgersync_common::{EntityKind, Result, SyncError};

/// Raw price payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPrice {
    pub id: Option<String>,
    pub active: Option<bool>,
    pub currency: Option<String>,
    pub billing_scheme: Option<String>,
    #[serde(rename = "type")]
    pub price_type: Option<String>,
    pub unit_amount: Option<i64>,
    pub unit_amount_decimal: Option<String>,
    pub product: Option<Expandable>,
    pub recurring: Option<Value>,
    pub livemode: Option<bool>,
    pub created: Option<i64>,
    pub nickname: Option<String>,
    pub lookup_key: Option<String>,
    pub metadata: Option<Value>,
    pub tax_behavior: Option<String>,
    pub tiers_mode: Option<String>,
    pub custom_unit_amount: Option<Value>,
    pub transform_quantity: Option<Value>,
}

pub fn transform(raw: RawPrice) -> Result<PriceRecord> {
    let id = raw.id.ok_or(SyncError::MissingIdentifier(EntityKind::Price))?;

    Ok(PriceRecord {
        id,
        active: raw.active.unwrap_or(true),
        currency: raw.currency,
        billing_scheme: raw.billing_scheme,
        price_type: raw.price_type,
        unit_amount: raw.unit_amount,
        unit_amount_decimal: raw.unit_amount_decimal,
        product_id: reference_id(raw.product),
        recurring: raw.recurring,
        livemode: raw.livemode.unwrap_or(false),
        deleted: false,
        created: epoch_to_datetime(raw.created),
        nickname: raw.nickname,
        lookup_key: raw.lookup_key,
        metadata: object_or_empty(raw.metadata),
        tax_behavior: raw.tax_behavior,
        tiers_mode: raw.tiers_mode,
        custom_unit_amount: raw.custom_unit_amount,
        transform_quantity: raw.transform_quantity,
    })
}
