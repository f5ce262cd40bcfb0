//! Payment method transformer

use serde::Deserialize;
use serde_json::Value;

use super::object_or_empty;
use crate::model::PaymentMethodRecord;
use crate::raw::{epoch_to_datetime, reference_id, Expandable};
use ledgersync_common::{EntityKind, Result, SyncError};

/// Raw payment method payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPaymentMethod {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub method_type: Option<String>,
    pub created: Option<i64>,
    pub livemode: Option<bool>,
    pub customer: Option<Expandable>,
    pub billing_details: Option<Value>,
    pub metadata: Option<Value>,
    pub us_bank_account: Option<Value>,
    pub card: Option<Value>,
}

pub fn transform(raw: RawPaymentMethod) -> Result<PaymentMethodRecord> {
    let id = raw
        .id
        .ok_or(SyncError::MissingIdentifier(EntityKind::PaymentMethod))?;

    Ok(PaymentMethodRecord {
        id,
        method_type: raw.method_type,
        created: epoch_to_datetime(raw.created),
        livemode: raw.livemode.unwrap_or(false),
        deleted: false,
        customer_id: reference_id(raw.customer),
        billing_details: object_or_empty(raw.billing_details),
        metadata: object_or_empty(raw.metadata),
        us_bank_account: raw.us_bank_account,
        card: raw.card,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_card_method() {
        let raw: RawPaymentMethod = serde_json::from_value(json!({
            "id": "pm_test_123",
            "object": "payment_method",
            "type": "card",
            "created": 1_700_000_000,
            "livemode": false,
            "customer": "cus_test_123",
            "billing_details": { "name": "John Doe" },
            "card": { "brand": "visa", "last4": "4242" }
        }))
        .unwrap();

        let record = transform(raw).unwrap();
        assert_eq!(record.id, "pm_test_123");
        assert_eq!(record.method_type.as_deref(), Some("card"));
        assert_eq!(record.customer_id.as_deref(), Some("cus_test_123"));
        assert_eq!(record.card, Some(json!({ "brand": "visa", "last4": "4242" })));
        assert_eq!(record.us_bank_account, None);
    }

    #[test]
    fn expanded_customer_collapses_to_id() {
        let raw: RawPaymentMethod = serde_json::from_value(json!({
            "id": "pm_1",
            "customer": { "id": "cus_9", "object": "customer" }
        }))
        .unwrap();

        let record = transform(raw).unwrap();
        assert_eq!(record.customer_id.as_deref(), Some("cus_9"));
    }

    #[test]
    fn detached_method_has_no_customer() {
        let raw: RawPaymentMethod =
            serde_json::from_value(json!({ "id": "pm_2", "type": "us_bank_account" })).unwrap();
        let record = transform(raw).unwrap();
        assert_eq!(record.customer_id, None);
        assert_eq!(record.billing_details, json!({}));
    }
}
