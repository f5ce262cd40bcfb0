//! Customer transformer

use serde::Deserialize;
use serde_json::Value;

use super::object_or_empty;
use crate::model::CustomerRecord;
use crate::raw::epoch_to_datetime;
use ledgersync_common::{EntityKind, Result, SyncError};

/// Raw customer payload as exported by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCustomer {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub balance: Option<i64>,
    pub currency: Option<String>,
    pub delinquent: Option<bool>,
    pub livemode: Option<bool>,
    pub deleted: Option<bool>,
    pub created: Option<i64>,
    pub invoice_prefix: Option<String>,
    pub next_invoice_sequence: Option<i64>,
    pub address: Option<Value>,
    pub shipping: Option<Value>,
    pub invoice_settings: Option<Value>,
    pub metadata: Option<Value>,
    pub tax_exempt: Option<String>,
}

pub fn transform(raw: RawCustomer) -> Result<CustomerRecord> {
    let id = raw
        .id
        .ok_or(SyncError::MissingIdentifier(EntityKind::Customer))?;

    Ok(CustomerRecord {
        id,
        email: raw.email,
        name: raw.name,
        description: raw.description,
        phone: raw.phone,
        balance: raw.balance,
        currency: raw.currency,
        delinquent: raw.delinquent,
        livemode: raw.livemode.unwrap_or(false),
        deleted: raw.deleted.unwrap_or(false),
        created: epoch_to_datetime(raw.created),
        invoice_prefix: raw.invoice_prefix,
        next_invoice_sequence: raw.next_invoice_sequence,
        address: raw.address,
        shipping: raw.shipping,
        invoice_settings: raw.invoice_settings,
        metadata: object_or_empty(raw.metadata),
        tax_exempt: raw.tax_exempt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fake_customer() -> Value {
        json!({
            "id": "cus_test_123",
            "object": "customer",
            "email": "john@example.com",
            "name": "John Test",
            "balance": 0,
            "currency": "usd",
            "delinquent": false,
            "livemode": false,
            "created": 1_700_000_000,
            "invoice_prefix": "A1B2C3",
            "next_invoice_sequence": 2,
            "address": { "city": "Lyon", "country": "FR" },
            "invoice_settings": { "default_payment_method": null },
            "metadata": { "segment": "smb" },
            "tax_exempt": "none"
        })
    }

    #[test]
    fn maps_scalars_and_payloads() {
        let raw: RawCustomer = serde_json::from_value(fake_customer()).unwrap();
        let record = transform(raw).unwrap();

        assert_eq!(record.id, "cus_test_123");
        assert_eq!(record.email.as_deref(), Some("john@example.com"));
        assert_eq!(record.balance, Some(0));
        assert_eq!(record.created.unwrap().timestamp(), 1_700_000_000);
        assert_eq!(record.metadata, json!({ "segment": "smb" }));
        assert_eq!(record.address, Some(json!({ "city": "Lyon", "country": "FR" })));
        assert!(!record.deleted);
    }

    #[test]
    fn absent_created_becomes_null() {
        let raw: RawCustomer =
            serde_json::from_value(json!({ "id": "cus_min" })).unwrap();
        let record = transform(raw).unwrap();

        assert_eq!(record.created, None);
        assert!(!record.livemode);
        assert_eq!(record.metadata, json!({}));
    }

    #[test]
    fn deleted_stub_keeps_its_flag() {
        let raw: RawCustomer =
            serde_json::from_value(json!({ "id": "cus_gone", "deleted": true })).unwrap();
        let record = transform(raw).unwrap();
        assert!(record.deleted);
    }

    #[test]
    fn missing_id_is_a_hard_error() {
        let raw: RawCustomer =
            serde_json::from_value(json!({ "email": "no-id@example.com" })).unwrap();
        assert!(matches!(
            transform(raw),
            Err(SyncError::MissingIdentifier(EntityKind::Customer))
        ));
    }
}
