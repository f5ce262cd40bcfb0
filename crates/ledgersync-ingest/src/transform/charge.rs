//! Charge transformer

use serde::Deserialize;
use serde_json::Value;

use super::object_or_empty;
use crate::model::ChargeRecord;
use crate::raw::{epoch_to_datetime, reference_id, Expandable};
use ledgersync_common::{EntityKind, Result, SyncError};

/// Raw charge payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCharge {
    pub id: Option<String>,
    pub amount: Option<i64>,
    pub amount_captured: Option<i64>,
    pub amount_refunded: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub paid: Option<bool>,
    pub captured: Option<bool>,
    pub disputed: Option<bool>,
    pub refunded: Option<bool>,
    pub created: Option<i64>,
    pub livemode: Option<bool>,
    pub payment_intent: Option<Expandable>,
    pub payment_method: Option<Expandable>,
    pub receipt_url: Option<String>,
    pub receipt_email: Option<String>,
    pub receipt_number: Option<String>,
    pub billing_details: Option<Value>,
    pub outcome: Option<Value>,
    pub payment_method_details: Option<Value>,
    pub metadata: Option<Value>,
    pub fraud_details: Option<Value>,
    pub description: Option<String>,
    pub statement_descriptor: Option<String>,
    pub statement_descriptor_suffix: Option<String>,
    pub balance_transaction: Option<Expandable>,
    pub invoice: Option<Expandable>,
}

pub fn transform(raw: RawCharge) -> Result<ChargeRecord> {
    let id = raw
        .id
        .ok_or(SyncError::MissingIdentifier(EntityKind::Charge))?;

    Ok(ChargeRecord {
        id,
        amount: raw.amount,
        amount_captured: raw.amount_captured,
        amount_refunded: raw.amount_refunded,
        currency: raw.currency,
        status: raw.status,
        paid: raw.paid.unwrap_or(false),
        captured: raw.captured.unwrap_or(false),
        disputed: raw.disputed.unwrap_or(false),
        refunded: raw.refunded.unwrap_or(false),
        created: epoch_to_datetime(raw.created),
        livemode: raw.livemode.unwrap_or(false),
        deleted: false,
        payment_intent_id: reference_id(raw.payment_intent),
        payment_method: reference_id(raw.payment_method),
        receipt_url: raw.receipt_url,
        receipt_email: raw.receipt_email,
        receipt_number: raw.receipt_number,
        billing_details: object_or_empty(raw.billing_details),
        outcome: raw.outcome,
        payment_method_details: raw.payment_method_details,
        metadata: object_or_empty(raw.metadata),
        fraud_details: object_or_empty(raw.fraud_details),
        description: raw.description,
        statement_descriptor: raw.statement_descriptor,
        statement_descriptor_suffix: raw.statement_descriptor_suffix,
        balance_transaction: reference_id(raw.balance_transaction),
        invoice_id: reference_id(raw.invoice),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fake_charge() -> Value {
        json!({
            "id": "ch_test_123",
            "object": "charge",
            "amount": 1099,
            "amount_captured": 1099,
            "amount_refunded": 0,
            "currency": "usd",
            "status": "succeeded",
            "paid": true,
            "captured": true,
            "disputed": false,
            "refunded": false,
            "created": 1_700_000_000,
            "livemode": false,
            "payment_intent": "pi_test_123",
            "payment_method": "pm_test_123",
            "billing_details": { "name": "John Doe" },
            "outcome": { "risk_level": "normal" },
            "payment_method_details": { "type": "card" },
            "invoice": "in_test_123"
        })
    }

    #[test]
    fn maps_succeeded_charge() {
        let raw: RawCharge = serde_json::from_value(fake_charge()).unwrap();
        let record = transform(raw).unwrap();

        assert_eq!(record.id, "ch_test_123");
        assert_eq!(record.amount, Some(1099));
        assert!(record.paid);
        assert_eq!(record.payment_intent_id.as_deref(), Some("pi_test_123"));
        assert_eq!(record.invoice_id.as_deref(), Some("in_test_123"));
        assert_eq!(record.outcome, Some(json!({ "risk_level": "normal" })));
        assert_eq!(record.fraud_details, json!({}));
    }

    #[test]
    fn embedded_payment_intent_collapses_to_id() {
        let mut doc = fake_charge();
        doc["payment_intent"] = json!({
            "id": "pi_test_123",
            "object": "payment_intent",
            "status": "succeeded"
        });

        let raw: RawCharge = serde_json::from_value(doc).unwrap();
        let record = transform(raw).unwrap();
        assert_eq!(record.payment_intent_id.as_deref(), Some("pi_test_123"));
    }

    #[test]
    fn standalone_charge_has_no_references() {
        let raw: RawCharge =
            serde_json::from_value(json!({ "id": "ch_solo", "amount": 500 })).unwrap();
        let record = transform(raw).unwrap();
        assert_eq!(record.payment_intent_id, None);
        assert_eq!(record.invoice_id, None);
        assert!(!record.paid);
    }
}
