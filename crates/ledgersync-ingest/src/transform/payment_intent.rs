//! Payment intent transformer

use serde::Deserialize;
use serde_json::Value;

use super::{list_or_empty, object_or_empty};
use crate::model::PaymentIntentRecord;
use crate::raw::{epoch_to_datetime, reference_id, Expandable};
use ledgersync_common::{EntityKind, Result, SyncError};

/// Raw payment intent payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPaymentIntent {
    pub id: Option<String>,
    pub status: Option<String>,
    pub currency: Option<String>,
    pub amount: Option<i64>,
    pub amount_capturable: Option<i64>,
    pub amount_received: Option<i64>,
    pub capture_method: Option<String>,
    pub confirmation_method: Option<String>,
    pub client_secret: Option<String>,
    pub created: Option<i64>,
    pub canceled_at: Option<i64>,
    pub cancellation_reason: Option<String>,
    pub livemode: Option<bool>,
    pub customer: Option<Expandable>,
    pub payment_method: Option<Expandable>,
    pub description: Option<String>,
    pub receipt_email: Option<String>,
    pub payment_method_types: Option<Value>,
    pub payment_method_options: Option<Value>,
    pub amount_details: Option<Value>,
    pub metadata: Option<Value>,
    pub next_action: Option<Value>,
    pub statement_descriptor: Option<String>,
    pub statement_descriptor_suffix: Option<String>,
    pub setup_future_usage: Option<String>,
}

pub fn transform(raw: RawPaymentIntent) -> Result<PaymentIntentRecord> {
    let id = raw
        .id
        .ok_or(SyncError::MissingIdentifier(EntityKind::PaymentIntent))?;

    Ok(PaymentIntentRecord {
        id,
        status: raw.status,
        currency: raw.currency,
        amount: raw.amount,
        amount_capturable: raw.amount_capturable,
        amount_received: raw.amount_received,
        capture_method: raw.capture_method,
        confirmation_method: raw.confirmation_method,
        client_secret: raw.client_secret,
        created: epoch_to_datetime(raw.created),
        canceled_at: epoch_to_datetime(raw.canceled_at),
        cancellation_reason: raw.cancellation_reason,
        livemode: raw.livemode.unwrap_or(false),
        deleted: false,
        customer_id: reference_id(raw.customer),
        payment_method_id: reference_id(raw.payment_method),
        description: raw.description,
        receipt_email: raw.receipt_email,
        payment_method_types: list_or_empty(raw.payment_method_types),
        payment_method_options: raw.payment_method_options,
        amount_details: raw.amount_details,
        metadata: object_or_empty(raw.metadata),
        next_action: raw.next_action,
        statement_descriptor: raw.statement_descriptor,
        statement_descriptor_suffix: raw.statement_descriptor_suffix,
        setup_future_usage: raw.setup_future_usage,
    })
}
