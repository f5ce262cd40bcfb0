//! Invoice transformer

use serde::Deserialize;
use serde_json::Value;

use super::{list_or_empty, object_or_empty};
use crate::model::InvoiceRecord;
use crate::raw::{epoch_to_datetime, reference_id, Expandable};
use ledgersync_common::{EntityKind, Result, SyncError};

/// Raw invoice payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInvoice {
    pub id: Option<String>,
    pub customer: Option<Expandable>,
    pub status: Option<String>,
    pub billing_reason: Option<String>,
    pub collection_method: Option<String>,
    pub currency: Option<String>,
    pub amount_due: Option<i64>,
    pub amount_paid: Option<i64>,
    pub amount_remaining: Option<i64>,
    pub total: Option<i64>,
    pub subtotal: Option<i64>,
    pub created: Option<i64>,
    pub period_start: Option<i64>,
    pub period_end: Option<i64>,
    pub livemode: Option<bool>,
    pub auto_advance: Option<bool>,
    pub attempted: Option<bool>,
    pub attempt_count: Option<i64>,
    pub hosted_invoice_url: Option<String>,
    pub invoice_pdf: Option<String>,
    pub number: Option<String>,
    pub receipt_number: Option<String>,
    pub metadata: Option<Value>,
    pub lines: Option<Value>,
    pub discounts: Option<Value>,
    pub automatic_tax: Option<Value>,
    pub payment_settings: Option<Value>,
    pub shipping_cost: Option<Value>,
    pub status_transitions: Option<Value>,
}

pub fn transform(raw: RawInvoice) -> Result<InvoiceRecord> {
    let id = raw
        .id
        .ok_or(SyncError::MissingIdentifier(EntityKind::Invoice))?;

    Ok(InvoiceRecord {
        id,
        customer_id: reference_id(raw.customer),
        status: raw.status,
        billing_reason: raw.billing_reason,
        collection_method: raw.collection_method,
        currency: raw.currency,
        amount_due: raw.amount_due,
        amount_paid: raw.amount_paid,
        amount_remaining: raw.amount_remaining,
        total: raw.total,
        subtotal: raw.subtotal,
        created: epoch_to_datetime(raw.created),
        period_start: epoch_to_datetime(raw.period_start),
        period_end: epoch_to_datetime(raw.period_end),
        livemode: raw.livemode.unwrap_or(false),
        auto_advance: raw.auto_advance.unwrap_or(false),
        attempted: raw.attempted.unwrap_or(false),
        attempt_count: raw.attempt_count.unwrap_or(0),
        deleted: false,
        hosted_invoice_url: raw.hosted_invoice_url,
        invoice_pdf: raw.invoice_pdf,
        number: raw.number,
        receipt_number: raw.receipt_number,
        metadata: object_or_empty(raw.metadata),
        lines: object_or_empty(raw.lines),
        discounts: list_or_empty(raw.discounts),
        automatic_tax: raw.automatic_tax,
        payment_settings: raw.payment_settings,
        shipping_cost: raw.shipping_cost,
        status_transitions: raw.status_transitions,
    })
}
