//! Subscription transformer
//!
//! The subscription's effective price is derived from the first entry of its
//! items collection; the collection itself is stored opaquely so downstream
//! consumers keep the full envelope.

use serde::Deserialize;
use serde_json::Value;

use super::object_or_empty;
use crate::model::SubscriptionRecord;
use crate::raw::{epoch_to_datetime, reference_id, Expandable};
use ledgersync_common::{EntityKind, Result, SyncError};

/// Raw subscription payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubscription {
    pub id: Option<String>,
    pub status: Option<String>,
    pub currency: Option<String>,
    pub customer: Option<Expandable>,
    pub start_date: Option<i64>,
    pub created: Option<i64>,
    pub cancel_at: Option<i64>,
    pub canceled_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub cancel_at_period_end: Option<bool>,
    pub livemode: Option<bool>,
    pub metadata: Option<Value>,
    pub items: Option<Value>,
    pub invoice_settings: Option<Value>,
    pub automatic_tax: Option<Value>,
    pub payment_settings: Option<Value>,
    pub trial_settings: Option<Value>,
    pub latest_invoice: Option<Expandable>,
}

/// Typed view over the items envelope, used only for the first-item lookup.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawSubscriptionItems {
    #[serde(default)]
    data: Vec<RawSubscriptionItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSubscriptionItem {
    id: Option<String>,
    price: Option<RawItemPrice>,
}

/// The item's price is usually embedded, but tolerate a bare id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawItemPrice {
    Id(String),
    Object {
        id: Option<String>,
        recurring: Option<RawRecurring>,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct RawRecurring {
    interval: Option<String>,
}

impl RawItemPrice {
    fn id(&self) -> Option<&str> {
        match self {
            RawItemPrice::Id(id) => Some(id),
            RawItemPrice::Object { id, .. } => id.as_deref(),
        }
    }

    fn interval(&self) -> Option<&str> {
        match self {
            RawItemPrice::Id(_) => None,
            RawItemPrice::Object { recurring, .. } => {
                recurring.as_ref().and_then(|r| r.interval.as_deref())
            },
        }
    }
}

pub fn transform(raw: RawSubscription) -> Result<SubscriptionRecord> {
    let id = raw
        .id
        .ok_or(SyncError::MissingIdentifier(EntityKind::Subscription))?;

    let view: RawSubscriptionItems = match &raw.items {
        Some(value) => serde_json::from_value(value.clone())?,
        None => RawSubscriptionItems::default(),
    };
    let first_item = view.data.first();
    let subscription_item_id = first_item.and_then(|item| item.id.clone());
    let price_id = first_item
        .and_then(|item| item.price.as_ref())
        .and_then(|price| price.id())
        .map(str::to_string);
    let plan_interval = first_item
        .and_then(|item| item.price.as_ref())
        .and_then(|price| price.interval())
        .map(str::to_string);

    Ok(SubscriptionRecord {
        id,
        status: raw.status,
        currency: raw.currency,
        customer_id: reference_id(raw.customer),
        price_id,
        subscription_item_id,
        plan_interval,
        start_date: epoch_to_datetime(raw.start_date),
        created: epoch_to_datetime(raw.created),
        cancel_at: epoch_to_datetime(raw.cancel_at),
        canceled_at: epoch_to_datetime(raw.canceled_at),
        ended_at: epoch_to_datetime(raw.ended_at),
        cancel_at_period_end: raw.cancel_at_period_end.unwrap_or(false),
        livemode: raw.livemode.unwrap_or(false),
        deleted: false,
        metadata: object_or_empty(raw.metadata),
        items: object_or_empty(raw.items),
        invoice_settings: raw.invoice_settings,
        automatic_tax: raw.automatic_tax,
        payment_settings: raw.payment_settings,
        trial_settings: raw.trial_settings,
        latest_invoice: reference_id(raw.latest_invoice),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fake_subscription() -> Value {
        json!({
            "id": "sub_test_1",
            "object": "subscription",
            "status": "active",
            "currency": "usd",
            "customer": "cus_test_1",
            "start_date": 1_700_000_000,
            "created": 1_700_000_000,
            "cancel_at_period_end": false,
            "livemode": false,
            "items": {
                "object": "list",
                "data": [{
                    "id": "si_test_1",
                    "object": "subscription_item",
                    "price": {
                        "id": "price_test_1",
                        "object": "price",
                        "recurring": { "interval": "month" }
                    }
                }],
                "has_more": false
            },
            "latest_invoice": "in_test_1"
        })
    }

    #[test]
    fn derives_price_from_first_item() {
        let raw: RawSubscription = serde_json::from_value(fake_subscription()).unwrap();
        let record = transform(raw).unwrap();

        assert_eq!(record.customer_id.as_deref(), Some("cus_test_1"));
        assert_eq!(record.price_id.as_deref(), Some("price_test_1"));
        assert_eq!(record.subscription_item_id.as_deref(), Some("si_test_1"));
        assert_eq!(record.plan_interval.as_deref(), Some("month"));
        assert_eq!(record.latest_invoice.as_deref(), Some("in_test_1"));
        // The envelope survives untouched.
        assert_eq!(record.items["has_more"], json!(false));
    }

    #[test]
    fn empty_items_collection_yields_null_price() {
        let raw: RawSubscription = serde_json::from_value(json!({
            "id": "sub_empty",
            "customer": "cus_1",
            "items": { "object": "list", "data": [] }
        }))
        .unwrap();

        let record = transform(raw).unwrap();
        assert_eq!(record.price_id, None);
        assert_eq!(record.subscription_item_id, None);
        assert_eq!(record.plan_interval, None);
    }

    #[test]
    fn absent_items_behaves_like_empty() {
        let raw: RawSubscription =
            serde_json::from_value(json!({ "id": "sub_bare" })).unwrap();
        let record = transform(raw).unwrap();
        assert_eq!(record.price_id, None);
        assert_eq!(record.items, json!({}));
    }

    #[test]
    fn expanded_customer_collapses_to_id() {
        let raw: RawSubscription = serde_json::from_value(json!({
            "id": "sub_2",
            "customer": { "id": "cus_77", "object": "customer", "email": "x@y.z" }
        }))
        .unwrap();

        let record = transform(raw).unwrap();
        assert_eq!(record.customer_id.as_deref(), Some("cus_77"));
    }
}
