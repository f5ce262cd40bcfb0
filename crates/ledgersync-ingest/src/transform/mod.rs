//! Transformers: one pure mapping per entity kind, raw object -> record
//!
//! Each submodule declares the raw shape it accepts (the validated
//! intermediate representation, every field optional except the identifier)
//! and a `transform` function applying the documented defaults: boolean flags
//! false (`active` true), list/map payloads empty, everything else null.
//! A missing identifier is the one hard per-record error,
//! `SyncError::MissingIdentifier`.

pub mod charge;
pub mod customer;
pub mod invoice;
pub mod payment_intent;
pub mod payment_method;
pub mod price;
pub mod product;
pub mod subscription;

use serde_json::Value;

use crate::model::Record;
use ledgersync_common::{EntityKind, Result};

/// Transform one raw object of the given kind into a normalized record.
///
/// Deserialization failures (wrong shapes inside the object) and a missing
/// identifier both fail only this record; the caller decides batch policy.
pub fn record(kind: EntityKind, value: Value) -> Result<Record> {
    match kind {
        EntityKind::Customer => {
            customer::transform(serde_json::from_value(value)?).map(Record::Customer)
        },
        EntityKind::PaymentMethod => {
            payment_method::transform(serde_json::from_value(value)?).map(Record::PaymentMethod)
        },
        EntityKind::Product => {
            product::transform(serde_json::from_value(value)?).map(Record::Product)
        },
        EntityKind::Price => price::transform(serde_json::from_value(value)?).map(Record::Price),
        EntityKind::Subscription => {
            subscription::transform(serde_json::from_value(value)?).map(Record::Subscription)
        },
        EntityKind::Invoice => {
            invoice::transform(serde_json::from_value(value)?).map(Record::Invoice)
        },
        EntityKind::PaymentIntent => {
            payment_intent::transform(serde_json::from_value(value)?).map(Record::PaymentIntent)
        },
        EntityKind::Charge => charge::transform(serde_json::from_value(value)?).map(Record::Charge),
    }
}

/// Default for absent map-valued payloads.
pub(crate) fn object_or_empty(value: Option<Value>) -> Value {
    value.unwrap_or_else(|| serde_json::json!({}))
}

/// Default for absent list-valued payloads.
pub(crate) fn list_or_empty(value: Option<Value>) -> Value {
    value.unwrap_or_else(|| serde_json::json!([]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgersync_common::SyncError;

    #[test]
    fn dispatch_surfaces_missing_identifier() {
        let err = record(EntityKind::Customer, serde_json::json!({ "email": "a@b.co" }))
            .unwrap_err();
        assert!(matches!(err, SyncError::MissingIdentifier(EntityKind::Customer)));
    }

    #[test]
    fn dispatch_produces_the_matching_variant() {
        let rec = record(
            EntityKind::Product,
            serde_json::json!({ "id": "prod_1", "name": "Widget" }),
        )
        .unwrap();
        assert_eq!(rec.kind(), EntityKind::Product);
        assert_eq!(rec.external_id(), "prod_1");
    }
}
