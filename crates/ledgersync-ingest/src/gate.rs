//! Schema gate for file-backed batches
//!
//! Fail-fast guard that runs before any transform or persistence side effect.
//! Remote listings are trusted by construction (the API endpoint determines
//! the type); only file batches pass through here.

use serde_json::Value;
use tracing::info;

use ledgersync_common::{EntityKind, Result, SyncError};

/// Validate a raw export document against the expected entity kind.
///
/// Accepts either a bare array of objects or an envelope with a `data` array.
/// Fails with [`SyncError::SchemaMismatch`] when no data collection is
/// recognizable, the collection is empty, or the first object's `object`
/// discriminator differs from the expected kind.
pub fn validate(doc: &Value, expected: EntityKind) -> Result<Vec<Value>> {
    let objects = match doc {
        Value::Array(items) => items.clone(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.clone(),
            _ => {
                return Err(SyncError::schema_mismatch(
                    expected.discriminator(),
                    "(document without a data array)",
                ))
            },
        },
        _ => {
            return Err(SyncError::schema_mismatch(
                expected.discriminator(),
                "(unrecognized document structure)",
            ))
        },
    };

    if objects.is_empty() {
        return Err(SyncError::schema_mismatch(
            expected.discriminator(),
            "(empty batch)",
        ));
    }

    let actual = objects[0]
        .get("object")
        .and_then(Value::as_str)
        .unwrap_or("(missing discriminator)");

    if actual != expected.discriminator() {
        return Err(SyncError::schema_mismatch(expected.discriminator(), actual));
    }

    info!(
        entity = %expected,
        count = objects.len(),
        "File batch validated"
    );

    Ok(objects)
}

/// Lenient object count for reconciliation checks; never fails on layout.
pub fn count_objects(doc: &Value) -> usize {
    match doc {
        Value::Array(items) => items.len(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.len(),
            _ => usize::from(map.contains_key("id")),
        },
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_bare_array() {
        let doc = json!([{ "object": "customer", "id": "cus_1" }]);
        let objects = validate(&doc, EntityKind::Customer).unwrap();
        assert_eq!(objects.len(), 1);
    }

    #[test]
    fn accepts_data_envelope() {
        let doc = json!({
            "object": "list",
            "data": [{ "object": "charge", "id": "ch_1" }, { "object": "charge", "id": "ch_2" }],
            "has_more": false
        });
        let objects = validate(&doc, EntityKind::Charge).unwrap();
        assert_eq!(objects.len(), 2);
    }

    #[test]
    fn rejects_wrong_discriminator() {
        let doc = json!([{ "object": "charge", "id": "ch_1" }]);
        let err = validate(&doc, EntityKind::Customer).unwrap_err();
        assert!(matches!(
            err,
            SyncError::SchemaMismatch { ref expected, ref actual }
                if expected == "customer" && actual == "charge"
        ));
    }

    #[test]
    fn rejects_empty_batch() {
        assert!(validate(&json!([]), EntityKind::Customer).is_err());
        assert!(validate(&json!({ "data": [] }), EntityKind::Customer).is_err());
    }

    #[test]
    fn rejects_scalar_document() {
        assert!(validate(&json!("nope"), EntityKind::Customer).is_err());
        assert!(validate(&json!({ "object": "customer" }), EntityKind::Customer).is_err());
    }

    #[test]
    fn counts_are_lenient() {
        assert_eq!(count_objects(&json!([1, 2, 3])), 3);
        assert_eq!(count_objects(&json!({ "data": [1] })), 1);
        assert_eq!(count_objects(&json!({ "id": "cus_1" })), 1);
        assert_eq!(count_objects(&json!({ "weird": true })), 0);
        assert_eq!(count_objects(&json!(42)), 0);
    }
}
