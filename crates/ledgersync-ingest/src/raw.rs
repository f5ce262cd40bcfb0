//! Raw-object plumbing shared by every transformer
//!
//! The platform expands reference fields on request, so a reference arrives
//! either as a bare id string or as an embedded object carrying an `id`
//! member. [`Expandable`] models both shapes and collapses them to the bare
//! identifier before storage.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A reference field that is either a bare id or an expanded object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Expandable {
    Id(String),
    Object(ExpandedRef),
}

/// The identifying slice of an expanded object; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpandedRef {
    pub id: String,
}

impl Expandable {
    /// The bare identifier, whichever shape arrived.
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(obj) => &obj.id,
        }
    }

    pub fn into_id(self) -> String {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(obj) => obj.id,
        }
    }
}

/// Collapse an optional dual-shaped reference to an optional bare id.
pub fn reference_id(field: Option<Expandable>) -> Option<String> {
    field.map(Expandable::into_id)
}

/// Convert platform epoch seconds to an absolute UTC timestamp.
///
/// An absent field yields `None`; so does a value outside chrono's
/// representable range. Zero is a valid timestamp (the epoch), not absence.
pub fn epoch_to_datetime(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        customer: Option<Expandable>,
    }

    #[test]
    fn bare_id_deserializes() {
        let holder: Holder = serde_json::from_value(json!({ "customer": "cus_123" })).unwrap();
        assert_eq!(reference_id(holder.customer), Some("cus_123".to_string()));
    }

    #[test]
    fn embedded_object_collapses_to_id() {
        let holder: Holder = serde_json::from_value(json!({
            "customer": { "id": "cus_123", "email": "a@b.co", "livemode": false }
        }))
        .unwrap();
        assert_eq!(reference_id(holder.customer), Some("cus_123".to_string()));
    }

    #[test]
    fn null_and_absent_are_none() {
        let holder: Holder = serde_json::from_value(json!({ "customer": null })).unwrap();
        assert_eq!(reference_id(holder.customer), None);

        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert_eq!(reference_id(holder.customer), None);
    }

    #[test]
    fn epoch_conversion_treats_zero_as_valid() {
        assert_eq!(epoch_to_datetime(None), None);

        let epoch = epoch_to_datetime(Some(0)).unwrap();
        assert_eq!(epoch.timestamp(), 0);

        let ts = epoch_to_datetime(Some(1_700_000_000)).unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
    }
}
