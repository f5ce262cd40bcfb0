//! Product transformer

use serde::Deserialize;
use serde_json::Value;

use super::{list_or_empty, object_or_empty};
use crate::model::ProductRecord;
use crate::raw::{epoch_to_datetime, reference_id, Expandable};
use ledgersync_common::{EntityKind, Result, SyncError};

/// Raw product payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub livemode: Option<bool>,
    pub created: Option<i64>,
    pub updated: Option<i64>,
    pub default_price: Option<Expandable>,
    pub tax_code: Option<Expandable>,
    pub unit_label: Option<String>,
    pub statement_descriptor: Option<String>,
    pub url: Option<String>,
    pub images: Option<Value>,
    pub marketing_features: Option<Value>,
    pub metadata: Option<Value>,
    pub package_dimensions: Option<Value>,
    pub shippable: Option<bool>,
}

pub fn transform(raw: RawProduct) -> Result<ProductRecord> {
    let id = raw
        .id
        .ok_or(SyncError::MissingIdentifier(EntityKind::Product))?;

    Ok(ProductRecord {
        id,
        name: raw.name,
        description: raw.description,
        active: raw.active.unwrap_or(true),
        livemode: raw.livemode.unwrap_or(false),
        deleted: false,
        created: epoch_to_datetime(raw.created),
        updated: epoch_to_datetime(raw.updated),
        default_price: reference_id(raw.default_price),
        tax_code: reference_id(raw.tax_code),
        unit_label: raw.unit_label,
        statement_descriptor: raw.statement_descriptor,
        url: raw.url,
        images: list_or_empty(raw.images),
        marketing_features: list_or_empty(raw.marketing_features),
        metadata: object_or_empty(raw.metadata),
        package_dimensions: raw.package_dimensions,
        shippable: raw.shippable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_full_product() {
        let raw: RawProduct = serde_json::from_value(json!({
            "id": "prod_test_1",
            "object": "product",
            "name": "Widget Pro",
            "description": "A widget",
            "active": true,
            "livemode": false,
            "created": 1_690_000_000,
            "updated": 1_695_000_000,
            "default_price": "price_123",
            "images": ["https://img.example/1.png"],
            "metadata": { "tag": "widget_pro" }
        }))
        .unwrap();

        let record = transform(raw).unwrap();
        assert_eq!(record.id, "prod_test_1");
        assert_eq!(record.name.as_deref(), Some("Widget Pro"));
        assert!(record.active);
        assert_eq!(record.default_price.as_deref(), Some("price_123"));
        assert_eq!(record.images, json!(["https://img.example/1.png"]));
        assert_eq!(record.marketing_features, json!([]));
    }

    #[test]
    fn active_defaults_to_true() {
        let raw: RawProduct = serde_json::from_value(json!({ "id": "prod_min" })).unwrap();
        let record = transform(raw).unwrap();
        assert!(record.active);
        assert_eq!(record.created, None);
        assert_eq!(record.updated, None);
    }
}
