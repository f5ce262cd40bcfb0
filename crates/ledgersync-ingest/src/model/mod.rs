//! Normalized records, one per entity kind
//!
//! Field inventories mirror what the upstream platform exports; amounts are
//! integer minor currency units, timestamps are absolute UTC, nested payloads
//! stay opaque JSON. Every kind carries a `deleted` flag: false for real
//! rows, true for placeholder rows synthesized by the reference resolver.

mod charge;
mod customer;
mod invoice;
mod payment_intent;
mod payment_method;
mod price;
mod product;
mod subscription;

pub use charge::ChargeRecord;
pub use customer::CustomerRecord;
pub use invoice::InvoiceRecord;
pub use payment_intent::PaymentIntentRecord;
pub use payment_method::PaymentMethodRecord;
pub use price::PriceRecord;
pub use product::ProductRecord;
pub use subscription::SubscriptionRecord;

use ledgersync_common::EntityKind;

/// A normalized record of any entity kind.
///
/// The engine moves these through the resolve/dedup/stage pipeline without
/// caring which kind they are; the store matches on the variant to pick the
/// target table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Record {
    Customer(CustomerRecord),
    PaymentMethod(PaymentMethodRecord),
    Product(ProductRecord),
    Price(PriceRecord),
    Subscription(SubscriptionRecord),
    Invoice(InvoiceRecord),
    PaymentIntent(PaymentIntentRecord),
    Charge(ChargeRecord),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Customer(_) => EntityKind::Customer,
            Record::PaymentMethod(_) => EntityKind::PaymentMethod,
            Record::Product(_) => EntityKind::Product,
            Record::Price(_) => EntityKind::Price,
            Record::Subscription(_) => EntityKind::Subscription,
            Record::Invoice(_) => EntityKind::Invoice,
            Record::PaymentIntent(_) => EntityKind::PaymentIntent,
            Record::Charge(_) => EntityKind::Charge,
        }
    }

    /// The external primary key.
    pub fn external_id(&self) -> &str {
        match self {
            Record::Customer(r) => &r.id,
            Record::PaymentMethod(r) => &r.id,
            Record::Product(r) => &r.id,
            Record::Price(r) => &r.id,
            Record::Subscription(r) => &r.id,
            Record::Invoice(r) => &r.id,
            Record::PaymentIntent(r) => &r.id,
            Record::Charge(r) => &r.id,
        }
    }

    /// Foreign keys this record carries, as (target kind, optional id) pairs.
    ///
    /// The reference resolver walks these before the record is staged.
    pub fn references(&self) -> Vec<(EntityKind, Option<&str>)> {
        match self {
            Record::Customer(_) | Record::Product(_) => Vec::new(),
            Record::PaymentMethod(r) => {
                vec![(EntityKind::Customer, r.customer_id.as_deref())]
            },
            Record::Price(r) => vec![(EntityKind::Product, r.product_id.as_deref())],
            Record::Subscription(r) => vec![
                (EntityKind::Customer, r.customer_id.as_deref()),
                (EntityKind::Price, r.price_id.as_deref()),
            ],
            Record::Invoice(r) => vec![(EntityKind::Customer, r.customer_id.as_deref())],
            Record::PaymentIntent(r) => vec![
                (EntityKind::Customer, r.customer_id.as_deref()),
                (EntityKind::PaymentMethod, r.payment_method_id.as_deref()),
            ],
            Record::Charge(r) => vec![
                (EntityKind::PaymentIntent, r.payment_intent_id.as_deref()),
                (EntityKind::Invoice, r.invoice_id.as_deref()),
            ],
        }
    }

    /// Synthesize a minimal placeholder row for a missing reference target:
    /// identifier set, `deleted` true, metadata `{"placeholder": true}`,
    /// every descriptive field null.
    pub fn placeholder(kind: EntityKind, id: &str) -> Record {
        match kind {
            EntityKind::Customer => Record::Customer(CustomerRecord::placeholder(id)),
            EntityKind::PaymentMethod => {
                Record::PaymentMethod(PaymentMethodRecord::placeholder(id))
            },
            EntityKind::Product => Record::Product(ProductRecord::placeholder(id)),
            EntityKind::Price => Record::Price(PriceRecord::placeholder(id)),
            EntityKind::Subscription => Record::Subscription(SubscriptionRecord::placeholder(id)),
            EntityKind::Invoice => Record::Invoice(InvoiceRecord::placeholder(id)),
            EntityKind::PaymentIntent => {
                Record::PaymentIntent(PaymentIntentRecord::placeholder(id))
            },
            EntityKind::Charge => Record::Charge(ChargeRecord::placeholder(id)),
        }
    }

    /// True for rows synthesized by the resolver (or deleted upstream).
    pub fn is_deleted(&self) -> bool {
        match self {
            Record::Customer(r) => r.deleted,
            Record::PaymentMethod(r) => r.deleted,
            Record::Product(r) => r.deleted,
            Record::Price(r) => r.deleted,
            Record::Subscription(r) => r.deleted,
            Record::Invoice(r) => r.deleted,
            Record::PaymentIntent(r) => r.deleted,
            Record::Charge(r) => r.deleted,
        }
    }
}

/// Marker payload stamped into a placeholder row's metadata.
pub fn placeholder_metadata() -> serde_json::Value {
    serde_json::json!({ "placeholder": true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_has_marker_and_flag() {
        for kind in EntityKind::DEPENDENCY_ORDER {
            let record = Record::placeholder(kind, "x_1");
            assert_eq!(record.kind(), kind);
            assert_eq!(record.external_id(), "x_1");
            assert!(record.is_deleted());
        }
    }

    #[test]
    fn placeholder_customer_is_bare() {
        let Record::Customer(ghost) = Record::placeholder(EntityKind::Customer, "cus_gone") else {
            panic!("wrong variant");
        };
        assert_eq!(ghost.id, "cus_gone");
        assert!(ghost.deleted);
        assert_eq!(ghost.metadata, placeholder_metadata());
        assert_eq!(ghost.email, None);
        assert_eq!(ghost.name, None);
        assert_eq!(ghost.created, None);
        assert!(!ghost.livemode);
    }

    #[test]
    fn references_follow_the_dependency_graph() {
        let charge = Record::Charge(ChargeRecord::placeholder("ch_1"));
        let kinds: Vec<_> = charge.references().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![EntityKind::PaymentIntent, EntityKind::Invoice]);

        let customer = Record::Customer(CustomerRecord::placeholder("cus_1"));
        assert!(customer.references().is_empty());
    }
}
