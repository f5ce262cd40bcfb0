//! Common types used across ledgersync

use serde::{Deserialize, Serialize};

/// The eight billing entity kinds the engine knows how to ingest.
///
/// The order of [`EntityKind::DEPENDENCY_ORDER`] is a correctness requirement:
/// later kinds reference earlier ones by identifier, so targets are committed
/// (or placeholder-backfilled) before anything points at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    PaymentMethod,
    Product,
    Price,
    Subscription,
    Invoice,
    PaymentIntent,
    Charge,
}

impl EntityKind {
    /// All kinds in dependency-safe ingestion order.
    pub const DEPENDENCY_ORDER: [EntityKind; 8] = [
        EntityKind::Customer,
        EntityKind::PaymentMethod,
        EntityKind::Product,
        EntityKind::Price,
        EntityKind::Subscription,
        EntityKind::Invoice,
        EntityKind::PaymentIntent,
        EntityKind::Charge,
    ];

    /// The `object` discriminator value the platform stamps on raw payloads.
    pub fn discriminator(self) -> &'static str {
        match self {
            EntityKind::Customer => "customer",
            EntityKind::PaymentMethod => "payment_method",
            EntityKind::Product => "product",
            EntityKind::Price => "price",
            EntityKind::Subscription => "subscription",
            EntityKind::Invoice => "invoice",
            EntityKind::PaymentIntent => "payment_intent",
            EntityKind::Charge => "charge",
        }
    }

    /// Table holding normalized rows of this kind.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Customer => "customers",
            EntityKind::PaymentMethod => "payment_methods",
            EntityKind::Product => "products",
            EntityKind::Price => "prices",
            EntityKind::Subscription => "subscriptions",
            EntityKind::Invoice => "invoices",
            EntityKind::PaymentIntent => "payment_intents",
            EntityKind::Charge => "charges",
        }
    }

    /// Export file name used in file-backed sync mode.
    pub fn file_name(self) -> &'static str {
        match self {
            EntityKind::Customer => "customers.json",
            EntityKind::PaymentMethod => "payment_methods.json",
            EntityKind::Product => "products.json",
            EntityKind::Price => "prices.json",
            EntityKind::Subscription => "subscriptions.json",
            EntityKind::Invoice => "invoices.json",
            EntityKind::PaymentIntent => "payment_intents.json",
            EntityKind::Charge => "charges.json",
        }
    }

    /// REST collection path segment for the remote listing API.
    pub fn collection(self) -> &'static str {
        self.table()
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.discriminator())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "customer" => Ok(EntityKind::Customer),
            "payment_method" => Ok(EntityKind::PaymentMethod),
            "product" => Ok(EntityKind::Product),
            "price" => Ok(EntityKind::Price),
            "subscription" => Ok(EntityKind::Subscription),
            "invoice" => Ok(EntityKind::Invoice),
            "payment_intent" => Ok(EntityKind::PaymentIntent),
            "charge" => Ok(EntityKind::Charge),
            other => Err(anyhow::anyhow!("Unknown entity kind: {}", other)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn dependency_order_covers_every_kind_once() {
        let mut seen = std::collections::HashSet::new();
        for kind in EntityKind::DEPENDENCY_ORDER {
            assert!(seen.insert(kind), "{} appears twice", kind);
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn referenced_kinds_come_before_referencing_kinds() {
        let position = |kind: EntityKind| {
            EntityKind::DEPENDENCY_ORDER
                .iter()
                .position(|k| *k == kind)
                .unwrap()
        };

        // Subscription → Customer, Price; Invoice → Customer;
        // PaymentIntent → Customer, PaymentMethod; Charge → PaymentIntent, Invoice;
        // Price → Product; PaymentMethod → Customer.
        assert!(position(EntityKind::Customer) < position(EntityKind::Subscription));
        assert!(position(EntityKind::Price) < position(EntityKind::Subscription));
        assert!(position(EntityKind::Customer) < position(EntityKind::Invoice));
        assert!(position(EntityKind::Customer) < position(EntityKind::PaymentIntent));
        assert!(position(EntityKind::PaymentMethod) < position(EntityKind::PaymentIntent));
        assert!(position(EntityKind::PaymentIntent) < position(EntityKind::Charge));
        assert!(position(EntityKind::Invoice) < position(EntityKind::Charge));
        assert!(position(EntityKind::Product) < position(EntityKind::Price));
    }

    #[test]
    fn from_str_round_trips_discriminators() {
        for kind in EntityKind::DEPENDENCY_ORDER {
            let parsed: EntityKind = kind.discriminator().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("refund".parse::<EntityKind>().is_err());
    }

    #[test]
    fn file_names_match_tables() {
        for kind in EntityKind::DEPENDENCY_ORDER {
            assert_eq!(kind.file_name(), format!("{}.json", kind.table()));
        }
    }
}
