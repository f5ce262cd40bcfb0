//! Postgres store
//!
//! Stages records in memory and writes each entity-kind batch in a single
//! transaction. Tables are created externally (schema migration is out of
//! scope); primary keys are the external string ids, nested payloads are
//! JSONB, foreign key columns are nullable text.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use super::EntityStore;
use crate::model::{
    ChargeRecord, CustomerRecord, InvoiceRecord, PaymentIntentRecord, PaymentMethodRecord,
    PriceRecord, ProductRecord, Record, SubscriptionRecord,
};
use ledgersync_common::{EntityKind, Result, SyncError};

/// Relational sink backed by a sqlx Postgres pool.
#[derive(Debug)]
pub struct PgStore {
    pool: PgPool,
    staged: Vec<Record>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            staged: Vec::new(),
        }
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn find_by_id(&self, kind: EntityKind, id: &str) -> Result<Option<Record>> {
        let query = format!("SELECT * FROM {} WHERE id = $1", kind.table());

        let record = match kind {
            EntityKind::Customer => sqlx::query_as::<_, CustomerRecord>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?
                .map(Record::Customer),
            EntityKind::PaymentMethod => sqlx::query_as::<_, PaymentMethodRecord>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?
                .map(Record::PaymentMethod),
            EntityKind::Product => sqlx::query_as::<_, ProductRecord>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?
                .map(Record::Product),
            EntityKind::Price => sqlx::query_as::<_, PriceRecord>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?
                .map(Record::Price),
            EntityKind::Subscription => sqlx::query_as::<_, SubscriptionRecord>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?
                .map(Record::Subscription),
            EntityKind::Invoice => sqlx::query_as::<_, InvoiceRecord>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?
                .map(Record::Invoice),
            EntityKind::PaymentIntent => sqlx::query_as::<_, PaymentIntentRecord>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?
                .map(Record::PaymentIntent),
            EntityKind::Charge => sqlx::query_as::<_, ChargeRecord>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?
                .map(Record::Charge),
        };

        Ok(record)
    }

    async fn exists(&self, kind: EntityKind, id: &str) -> Result<bool> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", kind.table());
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn existing_ids(&self, kind: EntityKind) -> Result<HashSet<String>> {
        let query = format!("SELECT id FROM {}", kind.table());
        let ids = sqlx::query_scalar::<_, String>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(ids.into_iter().collect())
    }

    fn stage(&mut self, record: Record) {
        self.staged.push(record);
    }

    async fn commit(&mut self) -> Result<u64> {
        if self.staged.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let mut inserted = 0;

        for record in self.staged.drain(..) {
            let id = record.external_id().to_string();
            let kind = record.kind();

            insert_record(&mut tx, record).await.map_err(|e| {
                SyncError::Database(format!("insert {} '{}' failed: {}", kind, id, e))
            })?;
            inserted += 1;
        }

        tx.commit().await.map_err(db_err)?;
        debug!(rows = inserted, "Batch transaction committed");

        Ok(inserted)
    }
}

fn db_err(e: sqlx::Error) -> SyncError {
    SyncError::Database(e.to_string())
}

async fn insert_record(tx: &mut Transaction<'_, Postgres>, record: Record) -> sqlx::Result<()> {
    match record {
        Record::Customer(r) => insert_customer(tx, r).await,
        Record::PaymentMethod(r) => insert_payment_method(tx, r).await,
        Record::Product(r) => insert_product(tx, r).await,
        Record::Price(r) => insert_price(tx, r).await,
        Record::Subscription(r) => insert_subscription(tx, r).await,
        Record::Invoice(r) => insert_invoice(tx, r).await,
        Record::PaymentIntent(r) => insert_payment_intent(tx, r).await,
        Record::Charge(r) => insert_charge(tx, r).await,
    }
}

async fn insert_customer(
    tx: &mut Transaction<'_, Postgres>,
    r: CustomerRecord,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO customers (
            id, email, name, description, phone,
            balance, currency, delinquent, livemode, deleted, created,
            invoice_prefix, next_invoice_sequence,
            address, shipping, invoice_settings, metadata, tax_exempt
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        "#,
    )
    .bind(r.id)
    .bind(r.email)
    .bind(r.name)
    .bind(r.description)
    .bind(r.phone)
    .bind(r.balance)
    .bind(r.currency)
    .bind(r.delinquent)
    .bind(r.livemode)
    .bind(r.deleted)
    .bind(r.created)
    .bind(r.invoice_prefix)
    .bind(r.next_invoice_sequence)
    .bind(r.address)
    .bind(r.shipping)
    .bind(r.invoice_settings)
    .bind(r.metadata)
    .bind(r.tax_exempt)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_payment_method(
    tx: &mut Transaction<'_, Postgres>,
    r: PaymentMethodRecord,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO payment_methods (
            id, type, created, livemode, deleted, customer_id,
            billing_details, metadata, us_bank_account, card
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(r.id)
    .bind(r.method_type)
    .bind(r.created)
    .bind(r.livemode)
    .bind(r.deleted)
    .bind(r.customer_id)
    .bind(r.billing_details)
    .bind(r.metadata)
    .bind(r.us_bank_account)
    .bind(r.card)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_product(tx: &mut Transaction<'_, Postgres>, r: ProductRecord) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO products (
            id, name, description, active, livemode, deleted, created, updated,
            default_price, tax_code, unit_label, statement_descriptor, url,
            images, marketing_features, metadata, package_dimensions, shippable
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        "#,
    )
    .bind(r.id)
    .bind(r.name)
    .bind(r.description)
    .bind(r.active)
    .bind(r.livemode)
    .bind(r.deleted)
    .bind(r.created)
    .bind(r.updated)
    .bind(r.default_price)
    .bind(r.tax_code)
    .bind(r.unit_label)
    .bind(r.statement_descriptor)
    .bind(r.url)
    .bind(r.images)
    .bind(r.marketing_features)
    .bind(r.metadata)
    .bind(r.package_dimensions)
    .bind(r.shippable)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_price(tx: &mut Transaction<'_, Postgres>, r: PriceRecord) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO prices (
            id, active, currency, billing_scheme, type,
            unit_amount, unit_amount_decimal, product_id, recurring,
            livemode, deleted, created, nickname, lookup_key, metadata,
            tax_behavior, tiers_mode, custom_unit_amount, transform_quantity
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
        "#,
    )
    .bind(r.id)
    .bind(r.active)
    .bind(r.currency)
    .bind(r.billing_scheme)
    .bind(r.price_type)
    .bind(r.unit_amount)
    .bind(r.unit_amount_decimal)
    .bind(r.product_id)
    .bind(r.recurring)
    .bind(r.livemode)
    .bind(r.deleted)
    .bind(r.created)
    .bind(r.nickname)
    .bind(r.lookup_key)
    .bind(r.metadata)
    .bind(r.tax_behavior)
    .bind(r.tiers_mode)
    .bind(r.custom_unit_amount)
    .bind(r.transform_quantity)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_subscription(
    tx: &mut Transaction<'_, Postgres>,
    r: SubscriptionRecord,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO subscriptions (
            id, status, currency, customer_id, price_id,
            subscription_item_id, plan_interval,
            start_date, created, cancel_at, canceled_at, ended_at,
            cancel_at_period_end, livemode, deleted,
            metadata, items, invoice_settings, automatic_tax,
            payment_settings, trial_settings, latest_invoice
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22)
        "#,
    )
    .bind(r.id)
    .bind(r.status)
    .bind(r.currency)
    .bind(r.customer_id)
    .bind(r.price_id)
    .bind(r.subscription_item_id)
    .bind(r.plan_interval)
    .bind(r.start_date)
    .bind(r.created)
    .bind(r.cancel_at)
    .bind(r.canceled_at)
    .bind(r.ended_at)
    .bind(r.cancel_at_period_end)
    .bind(r.livemode)
    .bind(r.deleted)
    .bind(r.metadata)
    .bind(r.items)
    .bind(r.invoice_settings)
    .bind(r.automatic_tax)
    .bind(r.payment_settings)
    .bind(r.trial_settings)
    .bind(r.latest_invoice)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_invoice(tx: &mut Transaction<'_, Postgres>, r: InvoiceRecord) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO invoices (
            id, customer_id, status, billing_reason, collection_method,
            currency, amount_due, amount_paid, amount_remaining, total, subtotal,
            created, period_start, period_end,
            livemode, auto_advance, attempted, attempt_count, deleted,
            hosted_invoice_url, invoice_pdf, number, receipt_number,
            metadata, lines, discounts, automatic_tax, payment_settings,
            shipping_cost, status_transitions
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30)
        "#,
    )
    .bind(r.id)
    .bind(r.customer_id)
    .bind(r.status)
    .bind(r.billing_reason)
    .bind(r.collection_method)
    .bind(r.currency)
    .bind(r.amount_due)
    .bind(r.amount_paid)
    .bind(r.amount_remaining)
    .bind(r.total)
    .bind(r.subtotal)
    .bind(r.created)
    .bind(r.period_start)
    .bind(r.period_end)
    .bind(r.livemode)
    .bind(r.auto_advance)
    .bind(r.attempted)
    .bind(r.attempt_count)
    .bind(r.deleted)
    .bind(r.hosted_invoice_url)
    .bind(r.invoice_pdf)
    .bind(r.number)
    .bind(r.receipt_number)
    .bind(r.metadata)
    .bind(r.lines)
    .bind(r.discounts)
    .bind(r.automatic_tax)
    .bind(r.payment_settings)
    .bind(r.shipping_cost)
    .bind(r.status_transitions)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_payment_intent(
    tx: &mut Transaction<'_, Postgres>,
    r: PaymentIntentRecord,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO payment_intents (
            id, status, currency, amount, amount_capturable, amount_received,
            capture_method, confirmation_method, client_secret,
            created, canceled_at, cancellation_reason, livemode, deleted,
            customer_id, payment_method_id, description, receipt_email,
            payment_method_types, payment_method_options, amount_details,
            metadata, next_action, statement_descriptor,
            statement_descriptor_suffix, setup_future_usage
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26)
        "#,
    )
    .bind(r.id)
    .bind(r.status)
    .bind(r.currency)
    .bind(r.amount)
    .bind(r.amount_capturable)
    .bind(r.amount_received)
    .bind(r.capture_method)
    .bind(r.confirmation_method)
    .bind(r.client_secret)
    .bind(r.created)
    .bind(r.canceled_at)
    .bind(r.cancellation_reason)
    .bind(r.livemode)
    .bind(r.deleted)
    .bind(r.customer_id)
    .bind(r.payment_method_id)
    .bind(r.description)
    .bind(r.receipt_email)
    .bind(r.payment_method_types)
    .bind(r.payment_method_options)
    .bind(r.amount_details)
    .bind(r.metadata)
    .bind(r.next_action)
    .bind(r.statement_descriptor)
    .bind(r.statement_descriptor_suffix)
    .bind(r.setup_future_usage)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_charge(tx: &mut Transaction<'_, Postgres>, r: ChargeRecord) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO charges (
            id, amount, amount_captured, amount_refunded, currency, status,
            paid, captured, disputed, refunded, created, livemode, deleted,
            payment_intent_id, payment_method,
            receipt_url, receipt_email, receipt_number,
            billing_details, outcome, payment_method_details, metadata, fraud_details,
            description, statement_descriptor, statement_descriptor_suffix,
            balance_transaction, invoice_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28)
        "#,
    )
    .bind(r.id)
    .bind(r.amount)
    .bind(r.amount_captured)
    .bind(r.amount_refunded)
    .bind(r.currency)
    .bind(r.status)
    .bind(r.paid)
    .bind(r.captured)
    .bind(r.disputed)
    .bind(r.refunded)
    .bind(r.created)
    .bind(r.livemode)
    .bind(r.deleted)
    .bind(r.payment_intent_id)
    .bind(r.payment_method)
    .bind(r.receipt_url)
    .bind(r.receipt_email)
    .bind(r.receipt_number)
    .bind(r.billing_details)
    .bind(r.outcome)
    .bind(r.payment_method_details)
    .bind(r.metadata)
    .bind(r.fraud_details)
    .bind(r.description)
    .bind(r.statement_descriptor)
    .bind(r.statement_descriptor_suffix)
    .bind(r.balance_transaction)
    .bind(r.invoice_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
