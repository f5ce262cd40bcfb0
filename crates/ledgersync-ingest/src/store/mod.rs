//! Persistence sink
//!
//! The store buffers staged records in memory and writes a whole entity-kind
//! batch in one commit: if the process dies mid-batch, none of that batch's
//! inserts persist. Rows are never updated or deleted by the engine.

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::model::Record;
use ledgersync_common::{EntityKind, Result};

/// Relational sink for normalized records.
#[async_trait]
pub trait EntityStore: Send {
    /// Fetch one committed row by its external primary key.
    async fn find_by_id(&self, kind: EntityKind, id: &str) -> Result<Option<Record>>;

    /// Cheap existence probe for the reference resolver.
    async fn exists(&self, kind: EntityKind, id: &str) -> Result<bool>;

    /// Snapshot of every committed id of one kind, for the dedup guard.
    async fn existing_ids(&self, kind: EntityKind) -> Result<HashSet<String>>;

    /// Buffer a record for the next commit. No I/O.
    fn stage(&mut self, record: Record);

    /// Write all staged records in one transaction; returns rows inserted.
    async fn commit(&mut self) -> Result<u64>;
}
