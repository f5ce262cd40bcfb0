//! Reference resolver: placeholder synthesis for missing foreign-key targets
//!
//! Referential completeness over referential strictness: a dangling reference
//! is never an error. When a referenced row does not exist (deleted upstream,
//! or the target file was never exported), a minimal placeholder row is staged
//! for it so joins stay structurally valid. The resolver runs before the
//! referencing row is staged, so both land in the same per-kind transaction.

use std::collections::HashSet;

use tracing::warn;

use crate::model::Record;
use crate::store::EntityStore;
use ledgersync_common::{EntityKind, Result};

/// Tracks which (kind, id) targets have been checked during one batch.
///
/// One resolver lives per entity-kind batch: committed rows (including
/// placeholders from earlier batches) are visible through the store, and the
/// seen-set covers targets staged within the current batch.
#[derive(Debug, Default)]
pub struct ReferenceResolver {
    seen: HashSet<(EntityKind, String)>,
    synthesized: u64,
}

impl ReferenceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guarantee a referenced row exists, staging a placeholder when absent.
    ///
    /// `None` ids are a no-op. Idempotent: a target is checked against the
    /// store at most once per batch, and a placeholder is staged at most once.
    pub async fn ensure_exists<S: EntityStore>(
        &mut self,
        store: &mut S,
        kind: EntityKind,
        id: Option<&str>,
    ) -> Result<()> {
        let Some(id) = id else {
            return Ok(());
        };

        if !self.seen.insert((kind, id.to_string())) {
            return Ok(());
        }

        if store.exists(kind, id).await? {
            return Ok(());
        }

        warn!(
            entity = %kind,
            id = %id,
            "Referenced row missing, staging placeholder"
        );
        store.stage(Record::placeholder(kind, id));
        self.synthesized += 1;

        Ok(())
    }

    /// Placeholders staged by this resolver.
    pub fn synthesized(&self) -> u64 {
        self.synthesized
    }
}
