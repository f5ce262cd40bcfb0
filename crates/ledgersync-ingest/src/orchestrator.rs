//! Sync orchestrator
//!
//! Drives entity kinds strictly sequentially in dependency order; within one
//! kind, records flow read -> gate (file mode) -> transform -> resolve
//! references -> dedup-check -> stage, then the whole batch commits at once.
//! A kind that cannot run at all is recorded in the run report and the run
//! continues with the next kind: best-effort, no retry, no cross-kind abort.
//! Idempotent ingestion makes partial runs safely re-runnable.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::SyncConfig;
use crate::dedup::DedupGuard;
use crate::resolver::ReferenceResolver;
use crate::source::{files, StripeClient, SyncSource};
use crate::store::EntityStore;
use crate::transform;
use ledgersync_common::{EntityKind, Result, SyncError};

/// Runs sync batches against one source and one store.
pub struct SyncRunner<S: EntityStore> {
    source: SyncSource,
    client: Option<StripeClient>,
    store: S,
}

impl<S: EntityStore> SyncRunner<S> {
    /// Build a runner; API-backed sources need a configured key.
    pub fn new(source: SyncSource, store: S, config: &SyncConfig) -> Result<Self> {
        let client = match source {
            SyncSource::Api => Some(StripeClient::new(&config.stripe)?),
            SyncSource::Files { .. } => None,
        };

        Ok(Self {
            source,
            client,
            store,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Sync every entity kind in dependency order.
    pub async fn run_all(&mut self) -> RunReport {
        let mut report = RunReport::new(self.source.to_string());
        info!(run_id = %report.run_id, source = %self.source, "Starting sync run");

        for kind in EntityKind::DEPENDENCY_ORDER {
            match self.run_entity(kind).await {
                Ok(outcome) => {
                    report.entities.push(EntityOutcome::Completed(outcome));
                },
                Err(e) => {
                    error!(entity = %kind, error = %e, "Entity sync failed, continuing with next kind");
                    report.entities.push(EntityOutcome::Failed {
                        kind,
                        reason: e.to_string(),
                    });
                },
            }
        }

        info!(
            run_id = %report.run_id,
            added = report.total_added(),
            skipped = report.total_skipped(),
            failed_entities = report.failed_entities(),
            "Sync run finished"
        );

        report
    }

    /// Sync one entity kind from the configured source.
    pub async fn run_entity(&mut self, kind: EntityKind) -> Result<EntityReport> {
        let raw = match &self.source {
            SyncSource::Api => {
                let client = self
                    .client
                    .as_ref()
                    .ok_or_else(|| SyncError::Config("remote client not configured".to_string()))?;
                client.list_all(kind).await?
            },
            SyncSource::Files { dir } => files::read_batch(&dir.join(kind.file_name()), kind)?,
        };

        self.ingest_batch(kind, raw).await
    }

    /// Sync one entity kind from an explicit export file.
    pub async fn run_entity_from_file(
        &mut self,
        kind: EntityKind,
        path: &Path,
    ) -> Result<EntityReport> {
        let raw = files::read_batch(path, kind)?;
        self.ingest_batch(kind, raw).await
    }

    async fn ingest_batch(&mut self, kind: EntityKind, raw: Vec<Value>) -> Result<EntityReport> {
        let total = raw.len() as u64;
        info!(entity = %kind, total = total, "Ingesting batch");

        let mut guard = DedupGuard::new(self.store.existing_ids(kind).await?);
        let mut resolver = ReferenceResolver::new();
        let mut added = 0u64;
        let mut failed = 0u64;

        for value in raw {
            // A record that cannot be transformed (missing id, malformed
            // shape) fails alone; the batch keeps going.
            let record = match transform::record(kind, value) {
                Ok(record) => record,
                Err(e) => {
                    warn!(entity = %kind, error = %e, "Skipping record");
                    failed += 1;
                    continue;
                },
            };

            for (ref_kind, ref_id) in record.references() {
                resolver.ensure_exists(&mut self.store, ref_kind, ref_id).await?;
            }

            if !guard.admit(record.external_id()) {
                continue;
            }

            self.store.stage(record);
            added += 1;
        }

        self.store.commit().await?;

        let report = EntityReport {
            kind,
            total,
            added,
            skipped: guard.skipped(),
            failed,
            placeholders: resolver.synthesized(),
        };

        info!(
            entity = %kind,
            added = report.added,
            skipped = report.skipped,
            failed = report.failed,
            placeholders = report.placeholders,
            "Entity batch committed"
        );

        Ok(report)
    }
}

/// Counts for one successfully committed entity-kind batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityReport {
    pub kind: EntityKind,
    /// Raw objects read from the source.
    pub total: u64,
    /// New rows staged and committed.
    pub added: u64,
    /// Records skipped as already-present duplicates.
    pub skipped: u64,
    /// Records that failed transformation.
    pub failed: u64,
    /// Placeholder rows synthesized for missing reference targets.
    pub placeholders: u64,
}

/// Per-kind outcome inside a run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOutcome {
    Completed(EntityReport),
    Failed { kind: EntityKind, reason: String },
}

/// Aggregated result of one sync run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub source: String,
    pub entities: Vec<EntityOutcome>,
}

impl RunReport {
    fn new(source: String) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            source,
            entities: Vec::new(),
        }
    }

    pub fn total_added(&self) -> u64 {
        self.completed().map(|r| r.added).sum()
    }

    pub fn total_skipped(&self) -> u64 {
        self.completed().map(|r| r.skipped).sum()
    }

    pub fn total_placeholders(&self) -> u64 {
        self.completed().map(|r| r.placeholders).sum()
    }

    pub fn failed_entities(&self) -> usize {
        self.entities
            .iter()
            .filter(|o| matches!(o, EntityOutcome::Failed { .. }))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_entities() == 0
    }

    /// One line per entity kind, suitable for terminal output.
    pub fn summary(&self) -> String {
        let mut lines = Vec::with_capacity(self.entities.len() + 1);
        for outcome in &self.entities {
            match outcome {
                EntityOutcome::Completed(r) => lines.push(format!(
                    "{:<16} {} added, {} skipped, {} failed ({} placeholders)",
                    r.kind.to_string(),
                    r.added,
                    r.skipped,
                    r.failed,
                    r.placeholders
                )),
                EntityOutcome::Failed { kind, reason } => {
                    lines.push(format!("{:<16} FAILED: {}", kind.to_string(), reason))
                },
            }
        }
        lines.push(format!(
            "total: {} added, {} skipped, {} placeholders, {} entity failures",
            self.total_added(),
            self.total_skipped(),
            self.total_placeholders(),
            self.failed_entities()
        ));
        lines.join("\n")
    }

    fn completed(&self) -> impl Iterator<Item = &EntityReport> {
        self.entities.iter().filter_map(|o| match o {
            EntityOutcome::Completed(r) => Some(r),
            EntityOutcome::Failed { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn file_runner(dir: &Path) -> SyncRunner<MemoryStore> {
        SyncRunner::new(
            SyncSource::files(dir),
            MemoryStore::new(),
            &SyncConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_id_fails_only_that_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = file_runner(dir.path());

        let batch = vec![
            json!({ "object": "customer", "id": "cus_1", "email": "a@b.co" }),
            json!({ "object": "customer", "email": "no-id@b.co" }),
            json!({ "object": "customer", "id": "cus_2" }),
        ];

        let report = runner
            .ingest_batch(EntityKind::Customer, batch)
            .await
            .unwrap();

        assert_eq!(report.added, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(runner.store().count(EntityKind::Customer), 2);
    }

    #[tokio::test]
    async fn duplicate_within_batch_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = file_runner(dir.path());

        let batch = vec![
            json!({ "object": "customer", "id": "cus_1", "email": "first@b.co" }),
            json!({ "object": "customer", "id": "cus_1", "email": "second@b.co" }),
        ];

        let report = runner
            .ingest_batch(EntityKind::Customer, batch)
            .await
            .unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(runner.store().count(EntityKind::Customer), 1);
    }

    #[test]
    fn summary_lists_failures() {
        let mut report = RunReport::new("files:/tmp/export".to_string());
        report.entities.push(EntityOutcome::Completed(EntityReport {
            kind: EntityKind::Customer,
            total: 3,
            added: 2,
            skipped: 1,
            failed: 0,
            placeholders: 0,
        }));
        report.entities.push(EntityOutcome::Failed {
            kind: EntityKind::Charge,
            reason: "cannot read charges.json".to_string(),
        });

        let summary = report.summary();
        assert!(summary.contains("customer"));
        assert!(summary.contains("2 added"));
        assert!(summary.contains("FAILED: cannot read charges.json"));
        assert!(!report.is_success());
        assert_eq!(report.total_added(), 2);
    }
}
