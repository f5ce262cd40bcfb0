//! `sync` and `sync-entity` commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use ledgersync_common::EntityKind;
use ledgersync_ingest::config::SyncConfig;
use ledgersync_ingest::db;
use ledgersync_ingest::orchestrator::{EntityReport, SyncRunner};
use ledgersync_ingest::store::{EntityStore, MemoryStore, PgStore};

use super::{to_sync_source, SourceArg};

/// Sync every entity kind in dependency order.
pub async fn run_all(source: SourceArg, dir: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let config = SyncConfig::load()?;
    let sync_source = to_sync_source(source, dir)?;

    let report = if dry_run {
        info!("Dry run: using in-memory store");
        let mut runner = SyncRunner::new(sync_source, MemoryStore::new(), &config)?;
        runner.run_all().await
    } else {
        let pool = db::create_pool(&config.database)
            .await
            .context("Failed to connect to the database")?;
        let mut runner = SyncRunner::new(sync_source, PgStore::new(pool), &config)?;
        runner.run_all().await
    };

    println!("{}", report.summary());
    if dry_run {
        println!("(dry run: nothing was written)");
    }

    Ok(())
}

/// Sync a single entity kind.
pub async fn run_entity(
    kind: EntityKind,
    source: SourceArg,
    dir: Option<PathBuf>,
    file: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let config = SyncConfig::load()?;

    // An explicit file path implies file mode regardless of --source.
    let sync_source = match &file {
        Some(path) => ledgersync_ingest::source::SyncSource::files(
            path.parent().unwrap_or_else(|| std::path::Path::new(".")),
        ),
        None => to_sync_source(source, dir)?,
    };

    let report = if dry_run {
        info!("Dry run: using in-memory store");
        let mut runner = SyncRunner::new(sync_source, MemoryStore::new(), &config)?;
        run_one(&mut runner, kind, file.as_deref()).await?
    } else {
        let pool = db::create_pool(&config.database)
            .await
            .context("Failed to connect to the database")?;
        let mut runner = SyncRunner::new(sync_source, PgStore::new(pool), &config)?;
        run_one(&mut runner, kind, file.as_deref()).await?
    };

    println!(
        "{}: {} added, {} skipped, {} failed ({} placeholders)",
        report.kind, report.added, report.skipped, report.failed, report.placeholders
    );
    if dry_run {
        println!("(dry run: nothing was written)");
    }

    Ok(())
}

async fn run_one<S: EntityStore>(
    runner: &mut SyncRunner<S>,
    kind: EntityKind,
    file: Option<&std::path::Path>,
) -> Result<EntityReport> {
    let report = match file {
        Some(path) => runner.run_entity_from_file(kind, path).await?,
        None => runner.run_entity(kind).await?,
    };
    Ok(report)
}
