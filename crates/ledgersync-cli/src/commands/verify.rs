//! `verify` command: reconcile export file counts with database row counts

use std::path::PathBuf;

use anyhow::{Context, Result};

use ledgersync_common::EntityKind;
use ledgersync_ingest::config::SyncConfig;
use ledgersync_ingest::source::files;
use ledgersync_ingest::{db, gate};

/// Compare object counts in each export file against `COUNT(*)` of the
/// corresponding table. Lenient about file layout; a missing file is
/// reported, not fatal.
pub async fn run(dir: PathBuf) -> Result<()> {
    let config = SyncConfig::load()?;
    let pool = db::create_pool(&config.database)
        .await
        .context("Failed to connect to the database")?;

    println!("Comparing {} with database row counts\n", dir.display());

    let mut mismatches = 0usize;

    for kind in EntityKind::DEPENDENCY_ORDER {
        let path = dir.join(kind.file_name());

        let file_count = match files::read_document(&path) {
            Ok(doc) => Some(gate::count_objects(&doc)),
            Err(_) => None,
        };

        let query = format!("SELECT COUNT(*) FROM {}", kind.table());
        let db_count: i64 = sqlx::query_scalar(&query)
            .fetch_one(&pool)
            .await
            .with_context(|| format!("Failed to count rows in {}", kind.table()))?;

        match file_count {
            Some(file_count) => {
                let matches = file_count as i64 == db_count;
                if !matches {
                    mismatches += 1;
                }
                println!(
                    "{} {:<18} file: {:<6} db: {}",
                    if matches { "ok      " } else { "MISMATCH" },
                    kind.table(),
                    file_count,
                    db_count
                );
            },
            None => println!(
                "-        {:<18} file: {:<6} db: {}",
                kind.table(),
                "n/a",
                db_count
            ),
        }
    }

    println!();
    if mismatches == 0 {
        println!("All present files match their tables.");
    } else {
        println!("{} table(s) differ from their export files.", mismatches);
    }

    Ok(())
}
