//! CLI command implementations

pub mod status;
pub mod sync;
pub mod verify;

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use ledgersync_ingest::source::SyncSource;

/// Source selector exposed on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    /// Remote listing API
    Api,
    /// Local JSON export files
    Files,
}

/// Resolve the CLI flags into an engine source selector.
pub fn to_sync_source(source: SourceArg, dir: Option<PathBuf>) -> Result<SyncSource> {
    match source {
        SourceArg::Api => Ok(SyncSource::Api),
        SourceArg::Files => {
            let dir = dir.ok_or_else(|| {
                anyhow::anyhow!("--dir is required when --source is 'files'")
            })?;
            Ok(SyncSource::files(dir))
        },
    }
}
