//! Source readers
//!
//! A sync run reads raw objects either from the platform's paginated listing
//! API or from a directory of JSON export files, one file per entity kind.

pub mod api;
pub mod files;

use std::path::PathBuf;

pub use api::StripeClient;

/// Where a sync run pulls its raw objects from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncSource {
    /// Remote listing API, paged lazily.
    Api,
    /// Directory with one export file per entity kind
    /// (`customers.json`, `charges.json`, ...).
    Files { dir: PathBuf },
}

impl SyncSource {
    pub fn files(dir: impl Into<PathBuf>) -> Self {
        SyncSource::Files { dir: dir.into() }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, SyncSource::Api)
    }
}

impl std::fmt::Display for SyncSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncSource::Api => write!(f, "api"),
            SyncSource::Files { dir } => write!(f, "files:{}", dir.display()),
        }
    }
}
