//! Ledgersync ingestion engine
//!
//! Pulls billing objects from a Stripe-compatible platform (its listing API
//! or a JSON export directory), normalizes them, and persists them into
//! PostgreSQL with idempotent, first-write-wins semantics.
//!
//! The pipeline for one entity kind is:
//!
//! ```text
//! source reader -> schema gate -> transformer -> reference resolver
//!               -> dedup guard -> store (staged) -> commit
//! ```
//!
//! Entity kinds run strictly sequentially in dependency order so foreign-key
//! targets exist (or are placeholder-backfilled) before anything references
//! them. See [`orchestrator::SyncRunner`] for the entry point.
//!
//! # Example
//!
//! ```no_run
//! use ledgersync_ingest::config::SyncConfig;
//! use ledgersync_ingest::orchestrator::SyncRunner;
//! use ledgersync_ingest::source::SyncSource;
//! use ledgersync_ingest::store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SyncConfig::load()?;
//!     let source = SyncSource::files("./export");
//!     let mut runner = SyncRunner::new(source, MemoryStore::new(), &config)?;
//!     let report = runner.run_all().await;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod db;
pub mod dedup;
pub mod gate;
pub mod model;
pub mod orchestrator;
pub mod raw;
pub mod resolver;
pub mod source;
pub mod store;
pub mod transform;

pub use ledgersync_common::{EntityKind, Result, SyncError};
