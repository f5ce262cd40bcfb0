//! Error types for ledgersync

use thiserror::Error;

use crate::types::EntityKind;

/// Result type alias for ledgersync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Main error type for the ingestion engine.
///
/// `SchemaMismatch` and `MissingIdentifier` are the two validation failures
/// the engine raises on its own; everything else wraps an external collaborator
/// (filesystem, JSON codec, remote listing, database).
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Schema mismatch: expected object type '{expected}', got '{actual}'")]
    SchemaMismatch { expected: String, actual: String },

    #[error("Raw {0} object has no identifier field")]
    MissingIdentifier(EntityKind),

    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl SyncError {
    /// Schema gate failure for a batch whose discriminator does not match.
    pub fn schema_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// True when the error fails a single record rather than a whole batch.
    pub fn is_record_level(&self) -> bool {
        matches!(self, Self::MissingIdentifier(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_message_names_both_types() {
        let err = SyncError::schema_mismatch("customer", "charge");
        let msg = err.to_string();
        assert!(msg.contains("customer"));
        assert!(msg.contains("charge"));
    }

    #[test]
    fn missing_identifier_is_record_level() {
        assert!(SyncError::MissingIdentifier(EntityKind::Charge).is_record_level());
        assert!(!SyncError::schema_mismatch("a", "b").is_record_level());
    }
}
