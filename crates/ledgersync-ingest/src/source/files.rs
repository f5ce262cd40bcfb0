//! File-backed source reader

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::gate;
use ledgersync_common::{EntityKind, Result, SyncError};

/// Read and validate one export file for the given entity kind.
///
/// The file is either a bare array of raw objects or an envelope with a
/// `data` array; the schema gate decides which and checks the discriminator.
/// An unreadable file is a hard error for this entity kind only.
pub fn read_batch(path: &Path, expected: EntityKind) -> Result<Vec<Value>> {
    let doc = read_document(path)?;
    gate::validate(&doc, expected)
}

/// Parse an export file without gate validation (reconciliation checks).
pub fn read_document(path: &Path) -> Result<Value> {
    debug!(path = %path.display(), "Reading export file");

    let text = std::fs::read_to_string(path).map_err(|e| {
        SyncError::SourceUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;

    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_enveloped_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "customers.json",
            r#"{ "object": "list", "data": [{ "object": "customer", "id": "cus_1" }] }"#,
        );

        let objects = read_batch(&path, EntityKind::Customer).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0]["id"], json!("cus_1"));
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_batch(&dir.path().join("customers.json"), EntityKind::Customer)
            .unwrap_err();
        assert!(matches!(err, SyncError::SourceUnavailable(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "customers.json", "{ not json");
        let err = read_batch(&path, EntityKind::Customer).unwrap_err();
        assert!(matches!(err, SyncError::Serialization(_)));
    }
}
