//! In-memory store
//!
//! Backs `--dry-run` mode and the scenario tests: same staging and commit
//! semantics as the Postgres store, no database.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;

use super::EntityStore;
use crate::model::Record;
use ledgersync_common::{EntityKind, Result};

/// A store keeping committed rows in per-kind ordered maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: HashMap<EntityKind, BTreeMap<String, Record>>,
    staged: Vec<Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed rows of one kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.committed.get(&kind).map_or(0, BTreeMap::len)
    }

    /// Total committed rows across all kinds.
    pub fn total(&self) -> usize {
        self.committed.values().map(BTreeMap::len).sum()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_by_id(&self, kind: EntityKind, id: &str) -> Result<Option<Record>> {
        Ok(self
            .committed
            .get(&kind)
            .and_then(|rows| rows.get(id))
            .cloned())
    }

    async fn exists(&self, kind: EntityKind, id: &str) -> Result<bool> {
        Ok(self
            .committed
            .get(&kind)
            .is_some_and(|rows| rows.contains_key(id)))
    }

    async fn existing_ids(&self, kind: EntityKind) -> Result<HashSet<String>> {
        Ok(self
            .committed
            .get(&kind)
            .map(|rows| rows.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn stage(&mut self, record: Record) {
        self.staged.push(record);
    }

    async fn commit(&mut self) -> Result<u64> {
        let mut inserted = 0;
        for record in self.staged.drain(..) {
            let rows = self.committed.entry(record.kind()).or_default();
            // First write wins, mirroring the relational primary key.
            if let std::collections::btree_map::Entry::Vacant(slot) =
                rows.entry(record.external_id().to_string())
            {
                slot.insert(record);
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerRecord, Record};

    #[tokio::test]
    async fn staged_rows_are_invisible_until_commit() {
        let mut store = MemoryStore::new();
        store.stage(Record::Customer(CustomerRecord::placeholder("cus_1")));

        assert!(!store.exists(EntityKind::Customer, "cus_1").await.unwrap());
        assert_eq!(store.commit().await.unwrap(), 1);
        assert!(store.exists(EntityKind::Customer, "cus_1").await.unwrap());
        assert_eq!(store.count(EntityKind::Customer), 1);
    }

    #[tokio::test]
    async fn first_write_wins_on_commit() {
        let mut store = MemoryStore::new();

        let mut first = CustomerRecord::placeholder("cus_1");
        first.email = Some("first@example.com".to_string());
        store.stage(Record::Customer(first.clone()));
        store.commit().await.unwrap();

        let mut second = CustomerRecord::placeholder("cus_1");
        second.email = Some("second@example.com".to_string());
        store.stage(Record::Customer(second));
        assert_eq!(store.commit().await.unwrap(), 0);

        let found = store
            .find_by_id(EntityKind::Customer, "cus_1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, Record::Customer(first));
    }
}
