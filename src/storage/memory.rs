use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::person::{PersonDraft, PersonId, PersonRecord};
use crate::storage::{PersonStore, StoreError, StoreResult};

/// Process-local store. Keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryPersonStore {
    records: RwLock<Vec<PersonRecord>>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PersonRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl PersonStore for InMemoryPersonStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self) -> StoreResult<Vec<PersonRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: PersonId) -> StoreResult<Option<PersonRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn insert(&self, draft: PersonDraft) -> StoreResult<PersonRecord> {
        let mut records = self.records.write().await;
        let id = PersonId::generate();
        if records.iter().any(|record| record.id == id) {
            return Err(StoreError::IdCollision(id));
        }
        let record = PersonRecord::from_draft(id, draft);
        records.push(record.clone());
        Ok(record)
    }

    async fn replace(&self, id: PersonId, draft: PersonDraft) -> StoreResult<Option<PersonRecord>> {
        let mut records = self.records.write().await;
        Ok(records
            .iter_mut()
            .find(|record| record.id == id)
            .map(|slot| {
                *slot = PersonRecord::from_draft(id, draft);
                slot.clone()
            }))
    }

    async fn delete(&self, id: PersonId) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() != before)
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.records.read().await.len())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(content: &str, number: &str) -> PersonDraft {
        PersonDraft {
            content: content.to_string(),
            number: number.to_string(),
        }
    }

    #[actix_rt::test]
    async fn insert_assigns_fresh_ids() {
        let store = InMemoryPersonStore::new();
        let alice = store.insert(draft("Alice", "12-34567")).await.unwrap();
        let bob = store.insert(draft("Bob", "123-45678")).await.unwrap();

        assert_ne!(alice.id, bob.id);
        assert_eq!(alice.content, "Alice");
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.find_all().await.unwrap(), vec![alice, bob]);
    }

    #[actix_rt::test]
    async fn replace_only_touches_existing_records() {
        let store = InMemoryPersonStore::new();
        let alice = store.insert(draft("Alice", "12-34567")).await.unwrap();

        let updated = store
            .replace(alice.id, draft("Alice Updated", "12-76543"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, alice.id);
        assert_eq!(store.find_by_id(alice.id).await.unwrap(), Some(updated));

        let missing = store
            .replace(PersonId::generate(), draft("Ghost", "12-34567"))
            .await
            .unwrap();
        assert!(missing.is_none());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[actix_rt::test]
    async fn delete_is_idempotent() {
        let store = InMemoryPersonStore::new();
        let alice = store.insert(draft("Alice", "12-34567")).await.unwrap();

        assert!(store.delete(alice.id).await.unwrap());
        assert!(!store.delete(alice.id).await.unwrap());
        assert_eq!(store.find_by_id(alice.id).await.unwrap(), None);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
