//! Person persistence capability.
//!
//! Stores are dumb: they assign ids and keep whatever draft they are handed.
//! Field rules are enforced by the service before a draft gets here.

pub mod memory;
pub mod redis_store;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ServiceError;
use crate::models::person::{PersonDraft, PersonId, PersonRecord};

pub use memory::InMemoryPersonStore;
pub use redis_store::{RedisPersonStore, RedisPool};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("stored document {id} is corrupt: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("generated id {0} already exists")]
    IdCollision(PersonId),
    #[error("blocking store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::internal_server_error(err.to_string()).with_tag("store")
    }
}

#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    async fn find_all(&self) -> StoreResult<Vec<PersonRecord>>;

    async fn find_by_id(&self, id: PersonId) -> StoreResult<Option<PersonRecord>>;

    /// Persist a draft under a freshly generated id.
    async fn insert(&self, draft: PersonDraft) -> StoreResult<PersonRecord>;

    /// Replace an existing record; `None` when the id is absent.
    async fn replace(&self, id: PersonId, draft: PersonDraft) -> StoreResult<Option<PersonRecord>>;

    /// Remove a record. Returns whether anything was removed.
    async fn delete(&self, id: PersonId) -> StoreResult<bool>;

    async fn count(&self) -> StoreResult<usize>;

    async fn ping(&self) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn store_errors_become_internal_faults() {
        let err = StoreError::IdCollision(PersonId::generate());
        let service_error = ServiceError::from(err);
        assert_eq!(service_error.kind(), &FailureKind::InternalFault);
        assert_eq!(service_error.context().tag(), Some("store"));
        assert!(service_error
            .context()
            .detail()
            .is_some_and(|detail| detail.contains("already exists")));
    }
}
