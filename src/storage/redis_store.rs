//! Redis-backed person store.
//!
//! Every record is a JSON document stored as one field of a single hash,
//! keyed by the record id. Redis calls are blocking, so each operation checks
//! a connection out of the `r2d2` pool on the blocking thread pool.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::{Commands, Script};

use crate::constants;
use crate::models::person::{PersonDraft, PersonId, PersonRecord};
use crate::storage::{PersonStore, StoreError, StoreResult};

pub type RedisPool = r2d2::Pool<redis::Client>;

const REPLACE_IF_EXISTS: &str = r"
if redis.call('HEXISTS', KEYS[1], ARGV[1]) == 1 then
    redis.call('HSET', KEYS[1], ARGV[1], ARGV[2])
    return 1
end
return 0
";

#[derive(Clone)]
pub struct RedisPersonStore {
    pool: RedisPool,
    key: String,
}

impl RedisPersonStore {
    pub fn new(pool: RedisPool) -> Self {
        Self::with_key(pool, constants::PERSONS_HASH_KEY)
    }

    pub fn with_key(pool: RedisPool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }

    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut redis::Connection, &str) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let key = self.key.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut *conn, &key)
        })
        .await?
    }
}

fn decode(id: &str, raw: &str) -> StoreResult<PersonRecord> {
    serde_json::from_str(raw).map_err(|source| StoreError::Corrupt {
        id: id.to_string(),
        source,
    })
}

#[async_trait]
impl PersonStore for RedisPersonStore {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn find_all(&self) -> StoreResult<Vec<PersonRecord>> {
        self.run(|conn, key| {
            let documents: HashMap<String, String> = conn.hgetall(key)?;
            documents
                .iter()
                .map(|(id, raw)| decode(id, raw))
                .collect()
        })
        .await
    }

    async fn find_by_id(&self, id: PersonId) -> StoreResult<Option<PersonRecord>> {
        self.run(move |conn, key| {
            let field = id.to_string();
            let raw: Option<String> = conn.hget(key, &field)?;
            raw.map(|raw| decode(&field, &raw)).transpose()
        })
        .await
    }

    async fn insert(&self, draft: PersonDraft) -> StoreResult<PersonRecord> {
        self.run(move |conn, key| {
            let record = PersonRecord::from_draft(PersonId::generate(), draft);
            let document = serde_json::to_string(&record)?;
            let created: bool = conn.hset_nx(key, record.id.to_string(), document)?;
            if created {
                Ok(record)
            } else {
                Err(StoreError::IdCollision(record.id))
            }
        })
        .await
    }

    async fn replace(&self, id: PersonId, draft: PersonDraft) -> StoreResult<Option<PersonRecord>> {
        self.run(move |conn, key| {
            let record = PersonRecord::from_draft(id, draft);
            let document = serde_json::to_string(&record)?;
            let replaced: i32 = Script::new(REPLACE_IF_EXISTS)
                .key(key)
                .arg(id.to_string())
                .arg(document)
                .invoke(conn)?;
            Ok((replaced == 1).then_some(record))
        })
        .await
    }

    async fn delete(&self, id: PersonId) -> StoreResult<bool> {
        self.run(move |conn, key| {
            let removed: i64 = conn.hdel(key, id.to_string())?;
            Ok(removed > 0)
        })
        .await
    }

    async fn count(&self) -> StoreResult<usize> {
        self.run(|conn, key| {
            let count: usize = conn.hlen(key)?;
            Ok(count)
        })
        .await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.run(|conn, _| {
            redis::cmd("PING").query::<()>(conn)?;
            Ok(())
        })
        .await
    }
}
