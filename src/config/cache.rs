use std::time::Duration;

use log::info;

use crate::storage::{RedisPool, StoreError};

/// Open a pooled redis client. Fails if no connection can be established
/// within the pool's connection timeout.
pub fn init_redis_client(redis_url: &str, max_size: u32) -> Result<RedisPool, StoreError> {
    info!("Configuring redis pool (max_size={})", max_size);
    let client = redis::Client::open(redis_url)?;
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(5))
        .build(client)?;
    Ok(pool)
}
