//! Redis shared cache implementation.

use std::time::Duration;

use fred::prelude::*;
use global_lock_core::error::{LockError, LockResult};
use global_lock_core::traits::SharedCache;
use tracing::instrument;

/// Redis-backed [`SharedCache`].
///
/// `conditional_insert` maps to `SET key value NX PX <ttl-ms>`, relying on
/// Redis executing commands one at a time for the at-most-one-winner
/// guarantee. `get` and `delete` map to `GET` and `DEL`; `DEL` on an
/// absent key is a Redis no-op, which covers releases racing TTL expiry.
#[derive(Clone)]
pub struct RedisCache {
    client: RedisClient,
}

impl RedisCache {
    /// Returns a new builder for configuring the cache.
    pub fn builder() -> crate::builder::RedisCacheBuilder {
        crate::builder::RedisCacheBuilder::new()
    }

    /// Creates a cache connected to the given Redis URL.
    pub async fn new(url: impl Into<String>) -> LockResult<Self> {
        Self::builder().url(url).build().await
    }

    /// Wraps an already-connected client.
    pub fn from_client(client: RedisClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

impl SharedCache for RedisCache {
    #[instrument(skip(self, value), fields(cache.key = %key, backend = "redis"))]
    async fn conditional_insert(&self, key: &str, value: &str, ttl: Duration) -> LockResult<bool> {
        let ttl_millis = ttl.as_millis() as i64;

        // SET NX returns the value if the key was set, nil if it exists.
        // PX (milliseconds) keeps sub-second TTLs exact.
        let result: Option<String> = self
            .client
            .set(
                key,
                value,
                Some(Expiration::PX(ttl_millis)),
                Some(SetOptions::NX),
                false,
            )
            .await
            .map_err(|e| {
                LockError::Backend(Box::new(std::io::Error::other(format!(
                    "Redis SET NX failed: {}",
                    e
                ))))
            })?;

        Ok(result.is_some())
    }

    #[instrument(skip(self), fields(cache.key = %key, backend = "redis"))]
    async fn get(&self, key: &str) -> LockResult<Option<String>> {
        let value: Option<String> = self.client.get(key).await.map_err(|e| {
            LockError::Backend(Box::new(std::io::Error::other(format!(
                "Redis GET failed: {}",
                e
            ))))
        })?;

        Ok(value)
    }

    #[instrument(skip(self), fields(cache.key = %key, backend = "redis"))]
    async fn delete(&self, key: &str) -> LockResult<()> {
        let _: i64 = self.client.del(key).await.map_err(|e| {
            LockError::Backend(Box::new(std::io::Error::other(format!(
                "Redis DEL failed: {}",
                e
            ))))
        })?;

        Ok(())
    }
}
