//! Redis cache builder.

use fred::prelude::*;
use global_lock_core::error::{LockError, LockResult};

use crate::cache::RedisCache;

/// Builder for [`RedisCache`] configuration.
pub struct RedisCacheBuilder {
    url: Option<String>,
    client: Option<RedisClient>,
}

impl RedisCacheBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: None,
            client: None,
        }
    }

    /// Sets the Redis server URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Uses an existing, already-connected Redis client.
    pub fn client(mut self, client: RedisClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the cache, connecting first if a URL was given.
    pub async fn build(self) -> LockResult<RedisCache> {
        if let Some(client) = self.client {
            return Ok(RedisCache::from_client(client));
        }

        let url = self.url.ok_or_else(|| {
            LockError::Connection(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "no Redis client or URL provided",
            )))
        })?;

        let config = RedisConfig::from_url(&url).map_err(|e| {
            LockError::Connection(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid Redis URL: {}", e),
            )))
        })?;

        let client = RedisClient::new(config, None, None, None);
        client.connect();
        client.wait_for_connect().await.map_err(|e| {
            LockError::Connection(Box::new(std::io::Error::other(format!(
                "failed to connect to Redis: {}",
                e
            ))))
        })?;

        Ok(RedisCache::from_client(client))
    }
}

impl Default for RedisCacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}
