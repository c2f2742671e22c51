//! In-memory shared cache implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use global_lock_core::error::LockResult;
use global_lock_core::traits::SharedCache;

use crate::clock::{Clock, SystemClock};

/// A cache entry and its expiry deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process [`SharedCache`] backend.
///
/// Entries live in a mutex-guarded map and expire lazily: an entry past
/// its deadline is treated as absent (and evicted) by the next operation
/// touching its key. Cloning shares the underlying store, so clones
/// handed to concurrent tasks contend on the same entries.
///
/// Suitable for single-process deployments and tests. Mutual exclusion
/// across processes or hosts requires a genuinely shared backend such as
/// Redis.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    /// Creates a cache using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a cache with an injected time source.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    /// Returns the remaining lifetime of `key`, if present and unexpired.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.expires_at - now),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedCache for MemoryCache {
    async fn conditional_insert(&self, key: &str, value: &str, ttl: Duration) -> LockResult<bool> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(false),
            _ => {
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: value.to_string(),
                        expires_at: now + ttl,
                    },
                );
                Ok(true)
            }
        }
    }

    async fn get(&self, key: &str) -> LockResult<Option<String>> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> LockResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[tokio::test]
    async fn test_conditional_insert_wins_once() {
        let cache = MemoryCache::new();

        let first = cache
            .conditional_insert("key", "a", Duration::from_secs(10))
            .await
            .unwrap();
        let second = cache
            .conditional_insert("key", "b", Duration::from_secs(10))
            .await
            .unwrap();

        assert!(first);
        assert!(!second);
        // The losing insert must not overwrite the value
        assert_eq!(cache.get("key").await.unwrap(), Some("a".to_string()));
    }

    #[tokio::test]
    async fn test_delete_is_noop_when_absent() {
        let cache = MemoryCache::new();
        cache.delete("missing").await.unwrap();
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent() {
        let clock = ManualClock::new();
        let cache = MemoryCache::with_clock(Arc::new(clock.clone()));

        cache
            .conditional_insert("key", "a", Duration::from_secs(1))
            .await
            .unwrap();
        clock.advance(Duration::from_secs(1));

        assert_eq!(cache.get("key").await.unwrap(), None);
        assert!(
            cache
                .conditional_insert("key", "b", Duration::from_secs(1))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_ttl_reports_remaining_lifetime() {
        let clock = ManualClock::new();
        let cache = MemoryCache::with_clock(Arc::new(clock.clone()));

        cache
            .conditional_insert("key", "a", Duration::from_secs(10))
            .await
            .unwrap();
        clock.advance(Duration::from_secs(4));

        assert_eq!(cache.ttl("key"), Some(Duration::from_secs(6)));

        clock.advance(Duration::from_secs(6));
        assert_eq!(cache.ttl("key"), None);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = MemoryCache::new();
        let other = cache.clone();

        cache
            .conditional_insert("key", "a", Duration::from_secs(10))
            .await
            .unwrap();

        assert!(
            !other
                .conditional_insert("key", "b", Duration::from_secs(10))
                .await
                .unwrap()
        );
    }
}
