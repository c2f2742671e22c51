//! Integration tests for the Redis cache backend.

use std::time::Duration;

use global_lock::{RedisCache, SharedCache, SharedCacheExt, lock_cache_key};

/// Helper to get Redis URL from environment or use default.
fn get_redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

#[tokio::test]
#[ignore] // Requires Redis server running
async fn test_conditional_insert_contract() {
    let cache = RedisCache::new(get_redis_url()).await.unwrap();

    // Clean slate in case a previous run left the key behind
    cache.delete("contract-key").await.unwrap();

    assert!(
        cache
            .conditional_insert("contract-key", "marker", Duration::from_secs(10))
            .await
            .unwrap()
    );
    assert!(
        !cache
            .conditional_insert("contract-key", "other", Duration::from_secs(10))
            .await
            .unwrap()
    );
    assert_eq!(
        cache.get("contract-key").await.unwrap(),
        Some("marker".to_string())
    );

    cache.delete("contract-key").await.unwrap();
    assert_eq!(cache.get("contract-key").await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server running
async fn test_exclusive_lock_acquisition() {
    let cache = RedisCache::new(get_redis_url()).await.unwrap();
    let lock = cache.global_lock("test-exclusive").unwrap();

    // First acquisition should succeed
    let guard1 = lock.try_acquire().await.unwrap();
    assert!(guard1.is_some());

    // Second acquisition should fail (lock is held)
    let guard2 = lock.try_acquire().await.unwrap();
    assert!(guard2.is_none());

    // Release the lock
    guard1.unwrap().release().await.unwrap();

    // Now acquisition should succeed
    let guard3 = lock.try_acquire().await.unwrap();
    assert!(guard3.is_some());
    guard3.unwrap().release().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server running
async fn test_scoped_releases_entry() {
    let cache = RedisCache::new(get_redis_url()).await.unwrap();
    let lock = cache.global_lock("test-scoped").unwrap();

    let acquired = lock
        .scoped(|acquired| async move { acquired })
        .await
        .unwrap();

    assert!(acquired);
    assert_eq!(
        cache.get(&lock_cache_key("test-scoped")).await.unwrap(),
        None
    );
}

#[tokio::test]
#[ignore] // Requires Redis server running
async fn test_lock_expiry() {
    let cache = RedisCache::new(get_redis_url()).await.unwrap();
    let lock = cache
        .global_lock("test-expiry")
        .unwrap()
        .expiry(Duration::from_millis(200));

    let _guard = lock
        .try_acquire()
        .await
        .unwrap()
        .expect("first acquisition should win");

    // Wait for the entry to expire (longer than the expiry time)
    tokio::time::sleep(Duration::from_millis(300)).await;

    // The abandoned entry expired, so acquisition succeeds again
    let guard2 = lock.try_acquire().await.unwrap();
    assert!(guard2.is_some());
    guard2.unwrap().release().await.unwrap();
}
