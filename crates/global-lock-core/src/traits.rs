//! Core traits for the shared cache coordination medium.

use std::future::Future;
use std::time::Duration;

use crate::error::LockResult;
use crate::lock::GlobalLock;

// ============================================================================
// Shared Cache Trait
// ============================================================================

/// A shared key-value store used as the lock coordination medium.
///
/// The only synchronization primitive the lock relies on is
/// [`conditional_insert`](SharedCache::conditional_insert): an atomic
/// "create key only if absent" with a bounded lifetime. The backend must
/// guarantee that among any set of concurrent inserts contending on the
/// same absent key, exactly one caller observes `true`.
///
/// Implementations perform no local locking on behalf of the caller and
/// may block only on whatever I/O their own operations require.
///
/// # Example
///
/// ```rust,ignore
/// let created = cache
///     .conditional_insert("global-lock:job-A", "1", Duration::from_secs(600))
///     .await?;
/// if created {
///     // We own the entry until we delete it or the TTL elapses
/// }
/// ```
pub trait SharedCache: Send + Sync {
    /// Atomically creates `key` holding `value` with expiry `ttl`, only if
    /// the key is absent.
    ///
    /// Returns whether this call created the entry. A `false` result must
    /// leave the pre-existing entry (value and remaining lifetime)
    /// untouched.
    fn conditional_insert(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl Future<Output = LockResult<bool>> + Send;

    /// Reads the current value at `key`, if any.
    ///
    /// Not required by the lock algorithm itself; used to observe lock
    /// state.
    fn get(&self, key: &str) -> impl Future<Output = LockResult<Option<String>>> + Send;

    /// Unconditionally removes `key`.
    ///
    /// A no-op if the key is already absent. This covers the race where
    /// TTL expiry removed the entry before the explicit release.
    fn delete(&self, key: &str) -> impl Future<Output = LockResult<()>> + Send;
}

// ============================================================================
// Convenience Extensions
// ============================================================================

/// Extension trait providing convenience methods for shared caches.
pub trait SharedCacheExt: SharedCache + Clone {
    /// Creates a [`GlobalLock`] for `name`, backed by a clone of this
    /// cache.
    fn global_lock(&self, name: &str) -> LockResult<GlobalLock<Self>>
    where
        Self: Sized,
    {
        GlobalLock::new(self.clone(), name)
    }

    /// Runs `body` as the critical section guarded by the named lock.
    ///
    /// Convenience method combining
    /// [`global_lock`](SharedCacheExt::global_lock) and
    /// [`GlobalLock::scoped`].
    fn with_global_lock<F, Fut, T>(
        &self,
        name: &str,
        body: F,
    ) -> impl Future<Output = LockResult<T>> + Send
    where
        Self: Sized,
        F: FnOnce(bool) -> Fut + Send,
        Fut: Future<Output = T> + Send,
        T: Send,
    {
        async move {
            let lock = self.global_lock(name)?;
            lock.scoped(body).await
        }
    }
}

// Blanket implementation for all cloneable caches
impl<C: SharedCache + Clone> SharedCacheExt for C {}
