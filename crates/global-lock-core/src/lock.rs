//! Scoped global mutual exclusion over a shared cache.

use std::future::Future;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use tracing::{Span, instrument};

use crate::error::{LockError, LockResult};
use crate::traits::SharedCache;

/// Default lock lifetime.
///
/// An abandoned lock (holder crashed before releasing) becomes available
/// again once this much time elapses, so a critical section must complete
/// well within it.
pub const LOCK_EXPIRE: Duration = Duration::from_secs(600);

/// Namespace prefix for lock cache keys.
///
/// Part of the interop contract: independent implementations sharing one
/// cache must derive keys the same way to exclude each other.
pub const LOCK_KEY_PREFIX: &str = "global-lock:";

/// Derives the cache key for a lock name.
pub fn lock_cache_key(name: &str) -> String {
    format!("{LOCK_KEY_PREFIX}{name}")
}

/// Generates a holder token.
///
/// Format: `{process_id}_{counter}_{random}`. The token is stored as the
/// entry value for observability; release does not compare it.
fn create_holder_token() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    let pid = process::id();

    let mut rng = rand::thread_rng();
    let random: u64 = rng.r#gen();

    format!("{}_{}_{:016x}", pid, counter, random)
}

// ============================================================================
// Global Lock
// ============================================================================

/// A named, best-effort global mutual exclusion lock.
///
/// Coordination is delegated entirely to the shared cache's atomic
/// conditional-insert: among any set of concurrent callers contending on
/// the same name, at most one observes a successful acquisition while the
/// entry exists. Acquisition never waits and never retries; the entry's
/// TTL bounds how long a crashed holder can keep the lock.
///
/// # Example
///
/// ```rust,ignore
/// let lock = GlobalLock::new(cache, "refresh-report")?;
/// lock.scoped(|acquired| async move {
///     if acquired {
///         refresh_report().await;
///     }
///     // A denied caller skips the guarded logic
/// })
/// .await?;
/// ```
pub struct GlobalLock<C> {
    /// Cache acting as the coordination medium.
    cache: C,
    /// Caller-supplied lock name.
    name: String,
    /// Derived cache key.
    key: String,
    /// Marker value stored at the key while held.
    token: String,
    /// Entry lifetime.
    expiry: Duration,
}

impl<C: SharedCache> GlobalLock<C> {
    /// Creates a lock for `name` with the default [`LOCK_EXPIRE`]
    /// lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::InvalidName`] if `name` is empty.
    pub fn new(cache: C, name: &str) -> LockResult<Self> {
        if name.is_empty() {
            return Err(LockError::InvalidName(
                "lock name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            cache,
            key: lock_cache_key(name),
            name: name.to_string(),
            token: create_holder_token(),
            expiry: LOCK_EXPIRE,
        })
    }

    /// Sets the entry lifetime.
    pub fn expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Returns the lock name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the derived cache key.
    pub fn cache_key(&self) -> &str {
        &self.key
    }

    /// Returns whether an entry currently exists for this lock.
    ///
    /// Observational only; another caller may acquire or release
    /// immediately after the read.
    pub async fn is_held(&self) -> LockResult<bool> {
        Ok(self.cache.get(&self.key).await?.is_some())
    }

    /// Attempts to acquire the lock without waiting.
    ///
    /// Returns `Ok(Some(guard))` exactly when this call created the entry.
    /// `Ok(None)` means another holder is active; the pre-existing entry
    /// is left untouched. Denial is a normal outcome, not an error;
    /// backend failures surface as `Err`.
    #[instrument(
        skip(self),
        fields(lock.name = %self.name, lock.key = %self.key, acquired = tracing::field::Empty)
    )]
    pub async fn try_acquire(&self) -> LockResult<Option<GlobalLockGuard<'_, C>>> {
        let created = self
            .cache
            .conditional_insert(&self.key, &self.token, self.expiry)
            .await?;
        Span::current().record("acquired", created);

        if created {
            Ok(Some(GlobalLockGuard {
                cache: &self.cache,
                key: &self.key,
                released: false,
            }))
        } else {
            Ok(None)
        }
    }

    /// Runs `body` as the critical section guarded by this lock.
    ///
    /// `body` receives the acquisition result: `true` grants exclusivity
    /// and the guarded logic must run, `false` means another holder is
    /// active and only denial-branch logic may run. When this call
    /// acquired the lock, the entry is deleted after the body completes,
    /// whether the body produced a success or a fault value; a denied call
    /// never deletes the entry it does not own.
    ///
    /// To propagate a fault out of the scope, make `T` a `Result`: the
    /// body's error reaches the caller only after the release has run. If
    /// the body panics or the future is dropped mid-flight, the entry
    /// expires after its TTL, the same bound that covers a crashed
    /// process.
    #[instrument(
        skip(self, body),
        fields(lock.name = %self.name, lock.key = %self.key, acquired = tracing::field::Empty)
    )]
    pub async fn scoped<F, Fut, T>(&self, body: F) -> LockResult<T>
    where
        F: FnOnce(bool) -> Fut,
        Fut: Future<Output = T>,
    {
        let acquired = self
            .cache
            .conditional_insert(&self.key, &self.token, self.expiry)
            .await?;
        Span::current().record("acquired", acquired);

        let out = body(acquired).await;

        if acquired {
            self.cache.delete(&self.key).await?;
        }

        Ok(out)
    }
}

// ============================================================================
// Lock Guard
// ============================================================================

/// Guard held by the caller that acquired a [`GlobalLock`].
///
/// Only the acquirer holds a guard, so only the acquirer can release the
/// entry. Call [`release`](Self::release) explicitly for immediate release
/// with error handling; a guard dropped without releasing leaves the entry
/// to expire via its TTL.
#[must_use = "dropping the guard without release() leaves the lock held until the TTL elapses"]
pub struct GlobalLockGuard<'a, C: SharedCache> {
    cache: &'a C,
    key: &'a str,
    released: bool,
}

impl<C: SharedCache> GlobalLockGuard<'_, C> {
    /// Releases the lock by deleting the cache entry.
    ///
    /// Deletion is unconditional; if the TTL already expired the entry,
    /// this is a no-op on the backend.
    #[instrument(skip(self), fields(lock.key = %self.key))]
    pub async fn release(mut self) -> LockResult<()> {
        self.released = true;
        self.cache.delete(self.key).await
    }
}

impl<C: SharedCache> Drop for GlobalLockGuard<'_, C> {
    fn drop(&mut self) {
        if !self.released {
            // Drop cannot run async I/O; the entry expires naturally.
            tracing::debug!(lock.key = %self.key, "lock guard dropped without release");
        }
    }
}
