//! Convenience prelude for global lock types.

pub use crate::error::{LockError, LockResult};
pub use crate::lock::{GlobalLock, GlobalLockGuard, LOCK_EXPIRE, LOCK_KEY_PREFIX, lock_cache_key};
pub use crate::traits::{SharedCache, SharedCacheExt};
