//! Error-injecting cache for backend failure tests.

use std::time::Duration;

use global_lock::{LockError, LockResult, MemoryCache, SharedCache};

/// Cache wrapper whose operations can be forced to fail, for exercising
/// error propagation through the lock.
#[derive(Clone, Default)]
pub struct FailingCache {
    inner: MemoryCache,
    fail_insert: bool,
    fail_delete: bool,
}

impl FailingCache {
    /// Creates a wrapper that passes everything through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a wrapper whose conditional inserts fail.
    pub fn failing_insert() -> Self {
        Self {
            fail_insert: true,
            ..Self::default()
        }
    }

    /// Creates a wrapper whose deletes fail.
    pub fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            ..Self::default()
        }
    }

    fn backend_error(operation: &str) -> LockError {
        LockError::Backend(Box::new(std::io::Error::other(format!(
            "injected {} failure",
            operation
        ))))
    }
}

impl SharedCache for FailingCache {
    async fn conditional_insert(&self, key: &str, value: &str, ttl: Duration) -> LockResult<bool> {
        if self.fail_insert {
            return Err(Self::backend_error("insert"));
        }
        self.inner.conditional_insert(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> LockResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> LockResult<()> {
        if self.fail_delete {
            return Err(Self::backend_error("delete"));
        }
        self.inner.delete(key).await
    }
}
