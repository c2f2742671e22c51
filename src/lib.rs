//! Best-effort global mutual exclusion over a shared cache backend.
//!
//! This crate ensures that a named critical section runs on at most one
//! worker, process, or host at a time, using a shared cache's atomic
//! "add if absent" primitive as the sole coordination mechanism. The lock
//! entry carries a TTL, so a crashed holder blocks others for a bounded
//! time at most.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use global_lock::{MemoryCache, SharedCacheExt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = MemoryCache::new();
//!
//!     // Run a critical section under the named lock. The closure
//!     // receives the acquisition result: `true` grants exclusivity,
//!     // `false` means another holder is active.
//!     cache
//!         .with_global_lock("refresh-report", |acquired| async move {
//!             if acquired {
//!                 println!("refreshing the report");
//!             } else {
//!                 println!("another worker is already on it");
//!             }
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Semantics
//!
//! - Acquisition is a single atomic conditional-insert: it succeeds or is
//!   denied immediately, with no waiting, retrying, or backoff. Callers
//!   wanting retry-until-acquired semantics loop outside this crate.
//! - Denial is a normal outcome, reported as a boolean (or `None` guard),
//!   never as an error. Backend failures do surface as errors.
//! - Only the acquirer releases: the entry is deleted on scope exit when
//!   this call acquired it, on the success and the fault path alike. A
//!   holder that never reaches release (crash, dropped future) is covered
//!   by the TTL.
//!
//! # Backends
//!
//! ## In-Memory Backend
//!
//! A TTL-aware map behind a mutex. Single-process only; its clock is
//! injectable for deterministic expiry tests.
//!
//! ```rust,no_run
//! use global_lock::MemoryCache;
//!
//! let cache = MemoryCache::new();
//! ```
//!
//! ## Redis Backend
//!
//! `SET NX PX` / `GET` / `DEL` over the `fred` client. Works across
//! processes and hosts sharing one Redis.
//!
//! ```rust,no_run
//! use global_lock::RedisCache;
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = RedisCache::builder()
//!     .url("redis://localhost:6379")
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Organization
//!
//! This is a meta-crate that re-exports types from:
//! - `global-lock-core`: the lock, its guard, and the `SharedCache` trait
//! - `global-lock-memory`: in-memory backend
//! - `global-lock-redis`: Redis backend
//!
//! For fine-grained control, depend on the individual crates instead.

// Re-export core types and traits
pub use global_lock_core::*;

// Re-export memory backend
#[allow(ambiguous_glob_reexports)]
pub use global_lock_memory::*;

// Re-export redis backend
#[allow(ambiguous_glob_reexports)]
pub use global_lock_redis::*;
