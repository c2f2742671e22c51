//! Example: Global locking over a Redis cache
//!
//! Run with: `cargo run --example redis_lock`
//!
//! Requires a Redis server. Set REDIS_URL environment variable
//! or modify the URL below.

use std::time::Duration;

use global_lock::{RedisCache, SharedCacheExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Get Redis URL from environment or use default
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

    println!("Connecting to Redis...");
    let cache = RedisCache::builder().url(&redis_url).build().await?;
    println!("Connected");

    // Guard form: explicit release with error handling
    let lock = cache.global_lock("example-resource")?;
    println!("Created lock: {}", lock.name());

    match lock.try_acquire().await? {
        Some(guard) => {
            println!("Lock acquired, doing the work...");
            tokio::time::sleep(Duration::from_secs(1)).await;
            guard.release().await?;
            println!("Lock released");
        }
        None => {
            println!("Lock is held elsewhere, skipping");
        }
    }

    // Scoped form: release happens on scope exit on every path
    cache
        .with_global_lock("example-resource", |acquired| async move {
            println!("scoped acquired: {}", acquired);
        })
        .await?;

    Ok(())
}
