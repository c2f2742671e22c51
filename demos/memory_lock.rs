//! Example: Scoped global locking over the in-memory backend
//!
//! Run with: `cargo run --example memory_lock`

use std::time::Duration;

use global_lock::{MemoryCache, SharedCacheExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cache = MemoryCache::new();

    // A single scope acquires, runs its body, and releases on exit
    cache
        .with_global_lock("nightly-report", |acquired| async move {
            println!("first scope acquired: {}", acquired);
        })
        .await?;

    // Two contenders on the same name: exactly one wins
    let worker = {
        let cache = cache.clone();
        tokio::spawn(async move {
            cache
                .with_global_lock("nightly-report", |acquired| async move {
                    if acquired {
                        println!("worker holds the lock, doing the work...");
                        tokio::time::sleep(Duration::from_millis(200)).await;
                        println!("worker done");
                    }
                    acquired
                })
                .await
        })
    };

    // Give the worker time to grab the lock
    tokio::time::sleep(Duration::from_millis(50)).await;

    cache
        .with_global_lock("nightly-report", |acquired| async move {
            if !acquired {
                println!("main denied: another holder is active");
            }
        })
        .await?;

    worker.await??;

    // The name is free again once the worker's scope exits
    cache
        .with_global_lock("nightly-report", |acquired| async move {
            println!("after release, acquired: {}", acquired);
        })
        .await?;

    Ok(())
}
