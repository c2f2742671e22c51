pub mod failing_cache;
