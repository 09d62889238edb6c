//! Generic in-memory TTL cache.
//!
//! Entries expire a fixed duration after insertion. Lookups hide expired
//! entries immediately; a background sweeper thread reclaims their memory
//! once per sweep interval.
//!
//! ```
//! use std::time::Duration;
//! use ephemera_cache::{CacheConfig, TtlCache};
//!
//! let config = CacheConfig::new(Duration::from_secs(300))
//!     .with_sweep_interval(Duration::from_secs(30));
//! let cache: TtlCache<u64, String> = TtlCache::with_config(config).unwrap();
//!
//! cache.add(7u64, "seven".to_string());
//! assert_eq!(cache.get(&7u64).as_deref(), Some("seven"));
//!
//! cache.close();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod cache;
mod sweeper;

pub use cache::TtlCache;
pub use ephemera_core::{CacheConfig, CacheStats, EphemeraError, Result};
