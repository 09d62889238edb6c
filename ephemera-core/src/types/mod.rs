//! Domain types for Ephemera.
//!
//! - [`CacheConfig`]: TTL and sweep settings used to build a cache
//! - [`CacheStats`]: Point-in-time snapshot of a cache's contents and sweeps

mod config;
mod stats;

pub use config::*;
pub use stats::*;
