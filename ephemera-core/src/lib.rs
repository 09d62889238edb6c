//! # Ephemera Core
//!
//! Shared building blocks for the Ephemera TTL cache:
//!
//! - **Types**: [`CacheConfig`] and [`CacheStats`]
//! - **Errors**: [`EphemeraError`] and the [`Result`] alias
//! - **Constants**: Default TTL and thread naming
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use ephemera_core::CacheConfig;
//!
//! let config = CacheConfig::new(Duration::from_secs(30))
//!     .with_sweep_interval(Duration::from_secs(5));
//! assert!(config.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{EphemeraError, Result};
pub use types::*;
