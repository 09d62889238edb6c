//! Defaults shared by the Ephemera crates.

use std::time::Duration;

/// Default entry lifetime in seconds (1 hour).
pub const DEFAULT_TTL_SECONDS: u64 = 3600;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(DEFAULT_TTL_SECONDS);

/// Name given to the background sweeper thread.
pub const SWEEPER_THREAD_NAME: &str = "ephemera-sweeper";
