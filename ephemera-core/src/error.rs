//! Error types for Ephemera.
//!
//! Cache reads and writes never fail: a missing or expired key is `None`.
//! Errors only arise while building a cache from configuration.

use thiserror::Error;

/// Result type alias using `EphemeraError`.
pub type Result<T> = std::result::Result<T, EphemeraError>;

/// Main error type for all Ephemera operations.
#[derive(Debug, Error)]
pub enum EphemeraError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// TTL must be a positive duration.
    #[error("Invalid TTL: must be greater than zero")]
    InvalidTtl,

    /// Sweep interval must be a positive duration.
    #[error("Invalid sweep interval: must be greater than zero")]
    InvalidSweepInterval,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // RUNTIME ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The background sweeper thread could not be started.
    #[error("Failed to spawn sweeper thread: {0}")]
    SweeperSpawn(#[source] std::io::Error),
}

impl EphemeraError {
    /// Returns true if this error came from rejecting a configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            EphemeraError::InvalidTtl
                | EphemeraError::InvalidSweepInterval
                | EphemeraError::ConfigError(_)
                | EphemeraError::JsonError(_)
        )
    }
}
