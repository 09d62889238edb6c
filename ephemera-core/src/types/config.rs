//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TTL;
use crate::error::{EphemeraError, Result};

/// Settings for building a TTL cache.
///
/// Durations serialize as `{ "secs": u64, "nanos": u32 }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long an entry stays readable after insertion
    pub ttl: Duration,
    /// Period of the background sweep; `None` means the TTL itself
    pub sweep_interval: Option<Duration>,
    /// Whether to run the background sweeper at all
    pub background_sweep: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            sweep_interval: None,
            background_sweep: true,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with the given TTL and default sweep settings.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }

    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sweeps on its own period instead of once per TTL.
    ///
    /// A shorter interval bounds how long expired entries stay in memory.
    /// Entries are never swept before their TTL elapses either way.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }

    /// Disables the background sweeper. Expired entries are then only
    /// reclaimed by explicit eviction calls.
    pub fn without_background_sweep(mut self) -> Self {
        self.background_sweep = false;
        self
    }

    /// The period the sweeper actually runs at.
    pub fn effective_sweep_interval(&self) -> Duration {
        self.sweep_interval.unwrap_or(self.ttl)
    }

    /// Rejects zero durations.
    pub fn validate(&self) -> Result<()> {
        if self.ttl.is_zero() {
            return Err(EphemeraError::InvalidTtl);
        }
        if self.effective_sweep_interval().is_zero() {
            return Err(EphemeraError::InvalidSweepInterval);
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.effective_sweep_interval(), config.ttl);
        assert!(config.background_sweep);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sweep_interval_override() {
        let config = CacheConfig::new(Duration::from_secs(60))
            .with_sweep_interval(Duration::from_secs(5));
        assert_eq!(config.effective_sweep_interval(), Duration::from_secs(5));
    }

    #[test_case(0, None => matches Err(EphemeraError::InvalidTtl) ; "zero ttl")]
    #[test_case(0, Some(5) => matches Err(EphemeraError::InvalidTtl) ; "zero ttl with interval")]
    #[test_case(10, Some(0) => matches Err(EphemeraError::InvalidSweepInterval) ; "zero interval")]
    #[test_case(10, None => matches Ok(()) ; "interval follows ttl")]
    #[test_case(10, Some(1) => matches Ok(()) ; "shorter interval")]
    fn test_validate(ttl_ms: u64, interval_ms: Option<u64>) -> Result<()> {
        let mut config = CacheConfig::new(Duration::from_millis(ttl_ms));
        if let Some(ms) = interval_ms {
            config = config.with_sweep_interval(Duration::from_millis(ms));
        }
        config.validate()
    }

    #[test]
    fn test_from_json_partial() {
        let config = CacheConfig::from_json(r#"{"ttl":{"secs":30,"nanos":0}}"#).unwrap();
        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(config.sweep_interval, None);
        assert!(config.background_sweep);
    }

    #[test]
    fn test_from_json_rejects_zero_ttl() {
        let err = CacheConfig::from_json(r#"{"ttl":{"secs":0,"nanos":0}}"#).unwrap_err();
        assert!(matches!(err, EphemeraError::InvalidTtl));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = CacheConfig::from_json("{ttl").unwrap_err();
        assert!(matches!(err, EphemeraError::JsonError(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CacheConfig::new(Duration::from_millis(250))
            .with_sweep_interval(Duration::from_millis(50))
            .without_background_sweep();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(CacheConfig::from_json(&json).unwrap(), config);
    }
}
