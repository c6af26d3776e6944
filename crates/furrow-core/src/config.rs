//! Renter configuration

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time to wait for any offer before a solicitation fails.
pub const DEFAULT_OFFER_TIMEOUT_MS: u64 = 15_000;

/// Configuration consumed by the renter coordinators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenterConfig {
    /// How long a solicitation waits for an offer, in milliseconds
    pub offer_timeout_ms: u64,
}

impl Default for RenterConfig {
    fn default() -> Self {
        Self {
            offer_timeout_ms: DEFAULT_OFFER_TIMEOUT_MS,
        }
    }
}

impl RenterConfig {
    /// Short timeouts for tests
    pub fn for_testing() -> Self {
        Self {
            offer_timeout_ms: 200,
        }
    }

    /// Parse from TOML; missing fields take their defaults
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the coordinators cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.offer_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "offer_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Offer timeout as a duration
    pub fn offer_timeout(&self) -> Duration {
        Duration::from_millis(self.offer_timeout_ms)
    }
}
