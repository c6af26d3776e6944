//! Domain error types
//!
//! Errors raised by the pure domain layer. The renter crate folds these into
//! its own error type; they never carry transport failures.

use crate::identifiers::NodeId;
use serde::{Deserialize, Serialize};

/// Failure to parse a hex identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum IdentifierError {
    /// Input was not valid hex
    #[error("Invalid hex identifier '{input}': {reason}")]
    InvalidHex {
        /// Offending input
        input: String,
        /// Decoder message
        reason: String,
    },

    /// Input decoded to the wrong number of bytes
    #[error("Identifier must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required byte length
        expected: usize,
        /// Decoded byte length
        actual: usize,
    },
}

/// Contract failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ContractError {
    /// Contract covers zero bytes
    #[error("Contract data size must be non-zero")]
    EmptyData,

    /// Storage window ends before it begins
    #[error("Invalid storage window: begin {begin}, end {end}")]
    InvalidWindow {
        /// Window start
        begin: u64,
        /// Window end
        end: u64,
    },

    /// Received contract could not be decoded
    #[error("Malformed contract: {0}")]
    Malformed(String),

    /// Contract could not be encoded for publication
    #[error("Contract encoding failed: {0}")]
    Encoding(String),
}

impl ContractError {
    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Encoding(_) => "contract_encoding",
            Self::EmptyData | Self::InvalidWindow { .. } | Self::Malformed(_) => {
                "malformed_contract"
            }
        }
    }
}

/// Failure to take an audit challenge from a stored item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ChallengeError {
    /// The item has no challenge relationship with this farmer
    #[error("No contract with farmer {farmer}")]
    NoContract {
        /// Farmer that was asked for a proof
        farmer: NodeId,
    },

    /// Every challenge for this farmer has been consumed
    #[error("No remaining challenges for farmer {farmer}")]
    Exhausted {
        /// Farmer whose queue is empty
        farmer: NodeId,
    },
}

/// Invalid renter configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A field holds an unusable value
    #[error("Invalid configuration: {field} - {reason}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Configuration text could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "config_invalid",
            Self::Parse(_) => "config_parse",
        }
    }
}
