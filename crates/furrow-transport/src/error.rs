//! Transport errors
//!
//! Failures of the round trip itself. An error *reported by* the farmer arrives
//! as a successful round trip whose [`Response`](crate::Response) carries an
//! error field; it is not a `TransportError`.

use furrow_core::NodeId;

/// Result alias for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Outbound request or publication failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Peer could not be reached
    #[error("Peer unreachable: {peer}: {reason}")]
    Unreachable {
        /// Target peer
        peer: NodeId,
        /// Underlying cause
        reason: String,
    },

    /// Peer did not answer in time
    #[error("Request to {peer} timed out after {timeout_ms}ms")]
    Timeout {
        /// Target peer
        peer: NodeId,
        /// Transport timeout in milliseconds
        timeout_ms: u64,
    },

    /// Message could not be encoded or the reply could not be decoded
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Transport has shut down
    #[error("Transport closed")]
    Closed,

    /// Any other transport failure
    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "transport_unreachable",
            Self::Timeout { .. } => "transport_timeout",
            Self::Serialization(_) => "transport_serialization",
            Self::Closed => "transport_closed",
            Self::Other(_) => "transport_other",
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
