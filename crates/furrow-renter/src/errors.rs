//! Renter errors
//!
//! Three families share one enum:
//!
//! - **Protocol state**: no pending negotiation, no challenge relationship,
//!   exhausted challenge queue
//! - **Remote/transport**: the peer refused, answered nonsense, or could not
//!   be reached; transport failures are carried verbatim
//! - **Caller bugs**: mismatched mirror inputs, invalid configuration
//!
//! A solicitation timing out is an expected outcome and is reported as
//! [`RenterError::NoOffersReceived`], not as a transport failure.

use furrow_core::{ChallengeError, ConfigError, ContractError, DataHash, NodeId};
use furrow_transport::{Method, TransportError};

/// Result alias for renter operations
pub type RenterResult<T> = Result<T, RenterError>;

/// Renter operation failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenterError {
    /// The offer timeout elapsed before any offer was accepted
    #[error("No offers received for {data_hash}")]
    NoOffersReceived {
        /// Solicited shard
        data_hash: DataHash,
    },

    /// A negotiation for this shard is already pending
    #[error("Already awaiting an offer for {data_hash}")]
    AlreadySoliciting {
        /// Solicited shard
        data_hash: DataHash,
    },

    /// The negotiation was torn down without a result
    #[error("Negotiation for {data_hash} ended without settling")]
    Settlement {
        /// Solicited shard
        data_hash: DataHash,
    },

    /// The item holds no challenges for this farmer
    #[error("No contract with farmer {farmer}")]
    NoContractWithFarmer {
        /// Audited farmer
        farmer: NodeId,
    },

    /// Every challenge for this farmer has been used
    #[error("No remaining challenges for farmer {farmer}")]
    NoRemainingChallenges {
        /// Audited farmer
        farmer: NodeId,
    },

    /// AUDIT reply did not contain a proof list
    #[error("Invalid proof returned by {farmer}")]
    InvalidProof {
        /// Audited farmer
        farmer: NodeId,
    },

    /// CONSIGN or RETRIEVE reply did not contain a token
    #[error("No token returned by {farmer} for {method}")]
    MissingToken {
        /// Farmer asked for the token
        farmer: NodeId,
        /// Authorization method
        method: Method,
    },

    /// The peer answered with an application error
    #[error("{method} rejected by {farmer}: {message}")]
    Remote {
        /// Responding farmer
        farmer: NodeId,
        /// Request method
        method: Method,
        /// Peer's error message
        message: String,
    },

    /// The round trip failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An offer named a different farmer than the one that sent it
    #[error("Offer from {sender} names farmer {named}")]
    ForeignOffer {
        /// Contact the offer arrived from
        sender: NodeId,
        /// Farmer recorded in the offered contract
        named: NodeId,
    },

    /// An offered contract could not be decoded
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// No destination accepted its mirror request
    #[error("All mirror requests failed ({attempted} attempted)")]
    AllMirrorsFailed {
        /// Destinations that were asked
        attempted: usize,
    },

    /// Mirror sources and destinations must pair up one to one
    #[error("Mirror needs one source per destination: {sources} sources, {destinations} destinations")]
    LengthMismatch {
        /// Source pointer count
        sources: usize,
        /// Destination count
        destinations: usize,
    },

    /// Renter configuration was rejected
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RenterError {
    pub(crate) fn remote(farmer: NodeId, method: Method) -> impl FnOnce(String) -> Self {
        move |message| Self::Remote {
            farmer,
            method,
            message,
        }
    }

    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoOffersReceived { .. } => "no_offers_received",
            Self::AlreadySoliciting { .. } => "already_soliciting",
            Self::Settlement { .. } => "settlement_dropped",
            Self::NoContractWithFarmer { .. } => "no_contract_with_farmer",
            Self::NoRemainingChallenges { .. } => "no_remaining_challenges",
            Self::InvalidProof { .. } => "invalid_proof",
            Self::MissingToken { .. } => "missing_token",
            Self::Remote { .. } => "remote_error",
            Self::Transport(err) => err.code(),
            Self::ForeignOffer { .. } => "foreign_offer",
            Self::Contract(err) => err.code(),
            Self::AllMirrorsFailed { .. } => "all_mirrors_failed",
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::Config(err) => err.code(),
        }
    }
}

impl From<ChallengeError> for RenterError {
    fn from(err: ChallengeError) -> Self {
        match err {
            ChallengeError::NoContract { farmer } => Self::NoContractWithFarmer { farmer },
            ChallengeError::Exhausted { farmer } => Self::NoRemainingChallenges { farmer },
        }
    }
}
