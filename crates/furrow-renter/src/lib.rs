//! # Furrow Renter - Negotiation, Verification and Replication
//!
//! Renter-side coordination for the storage network. A renter solicits offers
//! for a contract, audits the farmer it settled with, obtains transfer tokens
//! and fans replicas out to further farmers.
//!
//! # Architecture
//!
//! ```text
//!                      ┌──────────────────┐
//!                      │ RenterInterface  │
//!                      └────────┬─────────┘
//!    ┌───────────────┬──────────┴──────┬───────────────────┐
//!    ▼               ▼                 ▼                   ▼
//! Negotiation     Audit          TransferAuth         Replication
//!    │               └────────┬────────┴───────────────────┘
//!    ▼                        ▼
//! Publisher               Messenger
//! ```
//!
//! Only the negotiation coordinator holds mutable shared state (its pending
//! registry). The others are stateless and ignore late responses naturally.
//!
//! # Error Handling
//!
//! Nothing here retries. Single-request operations return transport and
//! application errors to the caller; mirroring swallows per-destination
//! failures and fails only when no destination accepted.

#![forbid(unsafe_code)]

/// Proof-of-storage audits
pub mod audit;

/// Renter error type
pub mod errors;

/// Offer negotiation
pub mod negotiation;

/// Renter facade
pub mod renter;

/// Mirror replication
pub mod replication;

/// Transfer authorization
pub mod transfer;

pub use audit::AuditCoordinator;
pub use errors::{RenterError, RenterResult};
pub use negotiation::{NegotiationCoordinator, Offer, OfferStatus, PendingOffer};
pub use renter::RenterInterface;
pub use replication::{MirrorOutcome, MirrorReport, MirrorResult, ReplicationCoordinator};
pub use transfer::TransferAuthCoordinator;
