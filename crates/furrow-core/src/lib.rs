//! # Furrow Core - Renter Domain Types
//!
//! **Purpose**: Define the data a storage renter passes between its coordinators.
//!
//! The renter negotiates storage contracts with farmers, audits them with
//! proof-of-storage challenges and authorizes shard transfers. This crate holds
//! the pure domain types those protocols exchange; it performs no I/O.
//!
//! # Architecture Constraints
//!
//! - YES Identifiers, contacts, contracts and transfer pointers
//! - YES Challenge queues with atomic per-item consumption
//! - YES Renter configuration
//! - NO wire transport (that's furrow-transport)
//! - NO negotiation or replication logic (that's furrow-renter)
//!
//! ## Core Concepts
//!
//! - **Contract**: an immutable storage proposal keyed by its [`DataHash`]
//! - **StorageItem**: per-farmer contracts and unconsumed audit challenges
//! - **TransferPointer**: a farmer-issued token authorizing a push or pull

#![forbid(unsafe_code)]

/// Audit challenges, public audit records and returned proofs
pub mod audit;

/// Renter configuration
pub mod config;

/// Peer contact information
pub mod contact;

/// Storage contracts and their solicitation topics
pub mod contract;

/// Domain error types
pub mod errors;

/// Node and content identifiers
pub mod identifiers;

/// Stored items and their per-farmer challenge queues
pub mod item;

/// Transfer authorization pointers
pub mod pointer;

pub use audit::{AuditPublicRecord, Challenge, Proof};
pub use config::RenterConfig;
pub use contact::Contact;
pub use contract::{Contract, ContractBuilder, Degree};
pub use errors::{ChallengeError, ConfigError, ContractError, IdentifierError};
pub use identifiers::{DataHash, NodeId, ID_LEN};
pub use item::StorageItem;
pub use pointer::{AuthToken, TransferDirection, TransferPointer};
