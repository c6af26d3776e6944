//! Audit challenges, public audit records and returned proofs
//!
//! The audit tree itself is built elsewhere; these types only carry its
//! artifacts between the renter and a farmer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single pre-generated proof-of-storage challenge (hex secret)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Challenge(String);

impl Challenge {
    /// Wrap a challenge secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The challenge as sent on the wire
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public half of an audit: the hashed leaves a farmer needs to rebuild the
/// Merkle root the renter committed to before transfer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditPublicRecord(Vec<String>);

impl AuditPublicRecord {
    /// Wrap audit tree leaves
    pub fn new(leaves: Vec<String>) -> Self {
        Self(leaves)
    }

    /// Leaves in tree order
    pub fn leaves(&self) -> &[String] {
        &self.0
    }
}

/// Proof returned by a farmer for one challenge
///
/// Kept opaque: verification against the Merkle root happens in the audit layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof(serde_json::Value);

impl Proof {
    /// Wrap a proof value
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Raw proof value
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consume into the raw proof value
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}
