//! Node and content identifiers
//!
//! Both identifiers are 160-bit values rendered as lowercase hex, matching the
//! key width of the overlay's routing table.

use crate::errors::IdentifierError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width in bytes of every overlay identifier.
pub const ID_LEN: usize = 20;

fn parse_hex_id(s: &str) -> Result<[u8; ID_LEN], IdentifierError> {
    let bytes = hex::decode(s).map_err(|e| IdentifierError::InvalidHex {
        input: s.to_string(),
        reason: e.to_string(),
    })?;
    <[u8; ID_LEN]>::try_from(bytes.as_slice()).map_err(|_| IdentifierError::InvalidLength {
        expected: ID_LEN,
        actual: bytes.len(),
    })
}

fn truncated_digest(bytes: &[u8]) -> [u8; ID_LEN] {
    let digest = blake3::hash(bytes);
    let mut out = [0u8; ID_LEN];
    out.copy_from_slice(&digest.as_bytes()[..ID_LEN]);
    out
}

// =============================================================================
// NodeId
// =============================================================================

/// Network-unique identifier of a peer on the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId([u8; ID_LEN]);

impl NodeId {
    /// Wrap raw identifier bytes
    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Derive a node id from a public key
    pub fn from_public_key(public_key: &[u8]) -> Self {
        Self(truncated_digest(public_key))
    }

    /// Raw identifier bytes
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for NodeId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_id(s).map(Self)
    }
}

impl TryFrom<String> for NodeId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

// =============================================================================
// DataHash
// =============================================================================

/// Content identifier of a stored shard; the key of every negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataHash([u8; ID_LEN]);

impl DataHash {
    /// Wrap raw hash bytes
    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Content-address a shard
    pub fn of(content: &[u8]) -> Self {
        Self(truncated_digest(content))
    }

    /// Raw hash bytes
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }
}

impl fmt::Display for DataHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for DataHash {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_id(s).map(Self)
    }
}

impl TryFrom<String> for DataHash {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DataHash> for String {
    fn from(hash: DataHash) -> Self {
        hash.to_string()
    }
}
