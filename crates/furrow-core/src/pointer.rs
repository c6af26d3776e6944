//! Transfer authorization pointers
//!
//! A pointer is what the transfer subsystem needs to open a data channel:
//! the farmer to connect to, the shard, the farmer-issued token and whether
//! bytes flow towards the farmer (push) or away from it (pull).

use crate::contact::Contact;
use crate::identifiers::DataHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a shard transfer relative to the farmer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferDirection {
    /// Renter uploads to the farmer (consignment)
    Push,
    /// Renter downloads from the farmer (retrieval)
    Pull,
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => f.write_str("PUSH"),
            Self::Pull => f.write_str("PULL"),
        }
    }
}

/// Opaque authorization token issued by a farmer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token as issued
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result of a successful authorization handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPointer {
    farmer: Contact,
    data_hash: DataHash,
    token: AuthToken,
    direction: TransferDirection,
}

impl TransferPointer {
    /// Create a pointer
    pub fn new(
        farmer: Contact,
        data_hash: DataHash,
        token: AuthToken,
        direction: TransferDirection,
    ) -> Self {
        Self {
            farmer,
            data_hash,
            token,
            direction,
        }
    }

    /// Farmer that issued the token
    pub fn farmer(&self) -> &Contact {
        &self.farmer
    }

    /// Shard covered by the token
    pub fn data_hash(&self) -> DataHash {
        self.data_hash
    }

    /// Authorization token
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Transfer direction
    pub fn direction(&self) -> TransferDirection {
        self.direction
    }
}
