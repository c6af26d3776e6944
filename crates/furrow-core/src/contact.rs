//! Peer contact information

use crate::identifiers::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A peer's addressable identity: its node id plus how to reach it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    /// Overlay identifier
    #[serde(rename = "nodeID")]
    pub node_id: NodeId,
    /// Host name or IP address
    pub address: String,
    /// Listening port
    pub port: u16,
}

impl Contact {
    /// Create a contact
    pub fn new(node_id: NodeId, address: impl Into<String>, port: u16) -> Self {
        Self {
            node_id,
            address: address.into(),
            port,
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.node_id, self.address, self.port)
    }
}
