//! Proof-of-storage audits

use crate::errors::{RenterError, RenterResult};
use furrow_core::{Contact, NodeId, Proof, StorageItem};
use furrow_transport::{AuditParams, Messenger, Method, Request, RequestParams};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Issues storage-proof challenges to farmers
///
/// One round trip per call and no retries. The challenge is consumed before
/// the request is sent, so a failed audit still uses it up.
#[derive(Clone)]
pub struct AuditCoordinator {
    messenger: Arc<dyn Messenger>,
    identity: Contact,
}

impl fmt::Debug for AuditCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditCoordinator")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl AuditCoordinator {
    /// Create a coordinator sending as `identity`
    pub fn new(messenger: Arc<dyn Messenger>, identity: Contact) -> Self {
        Self {
            messenger,
            identity,
        }
    }

    /// Challenge `farmer` for `item` and return the first proof it sends back
    pub async fn request_proof(&self, farmer: &Contact, item: &StorageItem) -> RenterResult<Proof> {
        let challenge = item.take_challenge(&farmer.node_id)?;
        let data_hash = item.hash();
        debug!(%data_hash, farmer = %farmer.node_id, %challenge, "Requesting storage proof");

        let request = Request::new(
            RequestParams::Audit(AuditParams {
                data_hash,
                challenge,
            }),
            self.identity.clone(),
        );
        let result = self
            .messenger
            .send(farmer, request)
            .await?
            .into_result()
            .map_err(RenterError::remote(farmer.node_id, Method::Audit))?;

        first_proof(result, farmer.node_id)
    }
}

fn first_proof(result: serde_json::Value, farmer: NodeId) -> RenterResult<Proof> {
    let proof = match result {
        serde_json::Value::Object(mut fields) => match fields.remove("proofs") {
            Some(serde_json::Value::Array(proofs)) => proofs.into_iter().next().map(Proof::new),
            _ => None,
        },
        _ => None,
    };
    proof.ok_or(RenterError::InvalidProof { farmer })
}
