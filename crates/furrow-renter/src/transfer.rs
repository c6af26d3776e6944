//! Transfer authorization
//!
//! CONSIGN asks a farmer for a token to push a shard to it; RETRIEVE asks for
//! a token to pull one from it. Both wrap the returned token, verbatim, into a
//! [`TransferPointer`] addressed to that farmer.

use crate::errors::{RenterError, RenterResult};
use furrow_core::{
    AuditPublicRecord, AuthToken, Contact, Contract, DataHash, TransferDirection, TransferPointer,
};
use furrow_transport::{ConsignParams, Messenger, Request, RequestParams, RetrieveParams};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Requests push and pull authorization tokens from farmers
#[derive(Clone)]
pub struct TransferAuthCoordinator {
    messenger: Arc<dyn Messenger>,
    identity: Contact,
}

impl fmt::Debug for TransferAuthCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferAuthCoordinator")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl TransferAuthCoordinator {
    /// Create a coordinator sending as `identity`
    pub fn new(messenger: Arc<dyn Messenger>, identity: Contact) -> Self {
        Self {
            messenger,
            identity,
        }
    }

    /// Obtain a push pointer for `contract`'s shard
    ///
    /// `audit` is the public record of the audit tree built before transfer,
    /// which the farmer keeps to validate later proofs.
    pub async fn request_consign_pointer(
        &self,
        farmer: &Contact,
        contract: &Contract,
        audit: &AuditPublicRecord,
    ) -> RenterResult<TransferPointer> {
        let params = RequestParams::Consign(ConsignParams {
            data_hash: contract.data_hash(),
            audit_tree: audit.clone(),
        });
        self.authorize(farmer, contract.data_hash(), params, TransferDirection::Push)
            .await
    }

    /// Obtain a pull pointer for `contract`'s shard
    pub async fn request_retrieve_pointer(
        &self,
        farmer: &Contact,
        contract: &Contract,
    ) -> RenterResult<TransferPointer> {
        let params = RequestParams::Retrieve(RetrieveParams {
            data_hash: contract.data_hash(),
        });
        self.authorize(farmer, contract.data_hash(), params, TransferDirection::Pull)
            .await
    }

    async fn authorize(
        &self,
        farmer: &Contact,
        data_hash: DataHash,
        params: RequestParams,
        direction: TransferDirection,
    ) -> RenterResult<TransferPointer> {
        let method = params.method();
        debug!(%data_hash, farmer = %farmer.node_id, %method, "Requesting transfer token");

        let result = self
            .messenger
            .send(farmer, Request::new(params, self.identity.clone()))
            .await?
            .into_result()
            .map_err(RenterError::remote(farmer.node_id, method))?;

        let token = result
            .get("token")
            .and_then(serde_json::Value::as_str)
            .ok_or(RenterError::MissingToken {
                farmer: farmer.node_id,
                method,
            })?;

        Ok(TransferPointer::new(
            farmer.clone(),
            data_hash,
            AuthToken::new(token),
            direction,
        ))
    }
}
