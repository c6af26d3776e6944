//! Renter-facing interface
//!
//! Owns the four coordinators and the identity they all send as. The
//! coordinators share nothing but the outbound messenger; callers compose
//! them by passing contracts, pointers and contacts between calls.

use crate::audit::AuditCoordinator;
use crate::errors::{RenterError, RenterResult};
use crate::negotiation::{NegotiationCoordinator, OfferStatus, PendingOffer};
use crate::replication::{MirrorReport, ReplicationCoordinator};
use crate::transfer::TransferAuthCoordinator;
use furrow_core::{
    AuditPublicRecord, Contact, Contract, DataHash, NodeId, Proof, RenterConfig, StorageItem,
    TransferPointer,
};
use furrow_transport::{Messenger, OfferParams, Publisher};
use std::sync::Arc;
use tracing::debug;

/// Renter node's view of the storage network
#[derive(Debug)]
pub struct RenterInterface {
    identity: Contact,
    config: RenterConfig,
    negotiation: NegotiationCoordinator,
    audit: AuditCoordinator,
    transfer: TransferAuthCoordinator,
    replication: ReplicationCoordinator,
}

impl RenterInterface {
    /// Build a renter sending as `identity`
    pub fn new(
        identity: Contact,
        config: RenterConfig,
        messenger: Arc<dyn Messenger>,
        publisher: Arc<dyn Publisher>,
    ) -> RenterResult<Self> {
        config.validate()?;
        Ok(Self {
            negotiation: NegotiationCoordinator::new(publisher, config.offer_timeout()),
            audit: AuditCoordinator::new(Arc::clone(&messenger), identity.clone()),
            transfer: TransferAuthCoordinator::new(Arc::clone(&messenger), identity.clone()),
            replication: ReplicationCoordinator::new(messenger, identity.clone()),
            identity,
            config,
        })
    }

    /// Contact this renter sends as
    pub fn identity(&self) -> &Contact {
        &self.identity
    }

    /// Active configuration
    pub fn config(&self) -> &RenterConfig {
        &self.config
    }

    /// Negotiation coordinator
    pub fn negotiation(&self) -> &NegotiationCoordinator {
        &self.negotiation
    }

    // =========================================================================
    // Negotiation
    // =========================================================================

    /// Whether an offer for `data_hash` is still awaited
    pub fn is_awaiting_offer(&self, data_hash: &DataHash) -> bool {
        self.negotiation.is_awaiting_offer(data_hash)
    }

    /// Publish `contract` and wait for one farmer's offer
    pub fn solicit_offers(
        &self,
        contract: &Contract,
        blacklist: impl IntoIterator<Item = NodeId>,
    ) -> RenterResult<PendingOffer> {
        self.negotiation.solicit_offers(contract, blacklist)
    }

    /// Settle a pending negotiation with `farmer`'s offer
    pub fn accept_offer(&self, farmer: &Contact, contract: Contract) -> OfferStatus {
        self.negotiation.accept_offer(farmer, contract)
    }

    /// Entry point for an inbound OFFER message
    ///
    /// Decodes the offered contract and checks it names the sender before
    /// handing it to [`accept_offer`](Self::accept_offer).
    pub fn handle_offer(&self, sender: &Contact, params: OfferParams) -> RenterResult<OfferStatus> {
        let contract = Contract::from_value(params.contract)?;
        if let Some(named) = contract.farmer_id() {
            if named != sender.node_id {
                return Err(RenterError::ForeignOffer {
                    sender: sender.node_id,
                    named,
                });
            }
        }
        debug!(data_hash = %contract.data_hash(), farmer = %sender.node_id, "Received offer");
        Ok(self.accept_offer(sender, contract))
    }

    // =========================================================================
    // Audits and transfers
    // =========================================================================

    /// Challenge `farmer` to prove it still stores `item`
    pub async fn request_proof(&self, farmer: &Contact, item: &StorageItem) -> RenterResult<Proof> {
        self.audit.request_proof(farmer, item).await
    }

    /// Obtain a push pointer from `farmer`
    pub async fn request_consign_pointer(
        &self,
        farmer: &Contact,
        contract: &Contract,
        audit: &AuditPublicRecord,
    ) -> RenterResult<TransferPointer> {
        self.transfer
            .request_consign_pointer(farmer, contract, audit)
            .await
    }

    /// Obtain a pull pointer from `farmer`
    pub async fn request_retrieve_pointer(
        &self,
        farmer: &Contact,
        contract: &Contract,
    ) -> RenterResult<TransferPointer> {
        self.transfer.request_retrieve_pointer(farmer, contract).await
    }

    // =========================================================================
    // Replication
    // =========================================================================

    /// Mirror each source to its paired destination; return the destinations that accepted
    pub async fn mirror(
        &self,
        sources: Vec<TransferPointer>,
        destinations: Vec<Contact>,
    ) -> RenterResult<Vec<Contact>> {
        self.replication.mirror(sources, destinations).await
    }

    /// Mirror and report every destination's outcome
    pub async fn mirror_detailed(
        &self,
        sources: Vec<TransferPointer>,
        destinations: Vec<Contact>,
    ) -> RenterResult<MirrorReport> {
        self.replication.mirror_detailed(sources, destinations).await
    }
}
