//! Offer negotiation
//!
//! Soliciting a contract publishes it on the overlay and races two outcomes:
//! the first acceptable OFFER, or the offer timeout. Whichever removes the
//! pending negotiation from the registry settles it; the loser finds the
//! entry gone and does nothing.
//!
//! ```text
//!  solicit_offers ──insert──▶ ┌──────────────────────┐ ◀──remove── accept_offer
//!                             │ DataHash → Pending   │
//!  timer (offer timeout) ───▶ └──────────────────────┘   (id must match)
//! ```
//!
//! The completion sender lives inside the entry, so only the task that
//! removed the entry can fire it.

use crate::errors::{RenterError, RenterResult};
use furrow_core::{Contact, Contract, DataHash, NodeId};
use furrow_transport::{Publication, Publisher};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

type Registry = Arc<Mutex<HashMap<DataHash, PendingNegotiation>>>;

// =============================================================================
// Offers
// =============================================================================

/// An accepted offer: the farmer and the contract it agreed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Offering farmer
    pub farmer: Contact,
    /// Contract as offered
    pub contract: Contract,
}

/// What happened to an inbound offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferStatus {
    /// The offer settled the negotiation
    Accepted,
    /// No negotiation is pending for the offered hash; the offer is ignored
    NotAwaiting,
    /// The offering farmer is blacklisted for this negotiation
    Blacklisted,
}

struct PendingNegotiation {
    id: u64,
    settle: oneshot::Sender<RenterResult<Offer>>,
    blacklist: HashSet<NodeId>,
    timer: Option<AbortHandle>,
}

/// Completion of a solicitation
///
/// Resolves exactly once: with the accepted [`Offer`], or with
/// [`RenterError::NoOffersReceived`] when the offer timeout elapses first.
#[derive(Debug)]
#[must_use = "an unawaited PendingOffer discards the accepted offer"]
pub struct PendingOffer {
    data_hash: DataHash,
    receiver: oneshot::Receiver<RenterResult<Offer>>,
}

impl PendingOffer {
    /// Shard this solicitation is for
    pub fn data_hash(&self) -> DataHash {
        self.data_hash
    }
}

impl Future for PendingOffer {
    type Output = RenterResult<Offer>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let data_hash = self.data_hash;
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(RenterError::Settlement { data_hash })),
            Poll::Pending => Poll::Pending,
        }
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Solicits storage offers and settles each negotiation exactly once
#[derive(Clone)]
pub struct NegotiationCoordinator {
    publisher: Arc<dyn Publisher>,
    offer_timeout: Duration,
    pending: Registry,
    next_id: Arc<AtomicU64>,
}

impl fmt::Debug for NegotiationCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NegotiationCoordinator")
            .field("offer_timeout", &self.offer_timeout)
            .field("pending", &self.pending_count())
            .finish_non_exhaustive()
    }
}

impl NegotiationCoordinator {
    /// Create a coordinator publishing through `publisher`
    pub fn new(publisher: Arc<dyn Publisher>, offer_timeout: Duration) -> Self {
        Self {
            publisher,
            offer_timeout,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Whether a negotiation for `data_hash` is still pending
    pub fn is_awaiting_offer(&self, data_hash: &DataHash) -> bool {
        self.pending.lock().contains_key(data_hash)
    }

    /// Number of pending negotiations
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Publish `contract` and wait for an offer
    ///
    /// Offers from farmers in `blacklist` are disregarded. Fails immediately
    /// with [`RenterError::AlreadySoliciting`] if the shard already has a
    /// pending negotiation. Must be called from within a Tokio runtime.
    pub fn solicit_offers(
        &self,
        contract: &Contract,
        blacklist: impl IntoIterator<Item = NodeId>,
    ) -> RenterResult<PendingOffer> {
        let data_hash = contract.data_hash();
        let publication = Publication {
            topic: contract.topic_string(),
            contents: contract.to_value()?,
            key: data_hash,
        };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (settle, receiver) = oneshot::channel();

        {
            let mut pending = self.pending.lock();
            if pending.contains_key(&data_hash) {
                return Err(RenterError::AlreadySoliciting { data_hash });
            }
            pending.insert(
                data_hash,
                PendingNegotiation {
                    id,
                    settle,
                    blacklist: blacklist.into_iter().collect(),
                    timer: None,
                },
            );
        }

        debug!(%data_hash, topic = %publication.topic, "Soliciting storage offers");
        if let Err(err) = self.publisher.publish(publication) {
            // The timeout still settles the negotiation.
            warn!(%data_hash, error = %err, "Failed to publish contract");
        }

        self.arm_timer(data_hash, id);

        Ok(PendingOffer {
            data_hash,
            receiver,
        })
    }

    fn arm_timer(&self, data_hash: DataHash, id: u64) {
        let registry = Arc::clone(&self.pending);
        let offer_timeout = self.offer_timeout;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(offer_timeout).await;
            expire(&registry, data_hash, id);
        })
        .abort_handle();

        let mut pending = self.pending.lock();
        match pending.get_mut(&data_hash) {
            Some(entry) if entry.id == id => entry.timer = Some(timer),
            // Settled before the timer was stored.
            _ => timer.abort(),
        }
    }

    /// Settle the negotiation for `contract` with an offer from `farmer`
    ///
    /// Returns [`OfferStatus::NotAwaiting`] when the negotiation was already
    /// settled or never existed; the stored completion is never fired twice.
    pub fn accept_offer(&self, farmer: &Contact, contract: Contract) -> OfferStatus {
        let data_hash = contract.data_hash();

        let entry = {
            let mut pending = self.pending.lock();
            let blacklisted = match pending.get(&data_hash) {
                Some(entry) => entry.blacklist.contains(&farmer.node_id),
                None => false,
            };
            if blacklisted {
                debug!(%data_hash, farmer = %farmer.node_id, "Ignoring offer from blacklisted farmer");
                return OfferStatus::Blacklisted;
            }
            pending.remove(&data_hash)
        };

        let Some(entry) = entry else {
            debug!(%data_hash, farmer = %farmer.node_id, "Ignoring offer, not awaiting");
            return OfferStatus::NotAwaiting;
        };
        if let Some(timer) = entry.timer {
            timer.abort();
        }

        info!(%data_hash, farmer = %farmer.node_id, "Accepted storage offer");
        let offer = Offer {
            farmer: farmer.clone(),
            contract,
        };
        if entry.settle.send(Ok(offer)).is_err() {
            debug!(%data_hash, "Solicitor dropped before the offer arrived");
        }
        OfferStatus::Accepted
    }
}

fn expire(registry: &Mutex<HashMap<DataHash, PendingNegotiation>>, data_hash: DataHash, id: u64) {
    let entry = {
        let mut pending = registry.lock();
        if pending.get(&data_hash).is_some_and(|entry| entry.id == id) {
            pending.remove(&data_hash)
        } else {
            None
        }
    };

    if let Some(entry) = entry {
        warn!(%data_hash, "No offers received before timeout");
        if entry
            .settle
            .send(Err(RenterError::NoOffersReceived { data_hash }))
            .is_err()
        {
            debug!(%data_hash, "Solicitor dropped before the timeout");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use furrow_transport::TransportResult;

    struct NullPublisher;

    impl Publisher for NullPublisher {
        fn publish(&self, _publication: Publication) -> TransportResult<()> {
            Ok(())
        }
    }

    fn contract(seed: u8) -> Contract {
        Contract::builder(DataHash::from_bytes([seed; 20]), NodeId::from_bytes([0; 20]))
            .data_size(1024)
            .store_window(0, 1_000)
            .build()
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn expire_ignores_a_newer_solicitation_for_the_same_hash() {
        let coordinator = NegotiationCoordinator::new(Arc::new(NullPublisher), Duration::from_secs(5));
        let first = coordinator.solicit_offers(&contract(1), []).unwrap();
        let first_id = coordinator.pending.lock()[&first.data_hash()].id;

        let farmer = Contact::new(NodeId::from_bytes([3; 20]), "10.0.0.3", 4000);
        assert_eq!(coordinator.accept_offer(&farmer, contract(1)), OfferStatus::Accepted);
        let _second = coordinator.solicit_offers(&contract(1), []).unwrap();

        expire(&coordinator.pending, DataHash::from_bytes([1; 20]), first_id);
        assert!(coordinator.is_awaiting_offer(&DataHash::from_bytes([1; 20])));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_is_armed_until_acceptance() {
        let coordinator = NegotiationCoordinator::new(Arc::new(NullPublisher), Duration::from_secs(5));
        let pending = coordinator.solicit_offers(&contract(2), []).unwrap();
        assert!(coordinator.pending.lock()[&pending.data_hash()].timer.is_some());

        let farmer = Contact::new(NodeId::from_bytes([4; 20]), "10.0.0.4", 4000);
        coordinator.accept_offer(&farmer, contract(2));
        assert_eq!(coordinator.pending_count(), 0);
        assert_eq!(pending.await.unwrap().farmer, farmer);
    }

    #[tokio::test(start_paused = true)]
    async fn expire_settles_even_when_solicitor_is_gone() {
        let coordinator = NegotiationCoordinator::new(Arc::new(NullPublisher), Duration::from_secs(5));
        let pending = coordinator.solicit_offers(&contract(3), []).unwrap();
        let data_hash = pending.data_hash();
        let id = coordinator.pending.lock()[&data_hash].id;
        drop(pending);

        expire(&coordinator.pending, data_hash, id);
        assert!(!coordinator.is_awaiting_offer(&data_hash));
    }

    #[test]
    fn debug_output_reports_pending_count() {
        let coordinator = NegotiationCoordinator::new(Arc::new(NullPublisher), Duration::from_secs(5));
        let rendered = format!("{coordinator:?}");
        assert!(rendered.contains("pending: 0"));
    }
}
