//! Mirror replication
//!
//! Each destination farmer is paired, by position, with one source pointer
//! and asked to pull the shard from that source. Requests run concurrently;
//! the call succeeds if at least one destination accepts.

use crate::errors::{RenterError, RenterResult};
use furrow_core::{Contact, TransferPointer};
use furrow_transport::{Messenger, MirrorParams, Request, RequestParams};
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

// =============================================================================
// Reports
// =============================================================================

/// How one destination answered its mirror request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Round trip succeeded without an application error
    Accepted,
    /// Transport failure or application error
    Rejected {
        /// Failure description
        reason: String,
    },
}

/// One destination and its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorResult {
    /// Destination farmer
    pub destination: Contact,
    /// Its answer
    pub outcome: MirrorOutcome,
}

/// Per-destination results of a mirror fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorReport {
    /// One entry per destination, in input order
    pub results: Vec<MirrorResult>,
}

impl MirrorReport {
    /// Destinations that accepted
    pub fn accepted(&self) -> impl Iterator<Item = &Contact> {
        self.results
            .iter()
            .filter(|r| r.outcome == MirrorOutcome::Accepted)
            .map(|r| &r.destination)
    }

    /// Number of destinations that did not accept
    pub fn rejected_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome != MirrorOutcome::Accepted)
            .count()
    }

    /// Consume into the accepted destinations
    pub fn into_accepted(self) -> Vec<Contact> {
        self.results
            .into_iter()
            .filter(|r| r.outcome == MirrorOutcome::Accepted)
            .map(|r| r.destination)
            .collect()
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Fans mirror requests out to destination farmers
#[derive(Clone)]
pub struct ReplicationCoordinator {
    messenger: Arc<dyn Messenger>,
    identity: Contact,
}

impl fmt::Debug for ReplicationCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicationCoordinator")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl ReplicationCoordinator {
    /// Create a coordinator sending as `identity`
    pub fn new(messenger: Arc<dyn Messenger>, identity: Contact) -> Self {
        Self {
            messenger,
            identity,
        }
    }

    /// Ask `destinations[i]` to mirror from `sources[i]`; return those that accepted
    ///
    /// Fails with [`RenterError::AllMirrorsFailed`] when none accept.
    pub async fn mirror(
        &self,
        sources: Vec<TransferPointer>,
        destinations: Vec<Contact>,
    ) -> RenterResult<Vec<Contact>> {
        let report = self.mirror_detailed(sources, destinations).await?;
        let attempted = report.results.len();
        let accepted = report.into_accepted();

        if accepted.is_empty() {
            warn!(attempted, "All mirror requests failed");
            return Err(RenterError::AllMirrorsFailed { attempted });
        }
        info!(attempted, accepted = accepted.len(), "Mirrors established");
        Ok(accepted)
    }

    /// Like [`mirror`](Self::mirror), but report every destination's outcome
    /// and never fail on rejections
    ///
    /// Mismatched input lengths are rejected before any request is sent.
    pub async fn mirror_detailed(
        &self,
        sources: Vec<TransferPointer>,
        destinations: Vec<Contact>,
    ) -> RenterResult<MirrorReport> {
        if sources.len() != destinations.len() {
            return Err(RenterError::LengthMismatch {
                sources: sources.len(),
                destinations: destinations.len(),
            });
        }

        let requests = sources
            .into_iter()
            .zip(destinations)
            .map(|(source, destination)| self.mirror_one(source, destination));
        let results = join_all(requests).await;

        Ok(MirrorReport { results })
    }

    async fn mirror_one(&self, source: TransferPointer, destination: Contact) -> MirrorResult {
        let data_hash = source.data_hash();
        debug!(
            %data_hash,
            source = %source.farmer().node_id,
            destination = %destination.node_id,
            "Requesting mirror"
        );

        let request = Request::new(
            RequestParams::Mirror(MirrorParams {
                data_hash,
                token: source.token().clone(),
                farmer: source.farmer().clone(),
            }),
            self.identity.clone(),
        );

        let outcome = match self.messenger.send(&destination, request).await {
            Ok(response) => match response.into_result() {
                Ok(_) => MirrorOutcome::Accepted,
                Err(message) => MirrorOutcome::Rejected { reason: message },
            },
            Err(err) => MirrorOutcome::Rejected {
                reason: err.to_string(),
            },
        };

        if let MirrorOutcome::Rejected { reason } = &outcome {
            warn!(%data_hash, destination = %destination.node_id, %reason, "Mirror request failed");
        }

        MirrorResult {
            destination,
            outcome,
        }
    }
}
