//! Scripted messenger
//!
//! Each farmer gets a responder closure; farmers without one are unreachable.
//! Every request is recorded, and the peak number of requests in flight at
//! once is tracked so tests can check fan-out is concurrent.

use async_trait::async_trait;
use furrow_core::{Contact, NodeId};
use furrow_transport::{Messenger, Request, Response, TransportError, TransportResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Responder = Arc<dyn Fn(&Request) -> TransportResult<Response> + Send + Sync>;

/// A request as the mock received it
#[derive(Debug, Clone)]
pub struct SentRequest {
    /// Addressed farmer
    pub to: Contact,
    /// Request body
    pub request: Request,
}

/// In-memory [`Messenger`] with per-farmer scripted replies
#[derive(Default)]
pub struct MockMessenger {
    responders: Mutex<HashMap<NodeId, Responder>>,
    delays: Mutex<HashMap<NodeId, Duration>>,
    sent: Mutex<Vec<SentRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockMessenger {
    /// Messenger with no scripted farmers
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests to `farmer` with `responder`
    pub fn respond_with(
        &self,
        farmer: &NodeId,
        responder: impl Fn(&Request) -> TransportResult<Response> + Send + Sync + 'static,
    ) {
        self.responders.lock().insert(*farmer, Arc::new(responder));
    }

    /// Always succeed with `result`
    pub fn respond_ok(&self, farmer: &NodeId, result: serde_json::Value) {
        self.respond_with(farmer, move |_| Ok(Response::ok(result.clone())));
    }

    /// Always reply with an application error
    pub fn respond_error(&self, farmer: &NodeId, message: &str) {
        let message = message.to_string();
        self.respond_with(farmer, move |_| Ok(Response::failed(message.clone())));
    }

    /// Always fail the round trip
    pub fn fail_with(&self, farmer: &NodeId, error: TransportError) {
        self.respond_with(farmer, move |_| Err(error.clone()));
    }

    /// Hold replies from `farmer` for `delay`
    pub fn delay(&self, farmer: &NodeId, delay: Duration) {
        self.delays.lock().insert(*farmer, delay);
    }

    /// Every request received so far
    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().clone()
    }

    /// Requests addressed to `farmer`
    pub fn sent_to(&self, farmer: &NodeId) -> Vec<Request> {
        self.sent
            .lock()
            .iter()
            .filter(|s| s.to.node_id == *farmer)
            .map(|s| s.request.clone())
            .collect()
    }

    /// Number of requests received
    pub fn request_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Most requests that were awaiting a reply at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send(&self, to: &Contact, request: Request) -> TransportResult<Response> {
        self.sent.lock().push(SentRequest {
            to: to.clone(),
            request: request.clone(),
        });

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self.delays.lock().get(&to.node_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let responder = self.responders.lock().get(&to.node_id).cloned();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match responder {
            Some(responder) => responder(&request),
            None => Err(TransportError::Unreachable {
                peer: to.node_id,
                reason: "no responder scripted".to_string(),
            }),
        }
    }
}
