//! Outbound transport traits
//!
//! Implementations own their own timeout and retry policy; callers of these
//! traits never retry.

use crate::error::TransportResult;
use crate::messages::{Publication, Request, Response};
use async_trait::async_trait;
use furrow_core::Contact;

/// Request/response primitive shared by every renter coordinator
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send `request` to `to` and wait for its reply
    async fn send(&self, to: &Contact, request: Request) -> TransportResult<Response>;
}

/// Overlay publish primitive
pub trait Publisher: Send + Sync {
    /// Queue `publication` for propagation; does not wait for delivery
    fn publish(&self, publication: Publication) -> TransportResult<()>;
}
