//! # Furrow Transport - Renter Wire Contract
//!
//! Defines what the renter says to farmers and the two seams it says it
//! through:
//!
//! - [`Messenger`]: send a request to a contact and await its response
//! - [`Publisher`]: announce a payload on an overlay topic, fire-and-forget
//!
//! Routing, serialization framing, authentication and NAT traversal live
//! behind these traits and are supplied by the node that embeds the renter.

#![forbid(unsafe_code)]

/// Transport errors
pub mod error;

/// Request, response and publication messages
pub mod messages;

/// Outbound transport traits
pub mod traits;

pub use error::{TransportError, TransportResult};
pub use messages::{
    AuditParams, ConsignParams, Method, MirrorParams, OfferParams, Publication, Request,
    RequestParams, Response, RetrieveParams,
};
pub use traits::{Messenger, Publisher};
