//! Request, response and publication messages
//!
//! | Method   | Params                                   | Success result      |
//! |----------|------------------------------------------|---------------------|
//! | AUDIT    | data hash, challenge                     | `{ "proofs": [..] }`|
//! | CONSIGN  | data hash, audit public record           | `{ "token": ".." }` |
//! | RETRIEVE | data hash                                | `{ "token": ".." }` |
//! | MIRROR   | data hash, token, source farmer          | ack                 |
//! | OFFER    | contract (inbound, farmer to renter)     | ack                 |
//!
//! Every request carries the requester's own contact.

use furrow_core::{AuditPublicRecord, AuthToken, Challenge, Contact, DataHash};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Methods and Parameters
// =============================================================================

/// Protocol method name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Proof-of-storage challenge
    Audit,
    /// Push authorization
    Consign,
    /// Pull authorization
    Retrieve,
    /// Replicate from another farmer
    Mirror,
    /// Farmer's answer to a solicitation
    Offer,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Audit => "AUDIT",
            Self::Consign => "CONSIGN",
            Self::Retrieve => "RETRIEVE",
            Self::Mirror => "MIRROR",
            Self::Offer => "OFFER",
        };
        f.write_str(name)
    }
}

/// AUDIT parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditParams {
    /// Audited shard
    pub data_hash: DataHash,
    /// Challenge the farmer must answer
    pub challenge: Challenge,
}

/// CONSIGN parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsignParams {
    /// Shard to be pushed
    pub data_hash: DataHash,
    /// Leaves the farmer validates later proofs against
    pub audit_tree: AuditPublicRecord,
}

/// RETRIEVE parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveParams {
    /// Shard to be pulled
    pub data_hash: DataHash,
}

/// MIRROR parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorParams {
    /// Shard to replicate
    pub data_hash: DataHash,
    /// Pull token issued by the source farmer
    pub token: AuthToken,
    /// Farmer holding the source copy
    pub farmer: Contact,
}

/// OFFER parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferParams {
    /// Contract as completed by the offering farmer
    pub contract: serde_json::Value,
}

/// Parameters tagged by method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "UPPERCASE")]
pub enum RequestParams {
    /// AUDIT
    Audit(AuditParams),
    /// CONSIGN
    Consign(ConsignParams),
    /// RETRIEVE
    Retrieve(RetrieveParams),
    /// MIRROR
    Mirror(MirrorParams),
    /// OFFER
    Offer(OfferParams),
}

impl RequestParams {
    /// Method these parameters belong to
    pub fn method(&self) -> Method {
        match self {
            Self::Audit(_) => Method::Audit,
            Self::Consign(_) => Method::Consign,
            Self::Retrieve(_) => Method::Retrieve,
            Self::Mirror(_) => Method::Mirror,
            Self::Offer(_) => Method::Offer,
        }
    }
}

// =============================================================================
// Envelopes
// =============================================================================

/// Outbound request: parameters plus the requester's identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Method and parameters
    #[serde(flatten)]
    pub params: RequestParams,
    /// Requester contact
    pub contact: Contact,
}

impl Request {
    /// Create a request sent on behalf of `contact`
    pub fn new(params: RequestParams, contact: Contact) -> Self {
        Self { params, contact }
    }

    /// Request method
    pub fn method(&self) -> Method {
        self.params.method()
    }
}

/// Reply to a [`Request`]
///
/// A reply with `error` set is an application-level failure reported by the
/// peer; the round trip itself succeeded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    /// Method-specific result fields
    #[serde(default)]
    pub result: serde_json::Value,
    /// Application error reported by the peer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Successful reply
    pub fn ok(result: serde_json::Value) -> Self {
        Self {
            result,
            error: None,
        }
    }

    /// Reply carrying an application error
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            result: serde_json::Value::Null,
            error: Some(message.into()),
        }
    }

    /// Split into result fields or the peer's error message
    pub fn into_result(self) -> Result<serde_json::Value, String> {
        match self.error {
            Some(message) => Err(message),
            None => Ok(self.result),
        }
    }
}

/// Fire-and-forget announcement on an overlay topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Overlay topic
    pub topic: String,
    /// Announced payload
    pub contents: serde_json::Value,
    /// Routing and deduplication key
    pub key: DataHash,
}
