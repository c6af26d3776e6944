//! Storage contracts and their solicitation topics
//!
//! A [`Contract`] is created by the caller before negotiation and never mutated
//! afterwards. Its topic string addresses the overlay's publish/subscribe layer:
//! farmers subscribe to the criteria they are willing to serve, so the topic is
//! derived from the contract's size and duration rather than its identity.

use crate::errors::ContractError;
use crate::identifiers::{DataHash, NodeId};
use serde::{Deserialize, Serialize};

/// Prefix shared by every contract solicitation topic.
pub const CONTRACT_TOPIC_PREFIX: &str = "0f";

const MIB: u64 = 1024 * 1024;
const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Coarse bucket used for each topic criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    /// Opcode 0x01
    Low,
    /// Opcode 0x02
    Medium,
    /// Opcode 0x03
    High,
}

impl Degree {
    /// Topic opcode for this degree
    pub fn opcode(self) -> u8 {
        match self {
            Self::Low => 0x01,
            Self::Medium => 0x02,
            Self::High => 0x03,
        }
    }

    fn for_size(bytes: u64) -> Self {
        match bytes {
            b if b <= 8 * MIB => Self::Low,
            b if b <= 32 * MIB => Self::Medium,
            _ => Self::High,
        }
    }

    fn for_duration(ms: u64) -> Self {
        match ms {
            d if d <= 30 * DAY_MS => Self::Low,
            d if d <= 90 * DAY_MS => Self::Medium,
            _ => Self::High,
        }
    }
}

/// Immutable storage proposal identified by the hash of the data it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    data_hash: DataHash,
    data_size: u64,
    store_begin: u64,
    store_end: u64,
    audit_count: u32,
    renter_id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    farmer_id: Option<NodeId>,
    availability: Degree,
    speed: Degree,
}

impl Contract {
    /// Start building a contract for `data_hash` proposed by `renter_id`
    pub fn builder(data_hash: DataHash, renter_id: NodeId) -> ContractBuilder {
        ContractBuilder::new(data_hash, renter_id)
    }

    /// Content identifier of the data under contract
    pub fn data_hash(&self) -> DataHash {
        self.data_hash
    }

    /// Shard size in bytes
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Storage window start, unix milliseconds
    pub fn store_begin(&self) -> u64 {
        self.store_begin
    }

    /// Storage window end, unix milliseconds
    pub fn store_end(&self) -> u64 {
        self.store_end
    }

    /// Number of audits the renter may issue
    pub fn audit_count(&self) -> u32 {
        self.audit_count
    }

    /// Renter that proposed the contract
    pub fn renter_id(&self) -> NodeId {
        self.renter_id
    }

    /// Farmer bound to the contract, once an offer names one
    pub fn farmer_id(&self) -> Option<NodeId> {
        self.farmer_id
    }

    /// Overlay topic this contract is solicited on
    ///
    /// Format: `0f` followed by the size, duration, availability and speed
    /// opcodes, each as two hex digits.
    pub fn topic_string(&self) -> String {
        let size = Degree::for_size(self.data_size);
        let duration = Degree::for_duration(self.store_end.saturating_sub(self.store_begin));
        format!(
            "{CONTRACT_TOPIC_PREFIX}{:02x}{:02x}{:02x}{:02x}",
            size.opcode(),
            duration.opcode(),
            self.availability.opcode(),
            self.speed.opcode()
        )
    }

    /// Serialized body sent to the overlay
    pub fn to_value(&self) -> Result<serde_json::Value, ContractError> {
        serde_json::to_value(self).map_err(|e| ContractError::Encoding(e.to_string()))
    }

    /// Decode a contract received from a peer
    pub fn from_value(value: serde_json::Value) -> Result<Self, ContractError> {
        let contract: Self =
            serde_json::from_value(value).map_err(|e| ContractError::Malformed(e.to_string()))?;
        contract.check()?;
        Ok(contract)
    }

    fn check(&self) -> Result<(), ContractError> {
        if self.data_size == 0 {
            return Err(ContractError::EmptyData);
        }
        if self.store_end <= self.store_begin {
            return Err(ContractError::InvalidWindow {
                begin: self.store_begin,
                end: self.store_end,
            });
        }
        Ok(())
    }
}

/// Builder for [`Contract`]
#[derive(Debug, Clone)]
pub struct ContractBuilder {
    contract: Contract,
}

impl ContractBuilder {
    fn new(data_hash: DataHash, renter_id: NodeId) -> Self {
        Self {
            contract: Contract {
                data_hash,
                data_size: 0,
                store_begin: 0,
                store_end: 0,
                audit_count: 0,
                renter_id,
                farmer_id: None,
                availability: Degree::Low,
                speed: Degree::Low,
            },
        }
    }

    /// Shard size in bytes
    pub fn data_size(mut self, bytes: u64) -> Self {
        self.contract.data_size = bytes;
        self
    }

    /// Storage window in unix milliseconds
    pub fn store_window(mut self, begin: u64, end: u64) -> Self {
        self.contract.store_begin = begin;
        self.contract.store_end = end;
        self
    }

    /// Number of audits
    pub fn audit_count(mut self, count: u32) -> Self {
        self.contract.audit_count = count;
        self
    }

    /// Bind the contract to a farmer
    pub fn farmer_id(mut self, farmer: NodeId) -> Self {
        self.contract.farmer_id = Some(farmer);
        self
    }

    /// Requested availability degree
    pub fn availability(mut self, degree: Degree) -> Self {
        self.contract.availability = degree;
        self
    }

    /// Requested transfer speed degree
    pub fn speed(mut self, degree: Degree) -> Self {
        self.contract.speed = degree;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<Contract, ContractError> {
        self.contract.check()?;
        Ok(self.contract)
    }
}
