//! Stored items and their per-farmer challenge queues
//!
//! A [`StorageItem`] is shared by every task auditing the same shard. Taking a
//! challenge is a destructive read performed under the item's lock, so two
//! concurrent audits against one farmer never receive the same challenge.

use crate::audit::Challenge;
use crate::errors::ChallengeError;
use crate::identifiers::{DataHash, NodeId};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

/// A shard the renter has stored, with one challenge queue per farmer holding it
#[derive(Debug)]
pub struct StorageItem {
    hash: DataHash,
    challenges: Mutex<HashMap<NodeId, VecDeque<Challenge>>>,
}

impl StorageItem {
    /// Create an item with no farmer relationships
    pub fn new(hash: DataHash) -> Self {
        Self {
            hash,
            challenges: Mutex::new(HashMap::new()),
        }
    }

    /// Content identifier of the stored shard
    pub fn hash(&self) -> DataHash {
        self.hash
    }

    /// Open or replenish a farmer's challenge queue
    ///
    /// The first call for a farmer establishes the audit relationship; later
    /// challenges queue behind the ones still unconsumed.
    pub fn add_challenges(&self, farmer: NodeId, challenges: impl IntoIterator<Item = Challenge>) {
        self.challenges
            .lock()
            .entry(farmer)
            .or_default()
            .extend(challenges);
    }

    /// Unconsumed challenges for a farmer, or `None` without a relationship
    pub fn remaining_challenges(&self, farmer: &NodeId) -> Option<usize> {
        self.challenges.lock().get(farmer).map(VecDeque::len)
    }

    /// Dequeue the oldest unconsumed challenge for a farmer
    pub fn take_challenge(&self, farmer: &NodeId) -> Result<Challenge, ChallengeError> {
        let mut challenges = self.challenges.lock();
        let queue = challenges
            .get_mut(farmer)
            .ok_or(ChallengeError::NoContract { farmer: *farmer })?;
        queue
            .pop_front()
            .ok_or(ChallengeError::Exhausted { farmer: *farmer })
    }
}
