//! Deterministic fixtures
//!
//! Seeded constructors give stable identities so assertions can name the
//! exact peer they expect. `random_contact` is for tests that only need a
//! distinct peer.

use furrow_core::{
    AuthToken, Challenge, Contact, Contract, DataHash, NodeId, StorageItem, TransferDirection,
    TransferPointer, ID_LEN,
};
use rand::Rng;

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Node id filled with `seed`
pub fn test_node_id(seed: u8) -> NodeId {
    NodeId::from_bytes([seed; ID_LEN])
}

/// Loopback contact for node `seed`
pub fn test_contact(seed: u8) -> Contact {
    Contact::new(test_node_id(seed), "127.0.0.1", 4000 + u16::from(seed))
}

/// Contact with a random identity and port
pub fn random_contact() -> Contact {
    let mut rng = rand::thread_rng();
    let mut bytes = [0u8; ID_LEN];
    rng.fill(&mut bytes);
    Contact::new(NodeId::from_bytes(bytes), "127.0.0.1", rng.gen_range(1024..u16::MAX))
}

/// Hash of the shard identified by `seed`
pub fn test_data_hash(seed: u8) -> DataHash {
    DataHash::of(&[seed; 32])
}

/// Unbound 1 MiB, 30 day contract for shard `seed`, owned by renter 0
pub fn test_contract(seed: u8) -> Contract {
    Contract::builder(test_data_hash(seed), test_node_id(0))
        .data_size(1024 * 1024)
        .store_window(0, 30 * DAY_MS)
        .audit_count(12)
        .build()
        .expect("fixture contract is valid")
}

/// `test_contract(seed)` bound to `farmer`
pub fn bound_contract(seed: u8, farmer: &NodeId) -> Contract {
    Contract::builder(test_data_hash(seed), test_node_id(0))
        .data_size(1024 * 1024)
        .store_window(0, 30 * DAY_MS)
        .audit_count(12)
        .farmer_id(*farmer)
        .build()
        .expect("fixture contract is valid")
}

/// Challenges `challenge-0 .. challenge-{count-1}`
pub fn test_challenges(count: usize) -> Vec<Challenge> {
    (0..count)
        .map(|i| Challenge::new(format!("challenge-{i}")))
        .collect()
}

/// Shard `seed` audited at `farmer`, holding `challenges` queued challenges
pub fn test_item(seed: u8, farmer: &NodeId, challenges: usize) -> StorageItem {
    let item = StorageItem::new(test_data_hash(seed));
    item.add_challenges(*farmer, test_challenges(challenges));
    item
}

/// Pull pointer for shard `seed` issued by `source`
pub fn test_pull_pointer(source: &Contact, seed: u8) -> TransferPointer {
    TransferPointer::new(
        source.clone(),
        test_data_hash(seed),
        AuthToken::new(format!("token-{}-{seed}", source.port)),
        TransferDirection::Pull,
    )
}
