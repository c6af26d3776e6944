//! Audit Coordinator Tests
//!
//! Challenges are spent in order, one per audit, and errors from the farmer
//! or the transport surface unchanged.

use assert_matches::assert_matches;
use furrow_core::{Challenge, Contact, StorageItem};
use furrow_renter::{AuditCoordinator, RenterError};
use furrow_testkit::*;
use furrow_transport::{
    Method, Request, RequestParams, Response, TransportError, TransportResult,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn echo_challenge(request: &Request) -> TransportResult<Response> {
    match &request.params {
        RequestParams::Audit(params) => Ok(Response::ok(json!({
            "proofs": [params.challenge.as_str(), "sibling"]
        }))),
        other => Err(TransportError::Other(format!("unexpected {}", other.method()))),
    }
}

fn setup(challenges: usize) -> (Arc<MockMessenger>, AuditCoordinator, Contact, StorageItem) {
    let messenger = Arc::new(MockMessenger::new());
    let audit = AuditCoordinator::new(messenger.clone(), test_contact(0));
    let farmer = test_contact(1);
    let item = test_item(1, &farmer.node_id, challenges);
    (messenger, audit, farmer, item)
}

fn sent_challenges(messenger: &MockMessenger, farmer: &Contact) -> Vec<Challenge> {
    messenger
        .sent_to(&farmer.node_id)
        .into_iter()
        .filter_map(|request| match request.params {
            RequestParams::Audit(params) => Some(params.challenge),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Challenge consumption
// ============================================================================

#[tokio::test]
async fn each_audit_spends_the_next_challenge() {
    let (messenger, audit, farmer, item) = setup(3);
    messenger.respond_with(&farmer.node_id, echo_challenge);

    for expected in test_challenges(3) {
        let proof = audit.request_proof(&farmer, &item).await.unwrap();
        assert_eq!(proof.as_value(), &json!(expected.as_str()));
    }

    assert_eq!(sent_challenges(&messenger, &farmer), test_challenges(3));
    assert_eq!(item.remaining_challenges(&farmer.node_id), Some(0));
}

#[tokio::test]
async fn exhausted_challenges_fail_without_a_request() {
    let (messenger, audit, farmer, item) = setup(1);
    messenger.respond_with(&farmer.node_id, echo_challenge);

    audit.request_proof(&farmer, &item).await.unwrap();
    let result = audit.request_proof(&farmer, &item).await;

    assert_eq!(
        result,
        Err(RenterError::NoRemainingChallenges {
            farmer: farmer.node_id
        })
    );
    assert_eq!(messenger.request_count(), 1);
}

#[tokio::test]
async fn audit_without_contract_fails_without_a_request() {
    let (messenger, audit, _, item) = setup(2);
    let stranger = test_contact(9);

    assert_eq!(
        audit.request_proof(&stranger, &item).await,
        Err(RenterError::NoContractWithFarmer {
            farmer: stranger.node_id
        })
    );
    assert_eq!(messenger.request_count(), 0);
}

#[tokio::test]
async fn replenished_challenges_are_spent_after_existing_ones() {
    let (messenger, audit, farmer, item) = setup(1);
    messenger.respond_with(&farmer.node_id, echo_challenge);
    item.add_challenges(farmer.node_id, [Challenge::new("late")]);

    audit.request_proof(&farmer, &item).await.unwrap();
    let proof = audit.request_proof(&farmer, &item).await.unwrap();

    assert_eq!(proof.as_value(), &json!("late"));
}

// ============================================================================
// Request shape
// ============================================================================

#[tokio::test]
async fn audit_request_names_shard_and_renter() {
    let (messenger, audit, farmer, item) = setup(1);
    messenger.respond_with(&farmer.node_id, echo_challenge);

    audit.request_proof(&farmer, &item).await.unwrap();

    let sent = messenger.sent_to(&farmer.node_id);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method(), Method::Audit);
    assert_eq!(sent[0].contact, test_contact(0));
    assert_matches!(
        &sent[0].params,
        RequestParams::Audit(params) if params.data_hash == item.hash()
    );
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn transport_error_is_returned_verbatim_and_spends_the_challenge() {
    let (messenger, audit, farmer, item) = setup(2);
    let timeout = TransportError::Timeout {
        peer: farmer.node_id,
        timeout_ms: 500,
    };
    messenger.fail_with(&farmer.node_id, timeout.clone());

    assert_eq!(
        audit.request_proof(&farmer, &item).await,
        Err(RenterError::Transport(timeout))
    );
    assert_eq!(item.remaining_challenges(&farmer.node_id), Some(1));
}

#[tokio::test]
async fn farmer_error_is_reported_as_remote() {
    let (messenger, audit, farmer, item) = setup(1);
    messenger.respond_error(&farmer.node_id, "shard not found");

    assert_eq!(
        audit.request_proof(&farmer, &item).await,
        Err(RenterError::Remote {
            farmer: farmer.node_id,
            method: Method::Audit,
            message: "shard not found".to_string(),
        })
    );
}

#[tokio::test]
async fn reply_without_proofs_is_invalid() {
    let (messenger, audit, farmer, item) = setup(2);
    messenger.respond_ok(&farmer.node_id, json!({ "proofs": [] }));

    assert_eq!(
        audit.request_proof(&farmer, &item).await,
        Err(RenterError::InvalidProof {
            farmer: farmer.node_id
        })
    );
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_audits_never_share_a_challenge() {
    const QUEUED: usize = 64;
    const AUDITS: usize = 80;

    let (messenger, audit, farmer, item) = setup(QUEUED);
    messenger.respond_with(&farmer.node_id, echo_challenge);
    let item = Arc::new(item);

    let tasks: Vec<_> = (0..AUDITS)
        .map(|_| {
            let audit = audit.clone();
            let farmer = farmer.clone();
            let item = Arc::clone(&item);
            tokio::spawn(async move { audit.request_proof(&farmer, &item).await })
        })
        .collect();

    let mut proofs = HashSet::new();
    let mut exhausted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(proof) => assert!(proofs.insert(proof.into_value().to_string())),
            Err(RenterError::NoRemainingChallenges { farmer: id }) => {
                assert_eq!(id, farmer.node_id);
                exhausted += 1;
            }
            Err(other) => panic!("unexpected audit failure: {other}"),
        }
    }

    assert_eq!(proofs.len(), QUEUED);
    assert_eq!(exhausted, AUDITS - QUEUED);
    assert_eq!(messenger.request_count(), QUEUED);
    assert_eq!(sent_challenges(&messenger, &farmer).into_iter().collect::<HashSet<_>>().len(), QUEUED);
}
