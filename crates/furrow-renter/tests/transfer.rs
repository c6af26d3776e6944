//! Transfer Authorization Tests

use assert_matches::assert_matches;
use furrow_core::{AuditPublicRecord, TransferDirection};
use furrow_renter::{RenterError, TransferAuthCoordinator};
use furrow_testkit::*;
use furrow_transport::{Method, RequestParams, TransportError};
use serde_json::json;
use std::sync::Arc;

fn setup() -> (Arc<MockMessenger>, TransferAuthCoordinator) {
    let messenger = Arc::new(MockMessenger::new());
    let transfer = TransferAuthCoordinator::new(messenger.clone(), test_contact(0));
    (messenger, transfer)
}

fn audit_record() -> AuditPublicRecord {
    AuditPublicRecord::new(vec!["leaf-a".to_string(), "leaf-b".to_string()])
}

#[tokio::test]
async fn consign_returns_push_pointer_with_token_verbatim() {
    let (messenger, transfer) = setup();
    let farmer = test_contact(1);
    let contract = bound_contract(1, &farmer.node_id);
    messenger.respond_ok(&farmer.node_id, json!({ "token": "push-7f3a" }));

    let pointer = transfer
        .request_consign_pointer(&farmer, &contract, &audit_record())
        .await
        .unwrap();

    assert_eq!(pointer.direction(), TransferDirection::Push);
    assert_eq!(pointer.token().as_str(), "push-7f3a");
    assert_eq!(pointer.farmer(), &farmer);
    assert_eq!(pointer.data_hash(), contract.data_hash());
}

#[tokio::test]
async fn consign_request_carries_audit_record() {
    let (messenger, transfer) = setup();
    let farmer = test_contact(1);
    messenger.respond_ok(&farmer.node_id, json!({ "token": "t" }));

    transfer
        .request_consign_pointer(&farmer, &test_contract(1), &audit_record())
        .await
        .unwrap();

    let sent = messenger.sent_to(&farmer.node_id);
    assert_matches!(
        &sent[0].params,
        RequestParams::Consign(params) if params.audit_tree == audit_record()
    );
    assert_eq!(sent[0].contact, test_contact(0));
}

#[tokio::test]
async fn retrieve_returns_pull_pointer() {
    let (messenger, transfer) = setup();
    let farmer = test_contact(2);
    let contract = bound_contract(2, &farmer.node_id);
    messenger.respond_ok(&farmer.node_id, json!({ "token": "pull-01" }));

    let pointer = transfer
        .request_retrieve_pointer(&farmer, &contract)
        .await
        .unwrap();

    assert_eq!(pointer.direction(), TransferDirection::Pull);
    assert_eq!(pointer.token().as_str(), "pull-01");
    assert_eq!(messenger.sent_to(&farmer.node_id)[0].method(), Method::Retrieve);
}

#[tokio::test]
async fn missing_or_non_string_token_is_rejected() {
    let (messenger, transfer) = setup();
    let farmer = test_contact(3);

    for result in [json!({}), json!({ "token": 42 }), json!(null)] {
        messenger.respond_ok(&farmer.node_id, result);
        assert_eq!(
            transfer
                .request_retrieve_pointer(&farmer, &test_contract(3))
                .await,
            Err(RenterError::MissingToken {
                farmer: farmer.node_id,
                method: Method::Retrieve,
            })
        );
    }
}

#[tokio::test]
async fn farmer_refusal_is_reported_as_remote() {
    let (messenger, transfer) = setup();
    let farmer = test_contact(4);
    messenger.respond_error(&farmer.node_id, "contract not found");

    let result = transfer
        .request_consign_pointer(&farmer, &test_contract(4), &audit_record())
        .await;

    assert_matches!(
        result,
        Err(RenterError::Remote { method: Method::Consign, message, .. }) if message == "contract not found"
    );
}

#[tokio::test]
async fn unreachable_farmer_fails_with_transport_error() {
    let (_, transfer) = setup();
    let farmer = test_contact(5);

    let result = transfer
        .request_retrieve_pointer(&farmer, &test_contract(5))
        .await;

    assert_matches!(
        result,
        Err(RenterError::Transport(TransportError::Unreachable { peer, .. })) if peer == farmer.node_id
    );
}
