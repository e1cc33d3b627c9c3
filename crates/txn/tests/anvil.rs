use std::sync::Arc;

use alloy::{
    network::ReceiptResponse,
    primitives::{U256, utils::parse_ether},
    providers::Provider,
};
use bera_txn::{
    collab::{MemoryHistory, ToastBoard},
    coordinator::TxnCoordinator,
    error::ErrorKind,
    options::TxnOptions,
    primitive::{ProviderSender, ProviderWriter},
    state::{LifecycleState, ModalName},
    testing::{Recorder, TestChain},
    types::{ActionType, ContractWrite, Operation, ValueSend},
};

/// Sends native value through a local node and follows it to the receipt.
#[tokio::test]
async fn test_fund_write_on_node() {
    let node = TestChain::new();
    let (alice, bob) = (node.account(0), node.account(1));
    let history = Arc::new(MemoryHistory::new());
    let board = Arc::new(ToastBoard::new());
    let coordinator = TxnCoordinator::new(
        node.chain(),
        TxnOptions::new("Send 1 BERA").with_action_type(ActionType::Transfer),
        ProviderWriter::new(node.provider.clone()),
        ProviderSender::new(node.provider.clone()),
    )
    .with_history(history.clone())
    .with_presenter(board.clone());

    let bob_before = node.provider.get_balance(bob).await.unwrap();
    let session = coordinator
        .fund_write(ValueSend::ether(bob, "1").unwrap().with_from(alice))
        .await;

    let LifecycleState::Success { hash } = session.state().clone() else {
        panic!("expected success, got {:?}", session.state());
    };
    let receipt = node.provider.get_transaction_receipt(hash).await.unwrap().unwrap();
    assert!(receipt.status());
    assert_eq!(
        node.provider.get_balance(bob).await.unwrap(),
        bob_before + parse_ether("1").unwrap()
    );

    let entries = history.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].hash, hash);
    assert_eq!(session.modals().open(), vec![ModalName::Success]);

    // Only the success toast is left
    let visible = board.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].1.hash, Some(hash));
}

#[tokio::test]
async fn test_contract_write_on_node() {
    let node = TestChain::new();
    let coordinator = TxnCoordinator::new(
        node.chain(),
        TxnOptions::new("Ping"),
        ProviderWriter::new(node.provider.clone()),
        ProviderSender::new(node.provider.clone()),
    );

    let session = coordinator
        .write(
            ContractWrite::from_hex(node.account(2), "0xdeadbeef")
                .unwrap()
                .with_from(node.account(0))
                .with_gas(100_000),
        )
        .await;

    assert!(matches!(session.state(), LifecycleState::Success { .. }));
    assert!(coordinator.status(Operation::ContractWrite).is_success);
}

/// Node-side insufficient funds failures are expected and not reported.
#[tokio::test]
async fn test_insufficient_funds_on_node() {
    let node = TestChain::new();
    let recorder = Arc::new(Recorder::new());
    let coordinator = TxnCoordinator::new(
        node.chain(),
        TxnOptions::new("Send everything"),
        ProviderWriter::new(node.provider.clone()),
        ProviderSender::new(node.provider.clone()),
    )
    .with_reporter(recorder.clone())
    .with_history(recorder.clone());

    let balance = node.provider.get_balance(node.account(0)).await.unwrap();
    let session = coordinator
        .fund_write(
            ValueSend::new(node.account(1), balance + U256::from(1)).with_from(node.account(0)),
        )
        .await;

    let LifecycleState::Error { failure } = session.state() else {
        panic!("expected error, got {:?}", session.state());
    };
    assert_eq!(failure.kind(), ErrorKind::InsufficientFunds, "{}", failure.message);
    assert!(recorder.captured().is_empty());
    assert!(recorder.history().is_empty());
}
