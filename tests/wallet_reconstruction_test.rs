//! End-to-end reconstruction of LP positions from mock explorer streams.

use poolsight::correlate::{positions_from, CorrelationError, TransactionCorrelator};
use poolsight::datasource::{InternalTx, MockExplorer, NormalTx, TokenTransfer};
use poolsight::domain::token::known;
use poolsight::domain::Address;
use std::sync::Arc;

const WALLET: &str = "0x1111111111111111111111111111111111111111";
const ROUTER: &str = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";
const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
const PAIR: &str = "0xa478c2975ab1ea89e8196811f51a7b7ade33eb11";

fn normal_tx(hash: &str, to: &str, value: &str) -> NormalTx {
    NormalTx {
        hash: hash.to_string(),
        time_stamp: "1611859740".to_string(),
        from: WALLET.to_string(),
        to: to.to_string(),
        value: value.to_string(),
        gas_used: "150000".to_string(),
        gas_price: "50000000000".to_string(),
        is_error: "0".to_string(),
        txreceipt_status: "1".to_string(),
    }
}

fn transfer(hash: &str, from: &str, to: &str, contract: &str, value: &str, symbol: &str) -> TokenTransfer {
    TokenTransfer {
        hash: hash.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        contract_address: contract.to_string(),
        value: value.to_string(),
        token_symbol: symbol.to_string(),
        token_decimal: "18".to_string(),
    }
}

fn correlator(mock: MockExplorer) -> TransactionCorrelator {
    TransactionCorrelator::new(
        Arc::new(mock),
        Address::new(WALLET),
        Address::new(ROUTER),
        known::weth(),
        "UNI-V2",
    )
}

#[tokio::test]
async fn eth_plus_token_deposit_becomes_a_position() {
    // 0.075 ETH sent with the call, 100 DAI out, 5 LP back.
    let mock = MockExplorer::new()
        .with_normal_tx(normal_tx("0xd1", ROUTER, "75000000000000000"))
        .with_token_transfer(transfer(
            "0xd1",
            WALLET,
            ROUTER,
            DAI,
            "100000000000000000000",
            "DAI",
        ))
        .with_token_transfer(transfer(
            "0xd1",
            PAIR,
            WALLET,
            PAIR,
            "5000000000000000000",
            "UNI-V2",
        ));

    let transactions = correlator(mock).correlate().await.unwrap();
    assert_eq!(transactions.len(), 1);

    let positions = positions_from(&transactions).unwrap();
    let position = &positions[0];

    // Encounter order: the seeded wrapped-native leg comes first.
    assert_eq!(position.token_a.symbol, "WETH");
    assert!((position.initial_a - 0.075).abs() < 1e-12);
    assert_eq!(position.token_b.symbol, "DAI");
    assert!((position.initial_b - 100.0).abs() < 1e-9);
    assert_eq!(position.pair.symbol, "UNI-V2 WETH DAI");
    assert_eq!(position.pair.address.as_str(), PAIR);
    assert!((position.initial_shares - 5.0).abs() < 1e-12);
    assert_eq!(position.opened_at.timestamp(), 1_611_859_740);
}

#[tokio::test]
async fn router_refund_nets_against_outgoing_native_leg() {
    // 1 ETH sent, router returns 0.2 ETH internally: net 0.8 ETH deposited.
    let mock = MockExplorer::new()
        .with_normal_tx(normal_tx("0xd2", ROUTER, "1000000000000000000"))
        .with_token_transfer(transfer(
            "0xd2",
            WALLET,
            ROUTER,
            DAI,
            "100000000000000000000",
            "DAI",
        ))
        .with_token_transfer(transfer(
            "0xd2",
            PAIR,
            WALLET,
            PAIR,
            "5000000000000000000",
            "UNI-V2",
        ))
        .with_internal_tx(InternalTx {
            hash: "0xd2".to_string(),
            from: ROUTER.to_string(),
            to: WALLET.to_string(),
            value: "200000000000000000".to_string(),
        });

    let positions = positions_from(&correlator(mock).correlate().await.unwrap()).unwrap();
    assert_eq!(positions.len(), 1);
    assert!((positions[0].initial_a - 0.8).abs() < 1e-12);
}

#[tokio::test]
async fn swap_transactions_are_discarded() {
    // ETH in, DAI out: nets to two flows, not a deposit.
    let mock = MockExplorer::new()
        .with_normal_tx(normal_tx("0xs1", ROUTER, "500000000000000000"))
        .with_token_transfer(transfer(
            "0xs1",
            ROUTER,
            WALLET,
            DAI,
            "900000000000000000000",
            "DAI",
        ));

    let transactions = correlator(mock).correlate().await.unwrap();
    assert!(transactions.is_empty());
}

#[tokio::test]
async fn failed_and_unrelated_transactions_are_not_seeded() {
    let mut reverted = normal_tx("0xf1", ROUTER, "1000000000000000000");
    reverted.is_error = "1".to_string();
    let other_contract = normal_tx("0xf2", "0x2222222222222222222222222222222222222222", "0");

    let mock = MockExplorer::new()
        .with_normal_tx(reverted)
        .with_normal_tx(other_contract);

    let transactions = correlator(mock).correlate().await.unwrap();
    assert!(transactions.is_empty());
}

#[tokio::test]
async fn direction_attribution_is_case_insensitive() {
    let wallet_upper = WALLET.to_uppercase().replace("0X", "0x");
    let mock = MockExplorer::new()
        .with_normal_tx(normal_tx("0xd3", ROUTER, "75000000000000000"))
        .with_token_transfer(transfer(
            "0xd3",
            &wallet_upper,
            ROUTER,
            DAI,
            "100000000000000000000",
            "DAI",
        ))
        .with_token_transfer(transfer(
            "0xd3",
            PAIR,
            &wallet_upper,
            PAIR,
            "5000000000000000000",
            "UNI-V2",
        ));

    let positions = positions_from(&correlator(mock).correlate().await.unwrap()).unwrap();
    assert_eq!(positions.len(), 1);
    assert!((positions[0].initial_b - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn transfer_touching_neither_side_is_fatal() {
    let mock = MockExplorer::new()
        .with_normal_tx(normal_tx("0xd4", ROUTER, "75000000000000000"))
        .with_token_transfer(transfer(
            "0xd4",
            "0x3333333333333333333333333333333333333333",
            "0x4444444444444444444444444444444444444444",
            DAI,
            "1",
            "DAI",
        ));

    let err = correlator(mock).correlate().await.unwrap_err();
    assert!(matches!(
        err,
        CorrelationError::UnattributableTransfer { .. }
    ));
}
