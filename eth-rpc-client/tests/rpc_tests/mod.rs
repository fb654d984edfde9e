//! Integration tests for the HTTP transport and client against a fake node

use std::sync::Once;
use std::time::Duration;

use serde_json::json;
use tracing_subscriber::EnvFilter;

use eth_rpc_client::{
    models::{BlockParam, BlockTransactions, TransactionRequest},
    units::{ether_to_wei, wei_to_hex},
    EthError, EthereumClient,
};

mod helpers;
use helpers::{spawn_mock_node, Reply};

static INIT: Once = Once::new();

/// Initializes the global logger (only once).
fn init_logger() {
    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env()
            .add_directive("eth_rpc_client=debug".parse().unwrap())
            .add_directive("actix_web=error".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

fn client_for(url: &str) -> EthereumClient {
    EthereumClient::new(url, Duration::from_secs(5)).expect("Failed to build client")
}

#[actix_web::test]
async fn test_minimal_block_end_to_end() {
    init_logger();
    let node = spawn_mock_node(vec![(
        "eth_getBlockByNumber",
        Reply::Result(json!({
            "number": "0x1",
            "difficulty": "0x12",
            "timestamp": "0x67643915",
            "transactions": [],
            "uncles": []
        })),
    )]);
    let client = client_for(&node.url);

    let block = client
        .block_by_number(BlockParam::Number(1), false)
        .await
        .unwrap()
        .expect("block should exist");

    assert_eq!(block.number, Some(1));
    assert_eq!(block.difficulty, "18");
    assert_eq!(block.timestamp.timestamp(), 1_734_621_461);
    assert_eq!(block.transactions, BlockTransactions::Hashes(vec![]));
    assert_eq!(block.hash, None);

    node.stop().await;
}

#[actix_web::test]
async fn test_full_block_maps_transactions() {
    init_logger();
    let node = spawn_mock_node(vec![(
        "eth_getBlockByHash",
        Reply::Result(json!({
            "number": "0x10",
            "hash": "0xb10c",
            "difficulty": "0x0",
            "baseFeePerGas": "0x3b9aca00",
            "timestamp": "0x67643915",
            "transactions": [{
                "blockHash": "0xb10c",
                "blockNumber": "0x10",
                "from": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "gas": "0x5208",
                "gasPrice": "0x2540be400",
                "hash": "0x7a",
                "input": "0x",
                "nonce": "0x0",
                "to": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
                "transactionIndex": "0x0",
                "value": "0xde0b6b3a7640000",
                "type": "0x0",
                "v": "0xa96",
                "r": "0x1",
                "s": "0x2"
            }],
            "uncles": []
        })),
    )]);
    let client = client_for(&node.url);

    let block = client.block_by_hash("0xb10c", true).await.unwrap().unwrap();
    assert_eq!(block.base_fee_per_gas.as_ref().unwrap().to_gwei().unwrap(), "1.000000000");

    let BlockTransactions::Full(transactions) = &block.transactions else {
        panic!("expected full transactions");
    };
    let tx = &transactions[0];
    assert_eq!(tx.gas, "21000");
    assert_eq!(tx.gas_price.to_gwei().unwrap(), "10.000000000");
    assert_eq!(tx.value.to_ether().unwrap(), "1.000000000000000000");
    assert_eq!(tx.v, 2710);

    node.stop().await;
}

#[actix_web::test]
async fn test_balance_and_primitives() {
    init_logger();
    let node = spawn_mock_node(vec![
        ("web3_clientVersion", Reply::Result(json!("Geth/v1.14.0-stable/linux-amd64/go1.22"))),
        ("eth_chainId", Reply::Result(json!("0x1"))),
        ("net_listening", Reply::Result(json!(true))),
        ("eth_getBalance", Reply::Result(json!("0x1bc16d674ec80000"))),
        ("eth_estimateGas", Reply::Result(json!("0x5208"))),
    ]);
    let client = client_for(&node.url);

    assert_eq!(
        client.client_version().await.unwrap(),
        "Geth/v1.14.0-stable/linux-amd64/go1.22"
    );
    assert_eq!(client.chain_id().await.unwrap(), 1);
    assert!(client.is_listening().await.unwrap());

    let balance = client
        .balance("0xD648CeeE0Dd7e8D42C4CA6a54AdeFeeC1af9E04b", BlockParam::Latest)
        .await
        .unwrap();
    assert_eq!(balance, "2000000000000000000");
    assert_eq!(balance.to_ether().unwrap(), "2.000000000000000000");

    let tx = TransactionRequest {
        from: Some("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".into()),
        to: Some("0x70997970C51812dc3A010C7d01b50e0d17dc79C8".into()),
        value: Some(wei_to_hex(ether_to_wei("1").unwrap().as_str()).unwrap()),
        ..Default::default()
    };
    assert_eq!(client.estimate_gas(&tx, BlockParam::Latest).await.unwrap(), "21000");

    node.stop().await;
}

#[actix_web::test]
async fn test_rpc_error_envelope() {
    init_logger();
    let node = spawn_mock_node(vec![(
        "eth_getBalance",
        Reply::Error(-32000, "header not found"),
    )]);
    let client = client_for(&node.url);

    let err = client
        .balance("0xabc", BlockParam::Number(99_999_999))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EthError::Rpc {
            code: -32000,
            message: "header not found".to_string()
        }
    );

    // Methods the node does not know come back as JSON-RPC errors too
    let err = client.hashrate().await.unwrap_err();
    assert!(matches!(err, EthError::Rpc { code: -32601, .. }));

    node.stop().await;
}

#[actix_web::test]
async fn test_http_error_status() {
    init_logger();
    let node = spawn_mock_node(vec![("eth_blockNumber", Reply::Status(503))]);
    let client = client_for(&node.url);

    let err = client.block_number().await.unwrap_err();
    assert!(matches!(err, EthError::HttpStatus(status) if status.as_u16() == 503));
    assert!(err.is_transport());

    node.stop().await;
}

#[actix_web::test]
async fn test_request_timeout() {
    init_logger();
    let node = spawn_mock_node(vec![(
        "eth_blockNumber",
        Reply::Delayed(Duration::from_secs(2), json!("0x1")),
    )]);
    let client = EthereumClient::new(&node.url, Duration::from_millis(200)).unwrap();

    assert_eq!(client.block_number().await, Err(EthError::Timeout));

    node.stop().await;
}

#[actix_web::test]
async fn test_null_results_map_to_none() {
    init_logger();
    let node = spawn_mock_node(vec![
        ("eth_getTransactionReceipt", Reply::Result(json!(null))),
        ("eth_getTransactionByHash", Reply::Result(json!(null))),
    ]);
    let client = client_for(&node.url);

    assert_eq!(client.transaction_receipt("0x7a").await.unwrap(), None);
    assert_eq!(client.transaction_by_hash("0x7a").await.unwrap(), None);

    node.stop().await;
}

#[actix_web::test]
async fn test_malformed_result_is_reported() {
    init_logger();
    let node = spawn_mock_node(vec![
        ("eth_gasPrice", Reply::Result(json!(1_000_000_000u64))),
        ("eth_blockNumber", Reply::Result(json!("0x"))),
    ]);
    let client = client_for(&node.url);

    assert!(matches!(
        client.gas_price().await,
        Err(EthError::TypeMismatch { expected: "string", found: "integer" })
    ));
    assert_eq!(
        client.block_number().await,
        Err(EthError::InvalidHex("0x".to_string()))
    );

    node.stop().await;
}
