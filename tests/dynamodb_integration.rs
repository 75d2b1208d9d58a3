//! DynamoDB integration tests
//!
//! These tests require a reachable DynamoDB endpoint (e.g. DynamoDB Local)
//! with a table keyed on `order_id`.
//! Set DYNAMODB_TEST_ENDPOINT (and optionally DYNAMODB_TEST_TABLE) to run.

use orders_loader::loader::Loader;
use orders_loader::table::{DynamoTable, TableHandle};
use orders_loader::{Error, LoaderConfig, TableStatus};
use serde_json::json;
use std::sync::Arc;

/// Get test config from environment or skip
fn get_test_config() -> Option<LoaderConfig> {
    let endpoint = std::env::var("DYNAMODB_TEST_ENDPOINT").ok()?;
    let table = std::env::var("DYNAMODB_TEST_TABLE").unwrap_or_else(|_| "orders-table".to_string());
    Some(
        LoaderConfig::new()
            .with_table_name(table)
            .with_endpoint_url(endpoint),
    )
}

#[tokio::test]
async fn test_dynamodb_status() {
    let Some(config) = get_test_config() else {
        println!("Skipping: DYNAMODB_TEST_ENDPOINT not set");
        return;
    };

    let table = DynamoTable::connect(&config).await;
    let status = table.status().await;
    assert!(status.is_ok(), "Status check failed: {:?}", status.err());
    assert_eq!(status.unwrap(), TableStatus::Active);
}

#[tokio::test]
async fn test_dynamodb_missing_table() {
    let Some(config) = get_test_config() else {
        println!("Skipping: DYNAMODB_TEST_ENDPOINT not set");
        return;
    };

    let config = config.with_table_name("orders-loader-no-such-table");
    let table = DynamoTable::connect(&config).await;
    let err = table.status().await.unwrap_err();

    assert!(matches!(err, Error::TableUnavailable { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_dynamodb_load_records() {
    let Some(config) = get_test_config() else {
        println!("Skipping: DYNAMODB_TEST_ENDPOINT not set");
        return;
    };

    let records: Vec<_> = (0..30)
        .map(|i| {
            json!({"order_id": format!("IT-{i}"), "total": 19.99, "items": [{"qty": i}]})
                .as_object()
                .cloned()
                .unwrap()
        })
        .collect();

    let table = Arc::new(DynamoTable::connect(&config).await);
    let loader = Loader::new(config, table);
    loader.check().await.unwrap();

    let summary = loader.load(&records, |_, _| {}).await.unwrap();
    assert_eq!(summary.records, 30);
    assert!(summary.batches >= 2);
}
