//! Integration tests using the in-memory table
//!
//! Tests the full end-to-end flow: CLI args → dataset file → normalization →
//! batched writes → summary

use clap::Parser;
use orders_loader::cli::{Cli, Commands, Runner};
use orders_loader::table::{MemoryTable, TableHandle};
use orders_loader::{Error, LoaderConfig, Number};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

fn dataset(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn runner(args: &[&str]) -> Runner {
    let mut argv = vec!["orders-loader", "--table", "orders-table", "--region", "us-east-1"];
    argv.extend_from_slice(args);
    Runner::new(Cli::parse_from(argv))
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn sample_dataset() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_dataset.json")
}

// ============================================================================
// Load Tests
// ============================================================================

#[tokio::test]
async fn test_load_single_record() {
    let file = dataset(r#"[{"order_id": "O1", "total": 42.5}]"#);
    let runner = runner(&["--data-file", path_arg(file.path()), "load"]);
    let config = runner.build_config().unwrap();

    let table = Arc::new(MemoryTable::new("orders-table"));
    let summary = runner
        .run_with_table(config, table.clone())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.records, 1);
    assert_eq!(table.write_count(), 1);

    let items = table.items();
    let total = items[0]["total"].as_number().unwrap();
    assert_eq!(total, &Number::Decimal("42.5".parse().unwrap()));
    assert_eq!(total.to_string(), "42.5");
}

#[tokio::test]
async fn test_load_is_default_command() {
    let file = dataset(r#"[{"order_id": "O1"}, {"order_id": "O2"}]"#);
    let runner = runner(&["--data-file", path_arg(file.path())]);
    assert!(matches!(runner.command(), Commands::Load { dry_run: false, .. }));

    let config = runner.build_config().unwrap();
    let table = Arc::new(MemoryTable::new("orders-table"));
    let summary = runner.run_with_table(config, table.clone()).await.unwrap();

    assert_eq!(summary.map(|s| s.records), Some(2));
    assert_eq!(table.write_count(), 2);
}

#[tokio::test]
async fn test_load_sample_dataset() {
    let path = sample_dataset();
    let runner = runner(&["--data-file", path_arg(&path), "load"]);
    let config = runner.build_config().unwrap();

    let table = Arc::new(MemoryTable::new("orders-table"));
    let summary = runner
        .run_with_table(config, table.clone())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.records, 5);
    assert_eq!(summary.batches, 1);

    let first = &table.items()[0];
    let line = first["items"].as_list().unwrap()[0].as_map().unwrap();
    assert_eq!(line["unit_price"].to_string(), "19.99");
    assert_eq!(line["quantity"].as_number(), Some(&Number::Integer(2)));
    assert_eq!(first["total_amount"].to_string(), "53.47");
}

#[tokio::test]
async fn test_load_batch_size_flag() {
    let records: Vec<String> = (0..30)
        .map(|i| format!(r#"{{"order_id": "O{i}", "total": {i}.25}}"#))
        .collect();
    let file = dataset(&format!("[{}]", records.join(",")));

    let runner = runner(&["--data-file", path_arg(file.path()), "load", "--batch-size", "10"]);
    let config = runner.build_config().unwrap();
    assert_eq!(config.batch_size, 10);

    let table = Arc::new(MemoryTable::new("orders-table"));
    runner.run_with_table(config, table.clone()).await.unwrap();

    assert_eq!(table.batch_sizes(), vec![10, 10, 10]);
    assert_eq!(table.write_count(), 30);
}

#[tokio::test]
async fn test_dry_run_end_to_end() {
    let file = dataset(r#"[{"order_id": "O1", "total": 1.5}]"#);
    let runner = runner(&["--data-file", path_arg(file.path()), "load", "--dry-run"]);

    assert!(runner.is_dry_run());
    runner.run().await.unwrap();
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test]
async fn test_missing_table_exits_with_one() {
    let file = dataset(r#"[{"order_id": "O1", "total": 42.5}]"#);
    let runner = runner(&["--data-file", path_arg(file.path()), "load"]);
    let config = runner.build_config().unwrap();

    let table = Arc::new(MemoryTable::missing("orders-table"));
    let err = runner.run_with_table(config, table.clone()).await.unwrap_err();

    assert!(matches!(err, Error::TableUnavailable { .. }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(table.write_count(), 0);
    assert!(table.batch_sizes().is_empty());
}

#[tokio::test]
async fn test_malformed_dataset_fails_before_table_check() {
    let file = dataset(r#"[{"order_id": "O1", "#);
    let runner = runner(&["--data-file", path_arg(file.path())]);
    let config = runner.build_config().unwrap();

    let table = Arc::new(MemoryTable::new("orders-table"));
    let err = runner.run_with_table(config, table.clone()).await.unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
    assert_eq!(table.status_checks(), 0);
    assert_eq!(table.write_count(), 0);
}

#[tokio::test]
async fn test_write_failure_stops_run() {
    let file = dataset(r#"[{"order_id": "O1"}]"#);
    let runner = runner(&["--data-file", path_arg(file.path())]);
    let config = runner.build_config().unwrap();

    let table = Arc::new(MemoryTable::new("orders-table").with_write_failure("ThrottlingException"));
    let err = runner.run_with_table(config, table).await.unwrap_err();

    assert!(matches!(err, Error::BatchWrite { .. }));
    assert_ne!(err.exit_code(), 0);
}

#[tokio::test]
async fn test_missing_order_id_sends_submitted_records() {
    let file = dataset(r#"[{"order_id": "O1"}, {"order_id": "O2"}, {"total": 1.5}]"#);
    let runner = runner(&["--data-file", path_arg(file.path())]);
    let config = runner.build_config().unwrap();

    let table = Arc::new(MemoryTable::new("orders-table"));
    let err = runner.run_with_table(config, table.clone()).await.unwrap_err();

    assert!(matches!(err, Error::MissingField { index: 2, .. }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(table.write_count(), 3);
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[tokio::test]
async fn test_check_command() {
    let runner = runner(&["--data-file", "/does/not/matter.json", "check"]);
    let config = runner.build_config().unwrap();

    let table = Arc::new(MemoryTable::new("orders-table"));
    let result = runner.run_with_table(config, table.clone()).await.unwrap();

    assert!(result.is_none());
    assert_eq!(table.status_checks(), 1);
    assert_eq!(table.write_count(), 0);
}

#[tokio::test]
async fn test_check_command_missing_table() {
    let runner = runner(&["check"]);
    let config = runner.build_config().unwrap();

    let table: Arc<dyn TableHandle> = Arc::new(MemoryTable::missing("orders-table"));
    let err = runner.run_with_table(config, table).await.unwrap_err();
    assert!(matches!(err, Error::TableUnavailable { .. }));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_config_file_then_flags() {
    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"{{"table_name": "from-file", "batch_size": 5, "key_field": "id"}}"#
    )
    .unwrap();

    let cli = Cli::parse_from([
        "orders-loader",
        "--config",
        path_arg(config_file.path()),
        "--region",
        "eu-central-1",
        "--table",
        "from-flag",
    ]);
    let config = Runner::new(cli).build_config().unwrap();

    assert_eq!(config.table_name, "from-flag");
    assert_eq!(config.region, "eu-central-1");
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.key_field, "id");
}

#[test]
fn test_overwrite_by_keys_flag() {
    let runner = runner(&["load", "--overwrite-by-keys", "order_id,sku"]);
    let config = runner.build_config().unwrap();
    assert_eq!(config.overwrite_by_keys, vec!["order_id", "sku"]);
}

#[test]
fn test_invalid_batch_size_rejected() {
    let runner = runner(&["load", "--batch-size", "26"]);
    let err = runner.build_config().unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_endpoint_flag() {
    let runner = runner(&["--endpoint-url", "http://localhost:8000"]);
    let config = runner.build_config().unwrap();
    assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
    assert_eq!(config.data_file, LoaderConfig::default().data_file);
}
