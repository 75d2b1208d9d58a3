//! Loader configuration
//!
//! A single immutable value built once at startup and passed into the
//! loader. Defaults match the sample deployment: the `orders-table` table in
//! `us-east-1`, fed from `data/sample_dataset.json`.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default target table name
pub const DEFAULT_TABLE_NAME: &str = "orders-table";

/// Default AWS region
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default dataset path, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/sample_dataset.json";

/// Maximum number of put requests in one `BatchWriteItem` call
pub const MAX_BATCH_SIZE: usize = 25;

/// Field printed in per-record progress lines
pub const DEFAULT_KEY_FIELD: &str = "order_id";

/// Complete configuration for one load run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Target table name
    pub table_name: String,

    /// AWS region the table lives in
    pub region: String,

    /// Path of the JSON dataset
    pub data_file: PathBuf,

    /// Custom endpoint (e.g. DynamoDB Local)
    pub endpoint_url: Option<String>,

    /// Put requests per batch call (1..=25)
    pub batch_size: usize,

    /// Key attributes used to collapse duplicate puts within a batch
    pub overwrite_by_keys: Vec<String>,

    /// Pause before resending items the service left unprocessed
    #[serde(deserialize_with = "duration_from_millis")]
    pub unprocessed_delay: Duration,

    /// Field reported in progress lines
    pub key_field: String,
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_unprocessed_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_key_field() -> String {
    DEFAULT_KEY_FIELD.to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            endpoint_url: None,
            batch_size: default_batch_size(),
            overwrite_by_keys: Vec::new(),
            unprocessed_delay: default_unprocessed_delay(),
            key_field: default_key_field(),
        }
    }
}

impl LoaderConfig {
    /// Create a config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table name
    #[must_use]
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Set the region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the dataset path
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Set a custom endpoint
    #[must_use]
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Set the batch size
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Collapse duplicate puts on these key attributes
    #[must_use]
    pub fn with_overwrite_by_keys(mut self, keys: Vec<String>) -> Self {
        self.overwrite_by_keys = keys;
        self
    }

    /// Set the unprocessed-item delay
    #[must_use]
    pub fn with_unprocessed_delay(mut self, delay: Duration) -> Self {
        self.unprocessed_delay = delay;
        self
    }

    /// Set the field reported in progress lines
    #[must_use]
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }

    /// Check the values before a run starts
    pub fn validate(&self) -> Result<()> {
        if self.table_name.trim().is_empty() {
            return Err(Error::invalid_config("table_name", "must not be empty"));
        }
        if self.region.trim().is_empty() {
            return Err(Error::invalid_config("region", "must not be empty"));
        }
        if self.key_field.is_empty() {
            return Err(Error::invalid_config("key_field", "must not be empty"));
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(Error::invalid_config(
                "batch_size",
                format!("must be between 1 and {MAX_BATCH_SIZE}, got {}", self.batch_size),
            ));
        }
        if self.overwrite_by_keys.len() > 2 {
            return Err(Error::invalid_config(
                "overwrite_by_keys",
                "a table key has at most a partition and a sort attribute",
            ));
        }
        Ok(())
    }
}

fn duration_from_millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Duration::from_millis(u64::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.table_name, "orders-table");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.data_file, PathBuf::from("data/sample_dataset.json"));
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.key_field, "order_id");
        assert!(config.endpoint_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = LoaderConfig::new()
            .with_table_name("staging-orders")
            .with_region("eu-west-1")
            .with_endpoint_url("http://localhost:8000")
            .with_batch_size(10);

        assert_eq!(config.table_name, "staging-orders");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.batch_size, 10);
    }

    #[test]
    fn test_validate_batch_size() {
        assert!(LoaderConfig::new().with_batch_size(0).validate().is_err());
        assert!(LoaderConfig::new().with_batch_size(26).validate().is_err());
        assert!(LoaderConfig::new().with_batch_size(1).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_table() {
        let err = LoaderConfig::new().with_table_name(" ").validate().unwrap_err();
        assert!(err.to_string().contains("table_name"));
    }

    #[test]
    fn test_validate_too_many_keys() {
        let config = LoaderConfig::new().with_overwrite_by_keys(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: LoaderConfig = serde_json::from_str(
            r#"{"table_name": "t", "data_file": "orders.json"}"#,
        )
        .unwrap();
        assert_eq!(config.table_name, "t");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.unprocessed_delay, Duration::from_millis(500));
        assert_eq!(config.key_field, "order_id");
    }

    #[test]
    fn test_deserialize_delay_millis() {
        let config: LoaderConfig =
            serde_json::from_str(r#"{"unprocessed_delay": 1500}"#).unwrap();
        assert_eq!(config.unprocessed_delay, Duration::from_millis(1500));

        let err = serde_json::from_str::<LoaderConfig>(r#"{"unprocessed_delay": -1}"#);
        assert!(err.is_err());
    }
}
