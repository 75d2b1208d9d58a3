//! Load run

use super::batch::{BatchWriter, BatchWriterConfig};
use super::dataset::read_dataset;
use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::normalize::{normalize_record, AttrValue};
use crate::table::TableHandle;
use crate::types::{Dataset, Record, TableStatus};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a completed load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Target table
    pub table: String,
    /// Records submitted
    pub records: usize,
    /// Batch calls made
    pub batches: usize,
    /// Items resent after coming back unprocessed
    pub requeued: usize,
    /// Buffered puts replaced by a later put with the same key
    pub overwritten: usize,
}

/// Loads records into one table
pub struct Loader {
    config: LoaderConfig,
    table: Arc<dyn TableHandle>,
}

impl Loader {
    /// Create a loader for a resolved table handle
    pub fn new(config: LoaderConfig, table: Arc<dyn TableHandle>) -> Self {
        Self { config, table }
    }

    /// The configuration this loader runs with
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read the configured dataset file
    pub fn read_dataset(&self) -> Result<Dataset> {
        read_dataset(&self.config.data_file)
    }

    /// Existence check. Any failure to read the table status is reported as
    /// [`Error::TableUnavailable`].
    pub async fn check(&self) -> Result<TableStatus> {
        match self.table.status().await {
            Ok(status) => {
                info!("Table {} is {}", self.table.name(), status);
                Ok(status)
            }
            Err(e @ Error::TableUnavailable { .. }) => Err(e),
            Err(e) => Err(Error::table_unavailable(self.table.name(), e.to_string())),
        }
    }

    /// Normalize and submit every record, in order.
    ///
    /// `on_record` is called after each submission with the record index
    /// and its key value. A record without the key field fails the run
    /// with [`Error::MissingField`], after the writer has sent every put it
    /// accepted, that record included.
    pub async fn load<F>(&self, records: &[Record], mut on_record: F) -> Result<LoadSummary>
    where
        F: FnMut(usize, &AttrValue),
    {
        let key_field = &self.config.key_field;
        let mut writer = BatchWriter::new(self.table.as_ref(), BatchWriterConfig::from(&self.config));

        for (index, record) in records.iter().enumerate() {
            let item = normalize_record(record);
            let key = item.get(key_field).cloned();

            writer.put(item).await?;

            let Some(key) = key else {
                writer.finish().await?;
                return Err(Error::missing_field(index, key_field.as_str()));
            };
            on_record(index, &key);
        }

        let stats = writer.finish().await?;
        debug!("Load stats: {:?}", stats);

        Ok(LoadSummary {
            table: self.table.name().to_string(),
            records: records.len(),
            batches: stats.batches,
            requeued: stats.requeued,
            overwritten: stats.overwritten,
        })
    }
}
