//! Batch writer
//!
//! Groups puts into `BatchWriteItem` calls of at most 25 items. Items the
//! service hands back as unprocessed go back into the buffer and are sent
//! with a later call. [`BatchWriter::finish`] drains the buffer completely.

use crate::config::{LoaderConfig, MAX_BATCH_SIZE};
use crate::error::Result;
use crate::normalize::{AttrValue, Item};
use crate::table::TableHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for a batch writer
#[derive(Debug, Clone)]
pub struct BatchWriterConfig {
    batch_size: usize,
    overwrite_by_keys: Vec<String>,
    unprocessed_delay: Duration,
}

impl Default for BatchWriterConfig {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            overwrite_by_keys: Vec::new(),
            unprocessed_delay: Duration::from_millis(500),
        }
    }
}

impl BatchWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flush threshold, capped at the service maximum
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.clamp(1, MAX_BATCH_SIZE);
        self
    }

    /// Replace an earlier buffered put when a later put has the same values
    /// for these attributes
    #[must_use]
    pub fn with_overwrite_by_keys(mut self, keys: Vec<String>) -> Self {
        self.overwrite_by_keys = keys;
        self
    }

    /// Set the pause after a call that left items unprocessed
    #[must_use]
    pub fn with_unprocessed_delay(mut self, delay: Duration) -> Self {
        self.unprocessed_delay = delay;
        self
    }

    /// Flush threshold
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl From<&LoaderConfig> for BatchWriterConfig {
    fn from(config: &LoaderConfig) -> Self {
        Self::new()
            .with_batch_size(config.batch_size)
            .with_overwrite_by_keys(config.overwrite_by_keys.clone())
            .with_unprocessed_delay(config.unprocessed_delay)
    }
}

/// Counters reported when a writer finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Puts accepted by [`BatchWriter::put`]
    pub submitted: usize,
    /// Buffered puts replaced by a later put with the same key
    pub overwritten: usize,
    /// Batch calls made
    pub batches: usize,
    /// Items resent after coming back unprocessed
    pub requeued: usize,
}

/// Buffers puts and flushes them in batches.
///
/// Call [`finish`](Self::finish) to send whatever is still buffered; a
/// writer dropped with buffered items logs a warning and sends nothing.
pub struct BatchWriter<'a> {
    table: &'a dyn TableHandle,
    config: BatchWriterConfig,
    buffer: Vec<Item>,
    stats: BatchStats,
}

impl<'a> BatchWriter<'a> {
    /// Start a batch against a table
    pub fn new(table: &'a dyn TableHandle, config: BatchWriterConfig) -> Self {
        Self {
            table,
            config,
            buffer: Vec::new(),
            stats: BatchStats::default(),
        }
    }

    /// Number of buffered puts
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Queue a put, flushing when the buffer is full
    pub async fn put(&mut self, item: Item) -> Result<()> {
        if !self.config.overwrite_by_keys.is_empty() {
            self.remove_duplicate(&item);
        }
        self.buffer.push(item);
        self.stats.submitted += 1;

        if self.buffer.len() >= self.config.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Send everything still buffered and return the counters
    pub async fn finish(mut self) -> Result<BatchStats> {
        while !self.buffer.is_empty() {
            let bounced = self.flush().await?;
            if bounced > 0 && !self.config.unprocessed_delay.is_zero() {
                tokio::time::sleep(self.config.unprocessed_delay).await;
            }
        }
        debug!(
            "Batch writer finished: {} puts in {} calls",
            self.stats.submitted, self.stats.batches
        );
        Ok(self.stats)
    }

    /// Send one batch from the front of the buffer; returns how many items
    /// came back unprocessed
    async fn flush(&mut self) -> Result<usize> {
        let take = self.buffer.len().min(self.config.batch_size);
        let batch: Vec<Item> = self.buffer.drain(..take).collect();

        let unprocessed = self.table.batch_write(batch).await?;
        self.stats.batches += 1;

        let bounced = unprocessed.len();
        if bounced > 0 {
            warn!(
                "{} of {} items unprocessed by {}, requeueing",
                bounced,
                take,
                self.table.name()
            );
            self.stats.requeued += bounced;
            self.buffer.extend(unprocessed);
        } else {
            debug!("Flushed {} items to {}", take, self.table.name());
        }
        Ok(bounced)
    }

    fn remove_duplicate(&mut self, item: &Item) {
        let key = key_values(&self.config.overwrite_by_keys, item);
        if let Some(pos) = self
            .buffer
            .iter()
            .position(|buffered| key_values(&self.config.overwrite_by_keys, buffered) == key)
        {
            self.buffer.remove(pos);
            self.stats.overwritten += 1;
            debug!("Replaced buffered put with duplicate key {:?}", key);
        }
    }
}

impl Drop for BatchWriter<'_> {
    fn drop(&mut self) {
        if !self.buffer.is_empty() {
            warn!(
                "Batch writer for {} dropped with {} unsent items",
                self.table.name(),
                self.buffer.len()
            );
        }
    }
}

fn key_values<'i>(keys: &[String], item: &'i Item) -> Vec<Option<&'i AttrValue>> {
    keys.iter().map(|key| item.get(key)).collect()
}
