//! In-memory table handle
//!
//! Accepts writes without any network access. Backs `--dry-run` and is the
//! test double for the loader. It can be told to report a missing table,
//! bounce items as unprocessed, or fail writes outright.

use super::types::TableHandle;
use crate::error::{Error, Result};
use crate::normalize::{AttrValue, Item};
use crate::types::TableStatus;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    items: Vec<Item>,
    batch_sizes: Vec<usize>,
    status_checks: usize,
    /// Number of items to hand back as unprocessed, one entry per call
    unprocessed_plan: VecDeque<usize>,
}

/// A table that lives in process memory
#[derive(Debug)]
pub struct MemoryTable {
    name: String,
    /// `None` means the table does not exist
    status: Option<TableStatus>,
    key_attributes: Vec<String>,
    fail_writes: Option<String>,
    state: Mutex<State>,
}

impl MemoryTable {
    /// An `ACTIVE` table that accepts every write
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Some(TableStatus::Active),
            key_attributes: Vec::new(),
            fail_writes: None,
            state: Mutex::new(State::default()),
        }
    }

    /// A table whose status lookup fails as if it did not exist
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            status: None,
            ..Self::new(name)
        }
    }

    /// Report a different status
    #[must_use]
    pub fn with_status(mut self, status: TableStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Reject batches that contain two puts with the same key, as
    /// DynamoDB does
    #[must_use]
    pub fn with_key_attributes(mut self, keys: Vec<String>) -> Self {
        self.key_attributes = keys;
        self
    }

    /// Hand back the last `counts[n]` items of the n-th call as unprocessed
    #[must_use]
    pub fn with_unprocessed(self, counts: impl IntoIterator<Item = usize>) -> Self {
        self.lock().unprocessed_plan = counts.into_iter().collect();
        self
    }

    /// Fail every batch write with this message
    #[must_use]
    pub fn with_write_failure(mut self, message: impl Into<String>) -> Self {
        self.fail_writes = Some(message.into());
        self
    }

    /// All items accepted so far, in acceptance order
    pub fn items(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    /// Size of each batch call received
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.lock().batch_sizes.clone()
    }

    /// Number of accepted items
    pub fn write_count(&self) -> usize {
        self.lock().items.len()
    }

    /// Number of status queries received
    pub fn status_checks(&self) -> usize {
        self.lock().status_checks
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key_of<'a>(&self, item: &'a Item) -> Vec<Option<&'a AttrValue>> {
        self.key_attributes.iter().map(|k| item.get(k)).collect()
    }
}

#[async_trait]
impl TableHandle for MemoryTable {
    fn name(&self) -> &str {
        &self.name
    }

    async fn status(&self) -> Result<TableStatus> {
        self.lock().status_checks += 1;
        self.status.clone().ok_or_else(|| {
            Error::table_unavailable(&self.name, "Requested resource not found")
        })
    }

    async fn batch_write(&self, mut items: Vec<Item>) -> Result<Vec<Item>> {
        if self.status.is_none() {
            return Err(Error::batch_write(format!(
                "Requested resource not found: {}",
                self.name
            )));
        }
        if let Some(message) = &self.fail_writes {
            return Err(Error::batch_write(message.clone()));
        }

        if !self.key_attributes.is_empty() {
            let mut seen = HashSet::new();
            for item in &items {
                if !seen.insert(format!("{:?}", self.key_of(item))) {
                    return Err(Error::batch_write(
                        "Provided list of item keys contains duplicates",
                    ));
                }
            }
        }

        let mut state = self.lock();
        state.batch_sizes.push(items.len());

        let bounce = state.unprocessed_plan.pop_front().unwrap_or(0).min(items.len());
        let unprocessed = items.split_off(items.len() - bounce);
        state.items.extend(items);

        Ok(unprocessed)
    }
}
