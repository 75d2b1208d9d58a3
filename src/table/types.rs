//! Table handle trait

use crate::error::Result;
use crate::normalize::Item;
use crate::types::TableStatus;
use async_trait::async_trait;

/// A client-side reference to a remote keyed table
#[async_trait]
pub trait TableHandle: Send + Sync {
    /// Table name
    fn name(&self) -> &str;

    /// Query the table status.
    ///
    /// Fails with [`crate::Error::TableUnavailable`] when the table does not
    /// exist or cannot be reached.
    async fn status(&self) -> Result<TableStatus>;

    /// Submit one batch of puts (at most 25 items).
    ///
    /// Returns the items the service did not process; the caller is
    /// expected to send them again.
    async fn batch_write(&self, items: Vec<Item>) -> Result<Vec<Item>>;
}
