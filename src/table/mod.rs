//! Table handles
//!
//! The loader only needs two things from the remote table: its status, and
//! a way to submit a batch of puts. [`TableHandle`] captures exactly that.
//!
//! - [`DynamoTable`] talks to DynamoDB through the AWS SDK
//! - [`MemoryTable`] keeps writes in memory, for dry runs and tests

mod dynamo;
mod memory;
mod types;

pub use dynamo::{from_attribute_value, to_attribute_map, to_attribute_value, DynamoTable};
pub use memory::MemoryTable;
pub use types::TableHandle;
