//! Loader
//!
//! Reads the dataset, checks the target table, and pushes every normalized
//! record through a [`BatchWriter`].
//!
//! # Example
//!
//! ```rust,ignore
//! use orders_loader::loader::{read_dataset, Loader};
//! use orders_loader::table::DynamoTable;
//! use orders_loader::LoaderConfig;
//! use std::sync::Arc;
//!
//! let config = LoaderConfig::default();
//! let records = read_dataset(&config.data_file)?;
//! let table = Arc::new(DynamoTable::connect(&config).await);
//! let loader = Loader::new(config, table);
//!
//! loader.check().await?;
//! let summary = loader.load(&records, |_, key| println!("Inserted {key}")).await?;
//! ```

mod batch;
mod dataset;
mod load;

pub use batch::{BatchStats, BatchWriter, BatchWriterConfig};
pub use dataset::{parse_dataset, read_dataset};
pub use load::{LoadSummary, Loader};
