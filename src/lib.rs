//! # Orders Loader
//!
//! Loads sample e-commerce order records from a JSON file into a DynamoDB
//! table with batched puts.
//!
//! DynamoDB only accepts exact decimals for numbers, so every float in a
//! record is normalized first: the float is rendered to its shortest
//! round-trip text and that text is parsed as a decimal. `19.99` is stored
//! as `19.99`, never as `19.990000000000002`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orders_loader::loader::{read_dataset, Loader};
//! use orders_loader::table::DynamoTable;
//! use orders_loader::{LoaderConfig, Result};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = LoaderConfig::default();
//!     let records = read_dataset(&config.data_file)?;
//!
//!     let table = Arc::new(DynamoTable::connect(&config).await);
//!     let loader = Loader::new(config, table);
//!     loader.check().await?;
//!
//!     let summary = loader.load(&records, |_, key| println!("Inserted {key}")).await?;
//!     println!("{} records", summary.records);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! dataset.json ─► read_dataset ─► normalize_record ─► BatchWriter ─► TableHandle
//!                                  (float → Decimal)   (≤ 25 / call)   (DynamoDB | memory)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Loader configuration
pub mod config;

/// Float-to-decimal normalization
pub mod normalize;

/// Table handles (DynamoDB and in-memory)
pub mod table;

/// Dataset reading, batching and the load run
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::LoaderConfig;
pub use error::{Error, Result};
pub use normalize::{normalize, normalize_record, AttrValue, Item, Number};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
