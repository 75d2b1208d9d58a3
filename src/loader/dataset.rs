//! Dataset reading

use crate::error::{Error, Result, ResultExt};
use crate::types::{Dataset, JsonValue};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a dataset file: a JSON array of record objects.
///
/// The whole file is read and parsed up front; there is no streaming.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let records = parse_dataset(&content)?;

    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse dataset text. Every array element must be a JSON object.
pub fn parse_dataset(content: &str) -> Result<Dataset> {
    let values: Vec<JsonValue> = serde_json::from_str(content)?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            JsonValue::Object(record) => Ok(record),
            _ => Err(Error::InvalidRecord { index }),
        })
        .collect()
}
