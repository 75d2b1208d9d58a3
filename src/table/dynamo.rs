//! DynamoDB-backed table handle

use super::types::TableHandle;
use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::normalize::{AttrValue, Item, Number};
use crate::types::TableStatus;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// A DynamoDB table resolved by name within a region
#[derive(Debug, Clone)]
pub struct DynamoTable {
    client: Client,
    name: String,
}

impl DynamoTable {
    /// Build an SDK client for the configured region (and endpoint, if any)
    /// using the default credential chain.
    ///
    /// No network call is made here; reachability is checked by
    /// [`TableHandle::status`].
    pub async fn connect(config: &LoaderConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        Self::from_client(Client::new(&sdk_config), config.table_name.clone())
    }

    /// Wrap an existing client
    pub fn from_client(client: Client, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }
}

#[async_trait]
impl TableHandle for DynamoTable {
    fn name(&self) -> &str {
        &self.name
    }

    async fn status(&self) -> Result<TableStatus> {
        let output = self
            .client
            .describe_table()
            .table_name(&self.name)
            .send()
            .await
            .map_err(|e| Error::table_unavailable(&self.name, sdk_error_message(&e)))?;

        let status = output
            .table()
            .and_then(|table| table.table_status())
            .map_or_else(
                || TableStatus::Unknown("UNKNOWN".to_string()),
                |status| TableStatus::from_wire(status.as_str()),
            );
        debug!("Table {} status: {}", self.name, status);
        Ok(status)
    }

    async fn batch_write(&self, items: Vec<Item>) -> Result<Vec<Item>> {
        let requests = items
            .iter()
            .map(|item| {
                let put = PutRequest::builder()
                    .set_item(Some(to_attribute_map(item)))
                    .build()
                    .map_err(|e| Error::batch_write(format!("Invalid put request: {e}")))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("BatchWriteItem: {} puts to {}", requests.len(), self.name);

        let output = self
            .client
            .batch_write_item()
            .request_items(&self.name, requests)
            .send()
            .await
            .map_err(|e| Error::batch_write(sdk_error_message(&e)))?;

        let unprocessed = output
            .unprocessed_items
            .and_then(|mut by_table| by_table.remove(&self.name))
            .unwrap_or_default();

        unprocessed
            .into_iter()
            .filter_map(|request| request.put_request)
            .map(|put| from_attribute_map(put.item))
            .collect()
    }
}

/// Prefer the service's own message (e.g. "Requested resource not found"),
/// falling back to the full error chain for transport failures.
fn sdk_error_message<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    err.as_service_error()
        .and_then(ProvideErrorMetadata::message)
        .map_or_else(|| DisplayErrorContext(err).to_string(), str::to_string)
}

// ============================================================================
// Attribute Conversion
// ============================================================================

/// Convert a normalized item into a DynamoDB attribute map
pub fn to_attribute_map(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(key, value)| (key.clone(), to_attribute_value(value)))
        .collect()
}

/// Convert a normalized value into a DynamoDB attribute
pub fn to_attribute_value(value: &AttrValue) -> AttributeValue {
    match value {
        AttrValue::Null => AttributeValue::Null(true),
        AttrValue::Bool(b) => AttributeValue::Bool(*b),
        AttrValue::Number(n) => AttributeValue::N(n.to_string()),
        AttrValue::String(s) => AttributeValue::S(s.clone()),
        AttrValue::List(items) => AttributeValue::L(items.iter().map(to_attribute_value).collect()),
        AttrValue::Map(map) => AttributeValue::M(to_attribute_map(map)),
    }
}

fn from_attribute_map(map: HashMap<String, AttributeValue>) -> Result<Item> {
    map.into_iter()
        .map(|(key, value)| Ok((key, from_attribute_value(value)?)))
        .collect()
}

/// Convert a DynamoDB attribute back into a normalized value.
///
/// Used for items returned as unprocessed. Set and binary attributes are
/// never produced by this crate and are rejected.
pub fn from_attribute_value(value: AttributeValue) -> Result<AttrValue> {
    let value = match value {
        AttributeValue::Null(_) => AttrValue::Null,
        AttributeValue::Bool(b) => AttrValue::Bool(b),
        AttributeValue::N(text) => AttrValue::Number(parse_number(text)),
        AttributeValue::S(s) => AttrValue::String(s),
        AttributeValue::L(items) => AttrValue::List(
            items
                .into_iter()
                .map(from_attribute_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        AttributeValue::M(map) => AttrValue::Map(from_attribute_map(map)?),
        other => {
            return Err(Error::batch_write(format!(
                "Unsupported attribute type in unprocessed item: {other:?}"
            )))
        }
    };
    Ok(value)
}

fn parse_number(text: String) -> Number {
    if let Ok(i) = text.parse::<i64>() {
        return Number::Integer(i);
    }
    if let Ok(u) = text.parse::<u64>() {
        return Number::Unsigned(u);
    }
    if !text.contains(['.', 'e', 'E']) {
        return Number::BigInteger(text);
    }
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text)
    } else {
        Decimal::from_str_exact(&text)
    };
    match parsed {
        Ok(decimal) => Number::Decimal(decimal),
        Err(_) => Number::Exponent(text),
    }
}
