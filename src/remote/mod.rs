// Remote table access - every read and write goes through a TableClient
pub mod memory;
pub mod query;
pub mod rest;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryTables;
pub use query::{Direction, Select};
pub use rest::RestClient;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No rows returned from {table}")]
    NoRows { table: String },

    #[error("Invalid service URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Unavailable(String),
}

/// Operations the hosted table service exposes
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Rows matching the selection, in the requested order
    async fn select(&self, table: &str, query: &Select) -> Result<Vec<Value>, RemoteError>;

    /// Insert one row and return it as stored
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError>;

    /// Merge `patch` into the row with this id and return the result
    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<Value, RemoteError>;

    /// Remove the row with this id
    async fn delete(&self, table: &str, id: &str) -> Result<(), RemoteError>;
}

pub async fn fetch<T: DeserializeOwned>(
    client: &dyn TableClient,
    table: &str,
    query: &Select,
) -> Result<Vec<T>, RemoteError> {
    let rows = client.select(table, query).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(RemoteError::from))
        .collect()
}

pub async fn insert_row<T: DeserializeOwned, P: Serialize + Sync>(
    client: &dyn TableClient,
    table: &str,
    payload: &P,
) -> Result<T, RemoteError> {
    let row = client.insert(table, serde_json::to_value(payload)?).await?;
    Ok(serde_json::from_value(row)?)
}

pub async fn update_row<T: DeserializeOwned, P: Serialize + Sync>(
    client: &dyn TableClient,
    table: &str,
    id: &str,
    patch: &P,
) -> Result<T, RemoteError> {
    let row = client
        .update(table, id, serde_json::to_value(patch)?)
        .await?;
    Ok(serde_json::from_value(row)?)
}
