use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{RemoteError, Select, TableClient};

/// Error body returned by the REST layer on non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    #[allow(dead_code)]
    code: Option<String>,
}

/// HTTP client for the hosted table service (PostgREST conventions)
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base: Url,
}

impl RestClient {
    pub fn new(url: &str, anon_key: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let mut base = Url::parse(url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(anon_key)
            .map_err(|_| RemoteError::Unavailable("Anonymous key is not a valid header".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", anon_key))
            .map_err(|_| RemoteError::Unavailable("Anonymous key is not a valid header".into()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base })
    }

    fn table_url(&self, table: &str) -> Result<Url, RemoteError> {
        Ok(self.base.join(&format!("rest/v1/{}", table))?)
    }

    fn returning(request: RequestBuilder) -> RequestBuilder {
        request.header("Prefer", "return=representation")
    }

    async fn send(request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.is_empty())
            .or_else(|| (!text.is_empty()).then(|| text.clone()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        tracing::debug!("Remote call failed with {}: {}", status, message);
        Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn single_row(response: Response, table: &str) -> Result<Value, RemoteError> {
        let rows: Vec<Value> = response.json().await?;
        rows.into_iter().next().ok_or_else(|| RemoteError::NoRows {
            table: table.to_string(),
        })
    }
}

fn id_filter(id: &str) -> [(&'static str, String); 1] {
    [("id", format!("eq.{}", id))]
}

#[async_trait]
impl TableClient for RestClient {
    async fn select(&self, table: &str, query: &Select) -> Result<Vec<Value>, RemoteError> {
        let url = self.table_url(table)?;
        let request = self.client.get(url).query(&query.query_pairs());
        let response = Self::send(request).await?;
        Ok(response.json().await?)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError> {
        let url = self.table_url(table)?;
        let request = Self::returning(self.client.post(url).json(&[row]));
        let response = Self::send(request).await?;
        Self::single_row(response, table).await
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<Value, RemoteError> {
        let url = self.table_url(table)?;
        let request = Self::returning(self.client.patch(url).query(&id_filter(id)).json(&patch));
        let response = Self::send(request).await?;
        Self::single_row(response, table).await
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), RemoteError> {
        let url = self.table_url(table)?;
        let request = self.client.delete(url).query(&id_filter(id));
        Self::send(request).await?;
        Ok(())
    }
}
