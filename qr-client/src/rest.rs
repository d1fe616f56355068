//! REST client for the hosted backend's table API
//!
//! Rows are addressed as `/rest/v1/{relation}` with filters as query
//! parameters (`col=eq.value`, `order=col.desc`, `limit=n`). Stored procedures
//! live under `/rest/v1/rpc/{name}`.

use crate::{BackendConfig, ClientError, ClientResult};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Error body returned by the backend
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

/// HTTP client bound to one backend project
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    /// Create a new REST client from configuration
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.rest_url(),
            api_key: config.anon_key.clone(),
        })
    }

    /// Start a query against a table
    pub fn from(&self, relation: &str) -> Query<'_> {
        Query {
            client: self,
            relation: relation.to_string(),
            params: Vec::new(),
        }
    }

    /// Call a stored procedure, discarding its result
    pub async fn rpc<B: Serialize + ?Sized>(&self, name: &str, args: &B) -> ClientResult<()> {
        let url = format!("{}/rpc/{}", self.base_url, name);
        let response = self.request(Method::POST, &url).json(args).send().await?;
        Self::check(response).await.map(|_| ())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    /// Map non-success statuses into [`ClientError::Api`]
    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => {
                let message = body
                    .message
                    .or(body.details)
                    .unwrap_or_else(|| status.to_string());
                (body.code, message)
            }
            Err(_) if text.trim().is_empty() => (None, status.to_string()),
            Err(_) => (None, text),
        };

        tracing::debug!(status = %status, ?code, %message, "Backend request rejected");
        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

/// Builder for a single table request
#[derive(Debug)]
pub struct Query<'a> {
    client: &'a RestClient,
    relation: String,
    params: Vec<(String, String)>,
}

impl Query<'_> {
    /// Columns to return (supports embedded relations, e.g. `*,order_items(*)`)
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    /// Equality filter
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    /// Sort order
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params.push(("order".into(), format!("{column}.{dir}")));
        self
    }

    /// Row limit
    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".into(), n.to_string()));
        self
    }

    /// Conflict target for upserts
    pub fn on_conflict(mut self, columns: &str) -> Self {
        self.params.push(("on_conflict".into(), columns.into()));
        self
    }

    fn build(&self, method: Method) -> RequestBuilder {
        let url = format!("{}/{}", self.client.base_url, self.relation);
        self.client.request(method, &url).query(&self.params)
    }

    /// GET matching rows
    pub async fn fetch<T: DeserializeOwned>(self) -> ClientResult<Vec<T>> {
        let response = self.build(Method::GET).send().await?;
        let response = RestClient::check(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// GET at most one row
    pub async fn fetch_optional<T: DeserializeOwned>(self) -> ClientResult<Option<T>> {
        let rows: Vec<T> = self.limit(1).fetch().await?;
        Ok(rows.into_iter().next())
    }

    /// INSERT rows and return the stored representation
    pub async fn insert<B, T>(self, rows: &B) -> ClientResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .build(Method::POST)
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        let response = RestClient::check(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// INSERT rows without reading them back
    pub async fn insert_quiet<B: Serialize + ?Sized>(self, rows: &B) -> ClientResult<()> {
        let response = self
            .build(Method::POST)
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        RestClient::check(response).await.map(|_| ())
    }

    /// INSERT or merge on the `on_conflict` target
    pub async fn upsert<B: Serialize + ?Sized>(self, rows: &B) -> ClientResult<()> {
        let response = self
            .build(Method::POST)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(rows)
            .send()
            .await?;
        RestClient::check(response).await.map(|_| ())
    }

    /// PATCH matching rows
    pub async fn update<B: Serialize + ?Sized>(self, patch: &B) -> ClientResult<()> {
        let response = self
            .build(Method::PATCH)
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await?;
        RestClient::check(response).await.map(|_| ())
    }

    /// DELETE matching rows
    pub async fn delete(self) -> ClientResult<()> {
        let response = self.build(Method::DELETE).send().await?;
        RestClient::check(response).await.map(|_| ())
    }
}
