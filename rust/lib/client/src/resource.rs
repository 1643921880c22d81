use std::marker::PhantomData;
use std::time::Duration;

use palet_core::Resource;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::ApiError;

// ── Options ─────────────────────────────────────────────────────────

/// Connection settings shared by every resource client of one backend.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn build_http(&self) -> Result<reqwest::Client, ApiError> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }
}

// ── Responses ───────────────────────────────────────────────────────

/// Mutation acknowledgement: `{"message": "..."}`, or an empty body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

/// The list endpoint may answer with a bare array or an `items` wrapper.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { items: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Wrapped { items } => items,
        }
    }
}

/// Pull `message` (or `error`) out of a JSON body, if it has one.
fn body_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|k| value.get(*k).and_then(|m| m.as_str()))
        .map(str::to_string)
}

// ── ResourceClient ──────────────────────────────────────────────────

/// Type-safe CRUD client for a single resource:
/// `{base_url}/api/{collection}[/{id}]`.
pub struct ResourceClient<T: Resource> {
    http: reqwest::Client,
    base_url: String,
    _phantom: PhantomData<T>,
}

impl<T: Resource> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Share one connection pool across resource types.
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            _phantom: PhantomData,
        }
    }

    pub fn from_options(options: &ClientOptions) -> Result<Self, ApiError> {
        Ok(Self::with_http(options.build_http()?, options.base_url.as_str()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/{}", self.base_url, T::collection())
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    /// Map a non-2xx response to [`ApiError::Server`].
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = body_message(&body).unwrap_or_default();
        warn!(status = status.as_u16(), %message, "{} request failed", T::singular());
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let resp = Self::check(resp).await?;
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    async fn ack(resp: reqwest::Response) -> Result<Ack, ApiError> {
        let resp = Self::check(resp).await?;
        let body = resp.text().await?;
        Ok(Ack {
            message: body_message(&body),
        })
    }

    /// List all records.
    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        let url = self.collection_url();
        debug!(%url, "GET");
        let resp = self.http.get(&url).send().await?;
        let body: ListBody<T> = Self::parse(resp).await?;
        Ok(body.into_items())
    }

    /// Get a record by ID.
    pub async fn get(&self, id: i64) -> Result<T, ApiError> {
        let url = self.item_url(id);
        debug!(%url, "GET");
        let resp = self.http.get(&url).send().await?;
        Self::parse(resp).await
    }

    /// Create a new record.
    pub async fn create(&self, item: &T) -> Result<Ack, ApiError> {
        let url = self.collection_url();
        debug!(%url, "POST");
        let resp = self.http.post(&url).json(item).send().await?;
        Self::ack(resp).await
    }

    /// Replace an existing record by ID.
    pub async fn update(&self, id: i64, item: &T) -> Result<Ack, ApiError> {
        let url = self.item_url(id);
        debug!(%url, "PUT");
        let resp = self.http.put(&url).json(item).send().await?;
        Self::ack(resp).await
    }

    /// Delete a record by ID.
    pub async fn delete(&self, id: i64) -> Result<Ack, ApiError> {
        let url = self.item_url(id);
        debug!(%url, "DELETE");
        let resp = self.http.delete(&url).send().await?;
        Self::ack(resp).await
    }
}
