//! Inventory REST API Client
//!
//! HTTP client for the inventory server's JSON endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::error::{ApiError, ApiResult};
use super::types::*;

/// The endpoints the dashboard consumes.
///
/// The orchestrator only talks to this trait, so tests can swap in an
/// in-memory implementation.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `GET /api/dashboard`
    async fn dashboard(&self) -> ApiResult<DashboardResponse>;

    /// `GET /api/shopping-list`
    async fn shopping_list(&self) -> ApiResult<ShoppingListResponse>;

    /// `POST /api/items`
    async fn create_item(&self, request: &NewItemRequest) -> ApiResult<Ack>;

    /// `POST /api/items/adjust`
    async fn adjust_stock(&self, request: &AdjustRequest) -> ApiResult<Ack>;

    /// `POST /api/usage`
    async fn record_usage(&self, request: &UsageRequest) -> ApiResult<UsageReceipt>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, e.g. "http://localhost:8000"
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// `reqwest`-backed [`InventoryApi`]
#[derive(Clone)]
pub struct HttpInventoryApi {
    client: Client,
    base_url: String,
}

impl HttpInventoryApi {
    /// Create a client for the given configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => body
                    .into_message()
                    .unwrap_or_else(|| "Request failed".to_string()),
                Err(_) => "Unknown error".to_string(),
            };
            tracing::debug!(status = status.as_u16(), %message, "API request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn dashboard(&self) -> ApiResult<DashboardResponse> {
        self.get("/api/dashboard").await
    }

    async fn shopping_list(&self) -> ApiResult<ShoppingListResponse> {
        self.get("/api/shopping-list").await
    }

    async fn create_item(&self, request: &NewItemRequest) -> ApiResult<Ack> {
        self.post("/api/items", request).await
    }

    async fn adjust_stock(&self, request: &AdjustRequest) -> ApiResult<Ack> {
        self.post("/api/items/adjust", request).await
    }

    async fn record_usage(&self, request: &UsageRequest) -> ApiResult<UsageReceipt> {
        self.post("/api/usage", request).await
    }
}
