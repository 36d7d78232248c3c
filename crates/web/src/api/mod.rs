//! Remote AgroCart REST API client.
//!
//! # Architecture
//!
//! - The remote API is the source of truth for products, orders, and admin
//!   accounts - the client performs no persistence of its own
//! - JSON over HTTP via `reqwest`; in-memory caching of the product catalog
//!   via `moka` (short TTL, invalidated by admin mutations)
//! - Every call resolves to the closed [`ApiError`] set so callers branch on
//!   tagged outcomes rather than probing optional fields
//! - No automatic retries: every failure is terminal for that attempt and
//!   must be retried by explicit user action
//!
//! # Example
//!
//! ```rust,ignore
//! use agrocart_web::api::ApiClient;
//!
//! let api = ApiClient::new("https://agrocartbackend.onrender.com");
//! let products = api.list_products().await?;
//! let order = api.get_order("12").await?;
//! ```

mod auth;
mod orders;
mod products;

pub use auth::AdminToken;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use agrocart_core::Product;

/// How long a fetched product catalog stays fresh.
const CATALOG_TTL: Duration = Duration::from_secs(60);

/// Errors that can occur when calling the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    ///
    /// `message` is the `error` field of the JSON body when the API provided
    /// one, or a generic fallback otherwise.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the API rejected the call for lack of authorization.
    ///
    /// The admin session is invalidated when this shows up - token staleness
    /// is only ever discovered on a failed request.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Api {
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        )
    }
}

/// Structured error body the API sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the remote AgroCart REST API.
///
/// Cheaply cloneable; holds a connection pool and the catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    catalog: Cache<(), Vec<Product>>,
}

impl ApiClient {
    /// Create a new API client for the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let catalog = Cache::builder()
            .max_capacity(1)
            .time_to_live(CATALOG_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                catalog,
            }),
        }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    pub(crate) fn catalog_cache(&self) -> &Cache<(), Vec<Product>> {
        &self.inner.catalog
    }

    /// Build a full endpoint URL from a path starting with `/`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Decode a checked response body.
    pub(crate) async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Turn a non-success response into an [`ApiError::Api`].
    ///
    /// The API is expected to ship `{"error": "..."}` bodies; absent a
    /// structured body, a generic message carrying the status is substituted.
    pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("request failed with status {status}"));

        Err(ApiError::Api { status, message })
    }
}
