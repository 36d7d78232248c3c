//! Order endpoints.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::instrument;

use agrocart_core::{NewOrder, Order, OrderId, OrderStatus, StatusUpdate};

use super::{ApiClient, ApiError};
use crate::models::AdminSession;

impl ApiClient {
    /// Fetch every order (`GET /api/orders`). Admin-only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or decoding fails.
    #[instrument(skip(self, session))]
    pub async fn list_orders(&self, session: &AdminSession) -> Result<Vec<Order>, ApiError> {
        let response = self
            .http()
            .get(self.endpoint("/api/orders"))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Look up a single order (`GET /api/orders/{id}`).
    ///
    /// The identifier is taken as an opaque string: the tracking view does
    /// not validate its format beyond non-emptiness. It travels as a single
    /// percent-encoded path segment, so input containing `/`, `?`, or `#`
    /// cannot rewrite the request target.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the order does not exist or the request fails.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> Result<Order, ApiError> {
        let id = utf8_percent_encode(id.trim(), NON_ALPHANUMERIC);
        let response = self
            .http()
            .get(self.endpoint(&format!("/api/orders/{id}")))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Submit a new order (`POST /api/orders`), returning the created order
    /// with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let response = self
            .http()
            .post(self.endpoint("/api/orders"))
            .json(order)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Update an order's status (`PUT /api/orders/{id}`). Admin-only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    #[instrument(skip(self, session))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        session: &AdminSession,
    ) -> Result<Order, ApiError> {
        let response = self
            .http()
            .put(self.endpoint(&format!("/api/orders/{id}")))
            .bearer_auth(&session.token)
            .json(&StatusUpdate { status })
            .send()
            .await?;
        Self::read_json(response).await
    }
}
