//! Product endpoints.
//!
//! `list_products` serves the cached catalog when fresh; admin mutations
//! invalidate the cache so the dashboard and storefront see their effects on
//! the next fetch.

use tracing::{debug, instrument};

use agrocart_core::{Product, ProductId, ProductInput};

use super::{ApiClient, ApiError};
use crate::models::AdminSession;

impl ApiClient {
    /// Fetch the product catalog (`GET /api/products`), cached briefly.
    ///
    /// Fetch failures are not cached, so a degraded catalog recovers on the
    /// next attempt.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(products) = self.catalog_cache().get(&()).await {
            debug!("catalog served from cache");
            return Ok(products);
        }

        let response = self.http().get(self.endpoint("/api/products")).send().await?;
        let products: Vec<Product> = Self::read_json(response).await?;
        self.catalog_cache().insert((), products.clone()).await;
        Ok(products)
    }

    /// Create a product (`POST /api/products`), returning the server's copy
    /// with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    #[instrument(skip(self, session, input), fields(name = %input.name))]
    pub async fn create_product(
        &self,
        input: &ProductInput,
        session: &AdminSession,
    ) -> Result<Product, ApiError> {
        let response = self
            .http()
            .post(self.endpoint("/api/products"))
            .bearer_auth(&session.token)
            .json(input)
            .send()
            .await?;
        let product = Self::read_json(response).await?;
        self.catalog_cache().invalidate(&()).await;
        Ok(product)
    }

    /// Update a product (`PUT /api/products/{id}`), returning the server's
    /// updated copy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    #[instrument(skip(self, session, input))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
        session: &AdminSession,
    ) -> Result<Product, ApiError> {
        let response = self
            .http()
            .put(self.endpoint(&format!("/api/products/{id}")))
            .bearer_auth(&session.token)
            .json(input)
            .send()
            .await?;
        let product = Self::read_json(response).await?;
        self.catalog_cache().invalidate(&()).await;
        Ok(product)
    }

    /// Delete a product (`DELETE /api/products/{id}`). No response body is
    /// required.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    #[instrument(skip(self, session))]
    pub async fn delete_product(
        &self,
        id: ProductId,
        session: &AdminSession,
    ) -> Result<(), ApiError> {
        let response = self
            .http()
            .delete(self.endpoint(&format!("/api/products/{id}")))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::check(response).await?;
        self.catalog_cache().invalidate(&()).await;
        Ok(())
    }
}
