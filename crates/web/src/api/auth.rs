//! Admin authentication endpoints.
//!
//! The remote API is the actual authority; the client only keeps the opaque
//! token it hands back.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ApiClient, ApiError};

/// Response of a successful admin login. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminToken {
    pub token: String,
}

/// Body for `POST /api/auth/admin/login`.
#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body for `POST /api/auth/admin/register`.
#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Authenticate an admin (`POST /api/auth/admin/login`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the credentials are rejected or the request
    /// fails.
    #[instrument(skip(self, password))]
    pub async fn admin_login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AdminToken, ApiError> {
        let body = LoginBody {
            email,
            password: password.expose_secret(),
        };
        let response = self
            .http()
            .post(self.endpoint("/api/auth/admin/login"))
            .json(&body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Register an admin account (`POST /api/auth/admin/register`).
    ///
    /// The created record is not needed client-side, so the body is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request is rejected or fails.
    #[instrument(skip(self, password))]
    pub async fn admin_register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), ApiError> {
        let body = RegisterBody {
            name,
            email,
            password: password.expose_secret(),
        };
        let response = self
            .http()
            .post(self.endpoint("/api/auth/admin/register"))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
