//! Authentication extractors for the admin dashboard.
//!
//! The guard is a client-side convenience gate only: it checks that a session
//! token exists, not that it is still valid. The remote API is the actual
//! authority and rejects stale tokens on use.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::middleware::flash::{Flash, set_flash};
use crate::models::{AdminSession, session_keys};

/// Extractor that requires a stored admin session.
///
/// Without one the request is redirected to the login view with an
/// "Unauthorized" notice, before any dashboard content renders.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     // admin.token is available here
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

/// Rejection for a missing admin session.
pub enum AdminRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// No session layer present (misconfigured router).
    Unavailable,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/admin/login").into_response(),
            Self::Unavailable => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection::Unavailable)?
            .clone();

        let admin: Option<AdminSession> = session
            .get(session_keys::ADMIN_SESSION)
            .await
            .ok()
            .flatten();

        match admin {
            Some(admin) => Ok(Self(admin)),
            None => {
                set_flash(&session, Flash::error("Unauthorized")).await;
                Err(AdminRejection::RedirectToLogin)
            }
        }
    }
}

/// Store the admin session after a successful login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin_session(
    session: &Session,
    admin: &AdminSession,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ADMIN_SESSION, admin).await
}

/// Clear the admin session (logout or discovered staleness).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_admin_session(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<AdminSession>(session_keys::ADMIN_SESSION)
        .await?;
    Ok(())
}
