//! Admin authentication route handlers.
//!
//! Login stores the API-issued token in the session; logout clears it and
//! always succeeds without a network call.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::ApiError;
use crate::error::Result;
use crate::filters;
use crate::middleware::{Flash, clear_admin_session, set_admin_session, set_flash, take_flash};
use crate::models::AdminSession;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub flash: Option<Flash>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/register.html")]
pub struct RegisterTemplate {
    pub flash: Option<Flash>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(session: Session) -> impl IntoResponse {
    LoginTemplate {
        flash: take_flash(&session).await,
    }
}

/// Authenticate against the remote API and store the returned token.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let password = SecretString::from(form.password);

    match state.api().admin_login(&form.email, &password).await {
        Ok(token) => {
            set_admin_session(&session, &AdminSession { token: token.token }).await?;
            Ok(Redirect::to("/admin").into_response())
        }
        Err(e) => {
            tracing::warn!("Admin login rejected: {e}");
            Ok(LoginTemplate {
                flash: Some(Flash::error(login_failure_message(&e))),
            }
            .into_response())
        }
    }
}

/// Display the registration page.
pub async fn register_page(session: Session) -> impl IntoResponse {
    RegisterTemplate {
        flash: take_flash(&session).await,
    }
}

/// Create an admin account, then hand off to the login page.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let password = SecretString::from(form.password);

    match state
        .api()
        .admin_register(&form.name, &form.email, &password)
        .await
    {
        Ok(()) => {
            set_flash(
                &session,
                Flash::success("Registration successful. Please log in."),
            )
            .await;
            Redirect::to("/admin/login").into_response()
        }
        Err(e) => {
            tracing::warn!("Admin registration rejected: {e}");
            RegisterTemplate {
                flash: Some(Flash::error(register_failure_message(&e))),
            }
            .into_response()
        }
    }
}

/// Clear the stored session token and return to the login view.
///
/// Always succeeds; no network call is involved.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_admin_session(&session).await?;
    set_flash(&session, Flash::success("Logged out successfully!")).await;
    Ok(Redirect::to("/admin/login"))
}

/// The API's own message when it sent one, a generic notice otherwise.
fn login_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Api { message, .. } => message.clone(),
        _ => "Login failed".to_string(),
    }
}

fn register_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Api { message, .. } => message.clone(),
        _ => "Registration failed".to_string(),
    }
}
