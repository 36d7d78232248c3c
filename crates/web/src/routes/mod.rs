//! HTTP route handlers for the web client.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                             - Product catalog (home)
//! GET  /health                       - Health check
//!
//! # Orders
//! GET  /order                        - Order placement form
//! POST /order                        - Form actions: add/remove row, submit
//! GET  /track                        - Order status lookup (?order_id=...)
//!
//! # Admin auth
//! GET  /admin/login                  - Login page
//! POST /admin/login                  - Login action
//! GET  /admin/register               - Registration page
//! POST /admin/register               - Registration action
//! POST /admin/logout                 - Logout action
//!
//! # Admin dashboard (requires session)
//! GET  /admin                        - Dashboard (?edit=<id> selects a product to edit)
//! POST /admin/orders/{id}/status     - Update an order's status
//! POST /admin/products               - Create or update a product
//! POST /admin/products/{id}/delete   - Delete a product
//! ```

pub mod admin_auth;
pub mod dashboard;
pub mod home;
pub mod order;
pub mod track;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin auth routes router.
pub fn admin_auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(admin_auth::login_page).post(admin_auth::login),
        )
        .route(
            "/register",
            get(admin_auth::register_page).post(admin_auth::register),
        )
        .route("/logout", post(admin_auth::logout))
}

/// Create the admin dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::show))
        .route("/orders/{id}/status", post(dashboard::update_order_status))
        .route("/products", post(dashboard::submit_product))
        .route("/products/{id}/delete", post(dashboard::delete_product))
}

/// Create all routes for the web client.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Storefront
        .route("/", get(home::home))
        .route("/order", get(order::order_page).post(order::order_action))
        .route("/track", get(track::track))
        // Admin
        .nest("/admin", dashboard_routes().merge(admin_auth_routes()))
}
