//! Admin dashboard route handlers.
//!
//! The dashboard holds the fetched order and product lists for the duration
//! of a request. Mutations call the remote API first and patch the local
//! lists only after confirmed success (`agrocart_core::reconcile`); on
//! failure the lists render exactly as fetched. Orders and products load
//! concurrently and fail independently.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use agrocart_core::{
    Order, OrderId, OrderStatus, Price, Product, ProductId, ProductInput, reconcile,
};

use crate::api::ApiError;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{Flash, RequireAdmin, clear_admin_session, set_flash, take_flash};
use crate::models::AdminSession;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Order row for the orders table.
#[derive(Clone)]
pub struct OrderRowView {
    pub id: String,
    pub buyer_name: String,
    pub total: String,
    pub status: OrderStatus,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            buyer_name: order.buyer_name.clone(),
            total: order
                .total_price
                .as_ref()
                .map_or_else(|| "—".to_string(), Price::display),
            status: order.status,
        }
    }
}

/// Product row for the products table.
#[derive(Clone)]
pub struct ProductRowView {
    pub id: String,
    pub name: String,
    pub price: String,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.display(),
        }
    }
}

/// Add/edit product form state.
///
/// An empty `editing_id` means the create path; a set one means the update
/// path for that product.
#[derive(Clone, Default)]
pub struct ProductFormView {
    pub editing_id: String,
    pub name: String,
    pub price: String,
    pub description: String,
}

impl ProductFormView {
    /// A blank create form.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Prefill from the product selected for editing.
    #[must_use]
    pub fn editing(product: &Product) -> Self {
        Self {
            editing_id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.amount().to_string(),
            description: product.description.clone(),
        }
    }

    /// Whether an editing target is set.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        !self.editing_id.is_empty()
    }
}

/// Dashboard page template.
///
/// `None` lists mean that fetch failed; the other list still renders.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub orders: Option<Vec<OrderRowView>>,
    pub products: Option<Vec<ProductRowView>>,
    pub form: ProductFormView,
    pub flash: Option<Flash>,
}

// =============================================================================
// Form / Query Types
// =============================================================================

/// Dashboard query parameters.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Product identifier to load into the edit form.
    pub edit: Option<i32>,
}

/// Status mutation form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: OrderStatus,
}

/// Product create/update form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub editing_id: String,
    pub name: String,
    pub price: String,
    pub description: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the dashboard: orders and products fetched concurrently, each
/// with its own failure mode.
#[instrument(skip(state, session, admin))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<DashboardQuery>,
) -> Result<Response> {
    let (orders, products) = fetch_lists(&state, &admin).await;

    if is_session_stale(&orders, &products) {
        return session_expired(&session).await;
    }

    let mut flash = take_flash(&session).await;
    if flash.is_none() && (orders.is_err() || products.is_err()) {
        flash = Some(Flash::error("Failed to fetch data"));
    }

    let form = query
        .edit
        .map(ProductId::new)
        .and_then(|id| {
            products
                .as_ref()
                .ok()
                .and_then(|list| list.iter().find(|p| p.id == id))
        })
        .map_or_else(ProductFormView::blank, ProductFormView::editing);

    Ok(render(orders.ok(), products.ok(), form, flash))
}

/// Update an order's status, patching the matching local entry only after
/// the API confirms.
#[instrument(skip(state, session, admin))]
pub async fn update_order_status(
    State(state): State<AppState>,
    session: Session,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Result<Response> {
    let (orders, products) = fetch_lists(&state, &admin).await;
    if is_session_stale(&orders, &products) {
        return session_expired(&session).await;
    }

    let id = OrderId::new(id);
    let (orders, flash) = match state
        .api()
        .update_order_status(id, form.status, &admin)
        .await
    {
        Ok(_) => (
            orders.map(|list| reconcile::with_order_status(&list, id, form.status)),
            Flash::success("Order status updated!"),
        ),
        Err(e) if e.is_unauthorized() => return session_expired(&session).await,
        Err(e) => {
            tracing::error!("Failed to update order status: {e}");
            (orders, Flash::error("Failed to update order status"))
        }
    };

    Ok(render(
        orders.ok(),
        products.ok(),
        ProductFormView::blank(),
        Some(flash),
    ))
}

/// Create or update a product, branching on the hidden editing target.
#[instrument(skip(state, session, admin, form))]
pub async fn submit_product(
    State(state): State<AppState>,
    session: Session,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let (orders, products) = fetch_lists(&state, &admin).await;
    if is_session_stale(&orders, &products) {
        return session_expired(&session).await;
    }
    let orders = orders.ok();
    let products = products.ok();

    // Required-field check runs before either branch; failure blocks the call.
    let Some(input) = validate_product_form(&form) else {
        let flash = Flash::error(product_form_notice(&form));
        return Ok(render(orders, products, retained_form(&form), Some(flash)));
    };

    // Success resets the form and clears the editing target; failure keeps
    // the submitted values in place for retry.
    let (products, flash, form_view) = if form.editing_id.is_empty() {
        match state.api().create_product(&input, &admin).await {
            Ok(created) => (
                products.map(|list| reconcile::with_product_appended(list, created)),
                Flash::success("Product added successfully!"),
                ProductFormView::blank(),
            ),
            Err(e) if e.is_unauthorized() => return session_expired(&session).await,
            Err(e) => {
                tracing::error!("Failed to create product: {e}");
                (
                    products,
                    Flash::error("Failed to add product"),
                    retained_form(&form),
                )
            }
        }
    } else {
        let id: ProductId = form
            .editing_id
            .parse()
            .map_err(|_| AppError::BadRequest("invalid product id".to_string()))?;
        match state.api().update_product(id, &input, &admin).await {
            Ok(updated) => (
                products.map(|list| reconcile::with_product_replaced(&list, &updated)),
                Flash::success("Product updated successfully!"),
                ProductFormView::blank(),
            ),
            Err(e) if e.is_unauthorized() => return session_expired(&session).await,
            Err(e) => {
                tracing::error!("Failed to update product: {e}");
                (
                    products,
                    Flash::error("Failed to update product"),
                    retained_form(&form),
                )
            }
        }
    };

    Ok(render(orders, products, form_view, Some(flash)))
}

/// Delete a product. The confirmation step happens in the view before this
/// request is ever issued.
#[instrument(skip(state, session, admin))]
pub async fn delete_product(
    State(state): State<AppState>,
    session: Session,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    let (orders, products) = fetch_lists(&state, &admin).await;
    if is_session_stale(&orders, &products) {
        return session_expired(&session).await;
    }

    let id = ProductId::new(id);
    let (products, flash) = match state.api().delete_product(id, &admin).await {
        Ok(()) => (
            products.map(|list| reconcile::without_product(&list, id)),
            Flash::success("Product deleted successfully!"),
        ),
        Err(e) if e.is_unauthorized() => return session_expired(&session).await,
        Err(e) => {
            tracing::error!("Failed to delete product: {e}");
            (products, Flash::error("Failed to delete product"))
        }
    };

    Ok(render(
        orders.ok(),
        products.ok(),
        ProductFormView::blank(),
        Some(flash),
    ))
}

// =============================================================================
// Helpers
// =============================================================================

/// Fetch both dashboard lists concurrently. Each list fails independently;
/// neither failure blocks the other.
async fn fetch_lists(
    state: &AppState,
    admin: &AdminSession,
) -> (
    std::result::Result<Vec<Order>, ApiError>,
    std::result::Result<Vec<Product>, ApiError>,
) {
    tokio::join!(state.api().list_orders(admin), state.api().list_products())
}

/// Whether either fetch came back 401: the stored token is stale.
fn is_session_stale(
    orders: &std::result::Result<Vec<Order>, ApiError>,
    products: &std::result::Result<Vec<Product>, ApiError>,
) -> bool {
    orders.as_ref().err().is_some_and(ApiError::is_unauthorized)
        || products
            .as_ref()
            .err()
            .is_some_and(ApiError::is_unauthorized)
}

/// Invalidate the session and return to login; staleness is only ever
/// discovered here, on a rejected request.
async fn session_expired(session: &Session) -> Result<Response> {
    clear_admin_session(session).await?;
    set_flash(session, Flash::error("Session expired, please log in again")).await;
    Ok(Redirect::to("/admin/login").into_response())
}

fn render(
    orders: Option<Vec<Order>>,
    products: Option<Vec<Product>>,
    form: ProductFormView,
    flash: Option<Flash>,
) -> Response {
    DashboardTemplate {
        orders: orders.map(|list| list.iter().map(OrderRowView::from).collect()),
        products: products.map(|list| list.iter().map(ProductRowView::from).collect()),
        form,
        flash,
    }
    .into_response()
}

/// All three product fields present and the price a non-negative number.
fn validate_product_form(form: &ProductForm) -> Option<ProductInput> {
    if form.name.trim().is_empty()
        || form.price.trim().is_empty()
        || form.description.trim().is_empty()
    {
        return None;
    }

    let price: Price = form.price.parse().ok()?;
    if price.is_negative() {
        return None;
    }

    Some(ProductInput {
        name: form.name.trim().to_string(),
        price,
        description: form.description.trim().to_string(),
    })
}

/// The notice matching why `validate_product_form` rejected this form.
fn product_form_notice(form: &ProductForm) -> &'static str {
    if form.name.trim().is_empty()
        || form.price.trim().is_empty()
        || form.description.trim().is_empty()
    {
        "Please fill out all fields"
    } else {
        "Price must be a non-negative number"
    }
}

/// Keep the submitted values in the form after a rejected submission.
fn retained_form(form: &ProductForm) -> ProductFormView {
    ProductFormView {
        editing_id: form.editing_id.clone(),
        name: form.name.clone(),
        price: form.price.clone(),
        description: form.description.clone(),
    }
}
