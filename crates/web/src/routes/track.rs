//! Order status lookup.
//!
//! A single order-identifier query against the order API. One lookup at a
//! time per view: a new lookup replaces any prior result or error.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use agrocart_core::{Order, OrderStatus};

use crate::filters;
use crate::state::AppState;

/// Fixed message for any failed lookup.
const LOOKUP_FAILED: &str = "Failed to fetch order details. Please try again.";

/// Lookup query parameters.
#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    pub order_id: Option<String>,
}

/// Fetched order display data.
#[derive(Clone)]
pub struct OrderDetailView {
    pub id: String,
    pub buyer_name: String,
    pub delivery_address: String,
    pub status: OrderStatus,
    pub items: Vec<TrackedItemView>,
}

/// One "productName × quantity" line.
#[derive(Clone)]
pub struct TrackedItemView {
    pub product_name: String,
    pub quantity: u32,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            buyer_name: order.buyer_name.clone(),
            delivery_address: order.delivery_address.clone(),
            status: order.status,
            items: order
                .items
                .iter()
                .map(|item| TrackedItemView {
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Tracking page template.
#[derive(Template, WebTemplate)]
#[template(path = "track.html")]
pub struct TrackTemplate {
    /// Echoed back into the input field.
    pub order_id: String,
    pub order: Option<OrderDetailView>,
    pub error: Option<&'static str>,
}

/// Display the tracking page, performing a lookup when an identifier was
/// submitted. A failed lookup clears any prior result and shows the fixed
/// error message.
#[instrument(skip(state, query))]
pub async fn track(
    State(state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> impl IntoResponse {
    let order_id = query.order_id.unwrap_or_default();

    // Non-empty input gates the lookup, mirroring the disabled Track button.
    if order_id.trim().is_empty() {
        return TrackTemplate {
            order_id,
            order: None,
            error: None,
        };
    }

    match state.api().get_order(&order_id).await {
        Ok(order) => TrackTemplate {
            order_id,
            order: Some(OrderDetailView::from(&order)),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Order lookup failed: {e}");
            TrackTemplate {
                order_id,
                order: None,
                error: Some(LOOKUP_FAILED),
            }
        }
    }
}
