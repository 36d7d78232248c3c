//! Home page: the product catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use agrocart_core::Product;

use crate::filters;
use crate::state::AppState;

/// Product display data for the catalog grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.display(),
            description: product.description.clone(),
        }
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    /// Catalog-load failure replaces the grid with this message.
    pub error: Option<String>,
}

/// Display the product catalog.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    match state.api().list_products().await {
        Ok(products) => HomeTemplate {
            products: products.iter().map(ProductCardView::from).collect(),
            error: None,
        },
        Err(e) => {
            tracing::error!("Failed to load catalog: {e}");
            HomeTemplate {
                products: Vec::new(),
                error: Some("Failed to load products.".to_string()),
            }
        }
    }
}
