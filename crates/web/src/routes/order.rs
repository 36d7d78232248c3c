//! Order placement form.
//!
//! The form is a dynamic multi-row line-item editor rendered server-side.
//! Each POST carries the whole draft (repeated `product_id`/`quantity`
//! fields) plus an `action` discriminator: append a row, remove a row by
//! position, or submit. Add/remove re-render the retained draft; submit
//! validates it, transforms it into the wire shape, and calls the
//! order-creation endpoint.
//!
//! The body arrives as `RawForm` because the row fields repeat per row,
//! which `axum::Form`'s deserializer does not model.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{RawForm, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use agrocart_core::{LineItemDraft, OrderDraft, Product, ValidationErrors};

use crate::filters;
use crate::state::AppState;

/// What a form POST asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Append a blank row.
    AddItem,
    /// Remove the row at this position.
    RemoveItem(usize),
    /// Validate and submit the draft.
    Submit,
}

/// Product option for the row selects.
#[derive(Clone)]
pub struct ProductOptionView {
    pub id: String,
    pub label: String,
}

impl From<&Product> for ProductOptionView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            label: format!("{} ({})", product.name, product.price.display()),
        }
    }
}

/// Order form page template.
#[derive(Template, WebTemplate)]
#[template(path = "order/form.html")]
pub struct OrderFormTemplate {
    pub draft: OrderDraft,
    pub catalog: Vec<ProductOptionView>,
    pub errors: ValidationErrors,
    /// Generic submit-failure notice; the draft is retained for retry.
    pub notice: Option<String>,
    /// Catalog fetch failed: selects render empty (degraded, not fatal).
    pub catalog_failed: bool,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "order/confirmation.html")]
pub struct OrderConfirmationTemplate {
    pub order_id: String,
}

/// Display a blank order form.
#[instrument(skip(state))]
pub async fn order_page(State(state): State<AppState>) -> impl IntoResponse {
    let (catalog, catalog_failed) = fetch_catalog(&state).await;

    OrderFormTemplate {
        draft: OrderDraft::new(),
        errors: ValidationErrors::for_items(1),
        catalog: catalog.iter().map(ProductOptionView::from).collect(),
        notice: None,
        catalog_failed,
    }
}

/// Handle an order form POST: row edits re-render the draft, submit
/// validates and forwards it to the API.
#[instrument(skip(state, form))]
pub async fn order_action(State(state): State<AppState>, RawForm(form): RawForm) -> Response {
    let (draft, action) = parse_order_form(&form);
    let (catalog, catalog_failed) = fetch_catalog(&state).await;

    // Display names are resolved against the current catalog on every POST,
    // so a row always carries the name matching its selected identifier.
    let draft = resolve_product_names(draft, &catalog);

    let render = |draft: OrderDraft, errors: ValidationErrors, notice: Option<String>| {
        OrderFormTemplate {
            catalog: catalog.iter().map(ProductOptionView::from).collect(),
            draft,
            errors,
            notice,
            catalog_failed,
        }
        .into_response()
    };

    match action {
        FormAction::AddItem => {
            let draft = draft.with_item_added();
            let errors = ValidationErrors::for_items(draft.items.len());
            render(draft, errors, None)
        }
        FormAction::RemoveItem(index) => {
            let draft = draft.with_item_removed(index);
            let errors = ValidationErrors::for_items(draft.items.len());
            render(draft, errors, None)
        }
        FormAction::Submit => match draft.validate() {
            Err(errors) => render(draft, errors, None),
            Ok(new_order) => match state.api().create_order(&new_order).await {
                Ok(order) => OrderConfirmationTemplate {
                    order_id: order.id.to_string(),
                }
                .into_response(),
                Err(e) => {
                    tracing::error!("Failed to place order: {e}");
                    let errors = ValidationErrors::for_items(draft.items.len());
                    render(
                        draft,
                        errors,
                        Some("Failed to place order. Please try again.".to_string()),
                    )
                }
            },
        },
    }
}

/// Fetch the catalog, degrading to an empty list when the API is down.
async fn fetch_catalog(state: &AppState) -> (Vec<Product>, bool) {
    match state.api().list_products().await {
        Ok(products) => (products, false),
        Err(e) => {
            tracing::warn!("Catalog unavailable for order form: {e}");
            (Vec::new(), true)
        }
    }
}

/// Decode the posted draft and requested action from urlencoded pairs.
///
/// Row fields repeat in document order; `product_id` and `quantity` are
/// paired positionally. A missing or unknown `action` falls back to submit.
fn parse_order_form(body: &[u8]) -> (OrderDraft, FormAction) {
    let mut buyer_name = String::new();
    let mut buyer_contact = String::new();
    let mut delivery_address = String::new();
    let mut product_ids: Vec<String> = Vec::new();
    let mut quantities: Vec<String> = Vec::new();
    let mut action = FormAction::Submit;

    for (key, value) in url::form_urlencoded::parse(body) {
        match key.as_ref() {
            "buyer_name" => buyer_name = value.into_owned(),
            "buyer_contact" => buyer_contact = value.into_owned(),
            "delivery_address" => delivery_address = value.into_owned(),
            "product_id" => product_ids.push(value.into_owned()),
            "quantity" => quantities.push(value.into_owned()),
            "action" => action = parse_action(&value),
            _ => {}
        }
    }

    let items = product_ids
        .into_iter()
        .zip(quantities)
        .map(|(product_id, quantity)| LineItemDraft {
            product_id,
            product_name: String::new(),
            quantity,
        })
        .collect();

    let draft = OrderDraft {
        buyer_name,
        buyer_contact,
        delivery_address,
        items,
    };

    (draft, action)
}

fn parse_action(raw: &str) -> FormAction {
    if raw == "add" {
        return FormAction::AddItem;
    }
    if let Some(index) = raw.strip_prefix("remove-")
        && let Ok(index) = index.parse::<usize>()
    {
        return FormAction::RemoveItem(index);
    }
    FormAction::Submit
}

/// Re-resolve every row's display name from the catalog.
fn resolve_product_names(mut draft: OrderDraft, catalog: &[Product]) -> OrderDraft {
    for index in 0..draft.items.len() {
        let product_id = draft.items[index].product_id.clone();
        draft = draft.with_item_product(index, &product_id, catalog);
    }
    draft
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use agrocart_core::ProductId;

    #[test]
    fn test_parse_form_builds_rows_in_order() {
        let body = b"buyer_name=Alice&buyer_contact=555&delivery_address=1+Main+St\
            &product_id=3&quantity=2&product_id=4&quantity=1&action=submit";
        let (draft, action) = parse_order_form(body);

        assert_eq!(action, FormAction::Submit);
        assert_eq!(draft.buyer_name, "Alice");
        assert_eq!(draft.delivery_address, "1 Main St");
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0].product_id, "3");
        assert_eq!(draft.items[0].quantity, "2");
        assert_eq!(draft.items[1].product_id, "4");
    }

    #[test]
    fn test_parse_form_actions() {
        let (_, action) = parse_order_form(b"action=add");
        assert_eq!(action, FormAction::AddItem);

        let (_, action) = parse_order_form(b"action=remove-1");
        assert_eq!(action, FormAction::RemoveItem(1));

        // Unknown or absent actions submit, never panic.
        let (_, action) = parse_order_form(b"action=remove-x");
        assert_eq!(action, FormAction::Submit);
        let (_, action) = parse_order_form(b"buyer_name=Alice");
        assert_eq!(action, FormAction::Submit);
    }

    #[test]
    fn test_parse_form_empty_body() {
        let (draft, action) = parse_order_form(b"");
        assert_eq!(action, FormAction::Submit);
        assert!(draft.items.is_empty());
        assert!(draft.buyer_name.is_empty());
    }

    #[test]
    fn test_resolve_names_against_catalog() {
        let catalog = vec![Product {
            id: ProductId::new(3),
            name: "Tomato".to_string(),
            price: "2.5".parse().unwrap(),
            description: String::new(),
        }];
        let (draft, _) = parse_order_form(b"product_id=3&quantity=2&product_id=9&quantity=1");
        let draft = resolve_product_names(draft, &catalog);

        assert_eq!(draft.items[0].product_name, "Tomato");
        // Identifier absent from the catalog resolves to no name.
        assert_eq!(draft.items[1].product_name, "");
    }
}
