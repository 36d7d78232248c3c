//! Order wire types for the remote AgroCart API.
//!
//! Orders use camelCase field names on the wire; the structs here keep Rust
//! naming and map via serde.

use serde::{Deserialize, Serialize};

use crate::types::{OrderId, OrderStatus, Price, ProductId};

/// An order as returned by `GET /api/orders` and `GET /api/orders/{id}`.
///
/// Never deleted client-side; status is mutated only by admin action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub buyer_name: String,
    pub buyer_contact: String,
    pub delivery_address: String,
    pub status: OrderStatus,
    pub items: Vec<OrderLineItem>,
    /// Computed server-side; not present on every deployment, so optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Price>,
}

/// One product+quantity entry within an order.
///
/// `product_name` is denormalized: captured at selection time and not
/// re-validated against the current catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
}

/// Body for `POST /api/orders`, produced by a validated draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub buyer_name: String,
    pub buyer_contact: String,
    pub delivery_address: String,
    pub items: Vec<NewLineItem>,
}

/// One line of a [`NewOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
}

/// Body for `PUT /api/orders/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_camel_case_wire() {
        let json = r#"{
            "id": 12,
            "buyerName": "Alice",
            "buyerContact": "555",
            "deliveryAddress": "1 Main St",
            "status": "In Progress",
            "items": [{"productId": 3, "productName": "Tomato", "quantity": 2}]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new(12));
        assert_eq!(order.buyer_name, "Alice");
        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(order.items[0].product_id, ProductId::new(3));
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.total_price, None);
    }

    #[test]
    fn test_new_order_serializes_camel_case() {
        let new_order = NewOrder {
            buyer_name: "Alice".to_string(),
            buyer_contact: "555".to_string(),
            delivery_address: "1 Main St".to_string(),
            items: vec![NewLineItem {
                product_id: ProductId::new(3),
                product_name: "Tomato".to_string(),
                quantity: 2,
            }],
        };
        let value = serde_json::to_value(&new_order).unwrap();
        assert_eq!(value["buyerName"], "Alice");
        assert_eq!(value["deliveryAddress"], "1 Main St");
        assert_eq!(value["items"][0]["productId"], 3);
        assert_eq!(value["items"][0]["quantity"], 2);
    }

    #[test]
    fn test_status_update_body() {
        let body = StatusUpdate {
            status: OrderStatus::Delivered,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"Delivered"}"#
        );
    }
}
