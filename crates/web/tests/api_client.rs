//! Integration tests for the remote API client.
//!
//! These tests stand up a small in-process HTTP server speaking the remote
//! API's wire protocol and drive the real `ApiClient` against it, covering
//! the JSON shapes, bearer auth, and error-body handling.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};

use agrocart_core::{NewLineItem, NewOrder, OrderStatus, ProductId, ProductInput};
use agrocart_web::api::{ApiClient, ApiError};
use agrocart_web::models::AdminSession;

const ADMIN_TOKEN: &str = "test-admin-token";

/// Shared state of the mock remote API.
#[derive(Default)]
struct MockApi {
    products: Mutex<Vec<Value>>,
    orders: Mutex<Vec<Value>>,
    /// Last body received by `POST /api/orders`, for wire-shape assertions.
    last_order_body: Mutex<Option<Value>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ADMIN_TOKEN}"))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Unauthorized"})),
    )
}

fn mock_router(state: Arc<MockApi>) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(|State(s): State<Arc<MockApi>>| async move {
                Json(Value::Array(s.products.lock().unwrap().clone()))
            })
            .post(
                |State(s): State<Arc<MockApi>>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    if !authorized(&headers) {
                        return unauthorized();
                    }
                    let mut products = s.products.lock().unwrap();
                    let id = i64::try_from(products.len()).unwrap() + 1;
                    let mut product = body;
                    product["id"] = json!(id);
                    products.push(product.clone());
                    (StatusCode::CREATED, Json(product))
                },
            ),
        )
        .route(
            "/api/orders",
            get(|State(s): State<Arc<MockApi>>, headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return unauthorized();
                }
                (
                    StatusCode::OK,
                    Json(Value::Array(s.orders.lock().unwrap().clone())),
                )
            })
            .post(
                |State(s): State<Arc<MockApi>>, Json(body): Json<Value>| async move {
                    *s.last_order_body.lock().unwrap() = Some(body.clone());
                    let mut order = body;
                    order["id"] = json!(42);
                    order["status"] = json!("Pending");
                    s.orders.lock().unwrap().push(order.clone());
                    (StatusCode::CREATED, Json(order))
                },
            ),
        )
        .route(
            "/api/orders/{id}",
            get(
                |State(s): State<Arc<MockApi>>, Path(id): Path<i64>| async move {
                    let orders = s.orders.lock().unwrap();
                    orders
                        .iter()
                        .find(|o| o["id"] == json!(id))
                        .cloned()
                        .map_or_else(
                            || {
                                (
                                    StatusCode::NOT_FOUND,
                                    Json(json!({"error": "Order not found"})),
                                )
                            },
                            |order| (StatusCode::OK, Json(order)),
                        )
                },
            )
            .put(
                |State(s): State<Arc<MockApi>>,
                 Path(id): Path<i64>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    if !authorized(&headers) {
                        return unauthorized();
                    }
                    let mut orders = s.orders.lock().unwrap();
                    let Some(order) = orders.iter_mut().find(|o| o["id"] == json!(id)) else {
                        return (
                            StatusCode::NOT_FOUND,
                            Json(json!({"error": "Order not found"})),
                        );
                    };
                    order["status"] = body["status"].clone();
                    (StatusCode::OK, Json(order.clone()))
                },
            ),
        )
        .route(
            "/api/auth/admin/login",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == json!("admin@agrocart.test")
                    && body["password"] == json!("hunter2")
                {
                    (StatusCode::OK, Json(json!({"token": ADMIN_TOKEN})))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"error": "Invalid credentials"})),
                    )
                }
            }),
        )
        .with_state(state)
}

/// Bind the mock API on an ephemeral port and return a client pointed at it.
async fn start_mock(state: Arc<MockApi>) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mock_router(state)).await.unwrap();
    });
    ApiClient::new(&format!("http://{addr}"))
}

fn seeded() -> Arc<MockApi> {
    let state = Arc::new(MockApi::default());
    *state.products.lock().unwrap() = vec![
        json!({"id": 1, "name": "Tomato", "price": 2.5, "description": "Ripe"}),
        json!({"id": 2, "name": "Potato", "price": 1.0, "description": "Bulk sacks"}),
    ];
    *state.orders.lock().unwrap() = vec![json!({
        "id": 7,
        "buyerName": "Bob",
        "buyerContact": "555-0100",
        "deliveryAddress": "2 Side St",
        "status": "Pending",
        "items": [{"productId": 1, "productName": "Tomato", "quantity": 3}],
    })];
    state
}

// =============================================================================
// Product Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_list_products_decodes_catalog() {
    let api = start_mock(seeded()).await;

    let products = api.list_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, ProductId::new(1));
    assert_eq!(products[0].name, "Tomato");
    assert_eq!(products[0].price.display(), "$2.50");
}

#[tokio::test]
async fn test_create_product_requires_token_and_invalidates_cache() {
    let state = seeded();
    let api = start_mock(Arc::clone(&state)).await;
    let session = AdminSession {
        token: ADMIN_TOKEN.to_string(),
    };

    // Prime the cache.
    assert_eq!(api.list_products().await.unwrap().len(), 2);

    let input = ProductInput {
        name: "Onion".to_string(),
        price: "1.8".parse().unwrap(),
        description: "Red onions".to_string(),
    };
    let created = api.create_product(&input, &session).await.unwrap();
    assert_eq!(created.id, ProductId::new(3));
    assert_eq!(created.name, "Onion");

    // The mutation invalidated the cached catalog.
    assert_eq!(api.list_products().await.unwrap().len(), 3);

    let stale = AdminSession {
        token: "expired".to_string(),
    };
    let err = api.create_product(&input, &stale).await.unwrap_err();
    assert!(err.is_unauthorized());
}

// =============================================================================
// Order Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_create_order_sends_camel_case_wire_shape() {
    let state = seeded();
    let api = start_mock(Arc::clone(&state)).await;

    let new_order = NewOrder {
        buyer_name: "Alice".to_string(),
        buyer_contact: "555-0199".to_string(),
        delivery_address: "1 Main St".to_string(),
        items: vec![NewLineItem {
            product_id: ProductId::new(1),
            product_name: "Tomato".to_string(),
            quantity: 2,
        }],
    };

    let created = api.create_order(&new_order).await.unwrap();
    assert_eq!(created.id.to_string(), "42");
    assert_eq!(created.status, OrderStatus::Pending);

    let body = state.last_order_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["buyerName"], json!("Alice"));
    assert_eq!(body["deliveryAddress"], json!("1 Main St"));
    assert_eq!(body["items"][0]["productId"], json!(1));
    assert_eq!(body["items"][0]["productName"], json!("Tomato"));
    assert_eq!(body["items"][0]["quantity"], json!(2));
}

#[tokio::test]
async fn test_get_order_found_and_not_found() {
    let api = start_mock(seeded()).await;

    let order = api.get_order(" 7 ").await.unwrap();
    assert_eq!(order.buyer_name, "Bob");
    assert_eq!(order.items[0].product_name, "Tomato");

    let err = api.get_order("999").await.unwrap_err();
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Order not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_order_id_stays_one_path_segment() {
    let api = start_mock(seeded()).await;

    // Order 7 exists; an identifier carrying a query or path delimiter must
    // not be split into path + query and resolve to it anyway.
    let err = api.get_order("7?x=1").await.unwrap_err();
    assert!(matches!(err, ApiError::Api { .. }), "got {err:?}");

    let err = api.get_order("7/items").await.unwrap_err();
    assert!(matches!(err, ApiError::Api { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_update_order_status_round_trip() {
    let api = start_mock(seeded()).await;
    let session = AdminSession {
        token: ADMIN_TOKEN.to_string(),
    };

    let updated = api
        .update_order_status("7".parse().unwrap(), OrderStatus::InProgress, &session)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::InProgress);

    let orders = api.list_orders(&session).await.unwrap();
    assert_eq!(orders[0].status, OrderStatus::InProgress);
}

#[tokio::test]
async fn test_list_orders_rejects_missing_token() {
    let api = start_mock(seeded()).await;
    let stale = AdminSession {
        token: "nope".to_string(),
    };

    let err = api.list_orders(&stale).await.unwrap_err();
    assert!(err.is_unauthorized());
}

// =============================================================================
// Auth Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_admin_login_returns_token() {
    let api = start_mock(seeded()).await;

    let token = api
        .admin_login("admin@agrocart.test", &"hunter2".into())
        .await
        .unwrap();
    assert_eq!(token.token, ADMIN_TOKEN);
}

#[tokio::test]
async fn test_admin_login_surfaces_api_error_message() {
    let api = start_mock(seeded()).await;

    let err = api
        .admin_login("admin@agrocart.test", &"wrong".into())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid credentials");
}
