//! Local list reconciliation after confirmed remote mutations.
//!
//! The admin dashboard holds fetched copies of the order and product lists.
//! After the remote API confirms a mutation, the matching entry is patched
//! locally instead of refetching the whole list. Every function here is an
//! immutable transform: identity match by identifier, replace exactly one
//! entry, leave the rest untouched. Nothing is applied before server
//! confirmation.

use crate::order::Order;
use crate::product::Product;
use crate::types::{OrderId, OrderStatus, ProductId};

/// Set the status of the order with `id`, leaving all other orders unchanged.
///
/// An identifier not present in the list yields an unchanged copy.
#[must_use]
pub fn with_order_status(orders: &[Order], id: OrderId, status: OrderStatus) -> Vec<Order> {
    orders
        .iter()
        .map(|order| {
            if order.id == id {
                Order {
                    status,
                    ..order.clone()
                }
            } else {
                order.clone()
            }
        })
        .collect()
}

/// Replace the product sharing `updated`'s identifier with the server's copy.
#[must_use]
pub fn with_product_replaced(products: &[Product], updated: &Product) -> Vec<Product> {
    products
        .iter()
        .map(|product| {
            if product.id == updated.id {
                updated.clone()
            } else {
                product.clone()
            }
        })
        .collect()
}

/// Append a newly created product to the list.
#[must_use]
pub fn with_product_appended(mut products: Vec<Product>, created: Product) -> Vec<Product> {
    products.push(created);
    products
}

/// Drop the product with `id` from the list.
#[must_use]
pub fn without_product(products: &[Product], id: ProductId) -> Vec<Product> {
    products
        .iter()
        .filter(|product| product.id != id)
        .cloned()
        .collect()
}
