//! AgroCart Core - Shared types and order logic.
//!
//! This crate provides the types and pure logic shared by the AgroCart web
//! client:
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and order status
//! - [`product`] / [`order`] - Wire types for the remote AgroCart REST API
//! - [`draft`] - The order-placement draft: a dynamic line-item editor with
//!   submit-time validation
//! - [`reconcile`] - Immutable list patches applied to fetched admin lists
//!   after confirmed server mutations
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. All persistence and authorization lives behind the remote API;
//! this crate only models its shapes and the client-side state transitions.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod draft;
pub mod order;
pub mod product;
pub mod reconcile;
pub mod types;

pub use draft::{LineItemDraft, OrderDraft, ValidationErrors};
pub use order::{NewLineItem, NewOrder, Order, OrderLineItem, StatusUpdate};
pub use product::{Product, ProductInput};
pub use types::*;
