//! Shared type definitions.
//!
//! These types are used by both the public storefront views and the admin
//! dashboard, so they live in the core crate.

mod id;
mod price;
mod status;

pub use price::Price;
pub use status::{OrderStatus, ParseStatusError};

crate::define_id!(ProductId);
crate::define_id!(OrderId);
