//! Middleware, extractors, and session plumbing.

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{RequireAdmin, clear_admin_session, set_admin_session};
pub use flash::{Flash, set_flash, take_flash};
pub use session::create_session_layer;
