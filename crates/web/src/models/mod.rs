//! Data models for the web client.

pub mod session;

pub use session::{AdminSession, session_keys};
