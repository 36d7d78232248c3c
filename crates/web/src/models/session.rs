//! Session-related types.
//!
//! Types stored in the session for admin authentication state.

use serde::{Deserialize, Serialize};

/// Session-stored admin credentials.
///
/// Holds only the opaque token issued by the remote API. Its presence gates
/// dashboard access client-side; the API remains the actual authority and
/// staleness is only discovered on the next rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    /// Opaque bearer token from `POST /api/auth/admin/login`.
    pub token: String,
}

/// Session keys for stored state.
pub mod session_keys {
    /// Key for the current admin session.
    pub const ADMIN_SESSION: &str = "admin_session";

    /// Key for the one-shot flash notice.
    pub const FLASH: &str = "flash";
}
