//! One-shot flash notices.
//!
//! Transient, dismissible messages surviving exactly one redirect: stored in
//! the session, removed on first read. Same-request notices skip the session
//! and go straight into the template.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// A transient user-visible notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

/// Visual flavour of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

impl Flash {
    /// A success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    /// A failure notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// CSS class for rendering the notice.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "notice-success",
            FlashKind::Error => "notice-error",
        }
    }
}

/// Store a flash notice for the next rendered page.
pub async fn set_flash(session: &Session, flash: Flash) {
    if let Err(e) = session.insert(session_keys::FLASH, flash).await {
        tracing::warn!("Failed to store flash notice: {e}");
    }
}

/// Take the pending flash notice, if any, clearing it from the session.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    match session.remove::<Flash>(session_keys::FLASH).await {
        Ok(flash) => flash,
        Err(e) => {
            tracing::warn!("Failed to read flash notice: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_constructors() {
        let flash = Flash::success("Order status updated!");
        assert_eq!(flash.kind, FlashKind::Success);
        assert_eq!(flash.message, "Order status updated!");

        let flash = Flash::error("Failed to fetch data");
        assert_eq!(flash.kind, FlashKind::Error);
    }

    #[test]
    fn test_css_class_per_kind() {
        assert_eq!(Flash::success("x").css_class(), "notice-success");
        assert_eq!(Flash::error("x").css_class(), "notice-error");
    }
}
