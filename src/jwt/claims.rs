//! Decoded token claims.

use chrono::{DateTime, Utc};

/// Claims extracted from a verified token. Derived transiently from the
/// token string, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject user id
    pub user_id: String,
    /// When the token was issued
    pub issued_at: DateTime<Utc>,
    /// When the token stops being valid
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Whether the expiry timestamp is in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
