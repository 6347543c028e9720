//! Token Entities

use chrono::{DateTime, Utc};

use crate::domain::value_object::{token_value::TokenValue, user_id::UserId};

/// What a storage lookup yields for a token value.
///
/// `expires_at` is optional because inline expiry columns are nullable;
/// a missing expiry never counts as live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    pub user_id: UserId,
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn new(user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            expires_at: Some(expires_at),
        }
    }

    /// Live iff an expiry is present and strictly after `now`
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now < expires_at)
    }
}

/// A freshly issued token, returned to the caller for delivery
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: TokenValue,
    pub expires_at: DateTime<Utc>,
}
