//! User Entity
//!
//! Identity record owned by the user directory. The token subsystem reads
//! users to hydrate token matches and never deletes them.

use chrono::{DateTime, Utc};
use platform::password::StoredPasswordHash;

use crate::domain::value_object::{email::Email, user_id::UserId};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, normalized
    pub email: Email,
    pub email_verified: bool,
    /// Argon2id PHC string; `None` for accounts without a password yet
    pub password_hash: Option<String>,
    /// Subscription tier name, if any
    pub tier: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, unverified user
    pub fn new(email: Email) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email,
            email_verified: false,
            password_hash: None,
            tier: None,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    pub fn set_password_hash(&mut self, hash: StoredPasswordHash) {
        self.password_hash = Some(hash.into_phc_string());
        self.updated_at = Utc::now();
    }

    pub fn set_tier(&mut self, tier: Option<String>) {
        self.tier = tier;
        self.updated_at = Utc::now();
    }

    /// Parsed password hash, if one is stored and well-formed
    pub fn stored_password_hash(&self) -> Option<StoredPasswordHash> {
        self.password_hash
            .as_deref()
            .and_then(|phc| StoredPasswordHash::from_phc_string(phc).ok())
    }
}
