//! Token Policy
//!
//! Uniform lifecycle (`set` / `get_user_by_token` / `clear`) for one token
//! kind, independent of where tokens physically live.
//!
//! ## Storage strategies
//! - `SeparateTables`: `set` deletes every existing token of the kind for
//!   the user and only then inserts the new row.
//! - `Inline`: `set` overwrites the token/expiry columns on the user row.
//!
//! ## Lookup
//! Expiry is a read-time filter. An expired token is reported exactly like
//! an unknown one (`Ok(None)`) and is left in storage; only `clear` or a
//! reissue removes it.
//!
//! ## Concurrency
//! The policy holds no mutable state. The separate-table delete + insert
//! is two storage calls with no transaction around them, so concurrent
//! `set`s for the same user and kind race at the storage layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::user::User;
use crate::domain::repository::{TokenStorage, UserRepository};
use crate::domain::value_object::{
    storage_strategy::StorageStrategy, token_kind::TokenKind, token_value::TokenValue,
    user_id::UserId,
};
use crate::error::AuthResult;

/// Lifecycle of one token kind
pub struct TokenPolicy<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    kind: TokenKind,
    strategy: StorageStrategy,
    storage: Arc<S>,
    users: Arc<U>,
}

impl<S, U> Clone for TokenPolicy<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            strategy: self.strategy,
            storage: Arc::clone(&self.storage),
            users: Arc::clone(&self.users),
        }
    }
}

impl<S, U> TokenPolicy<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    pub fn new(kind: TokenKind, strategy: StorageStrategy, storage: Arc<S>, users: Arc<U>) -> Self {
        Self {
            kind,
            strategy,
            storage,
            users,
        }
    }

    pub fn verification(strategy: StorageStrategy, storage: Arc<S>, users: Arc<U>) -> Self {
        Self::new(TokenKind::Verification, strategy, storage, users)
    }

    pub fn password_reset(strategy: StorageStrategy, storage: Arc<S>, users: Arc<U>) -> Self {
        Self::new(TokenKind::PasswordReset, strategy, storage, users)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn strategy(&self) -> StorageStrategy {
        self.strategy
    }

    /// Make `token` the single live token of this kind for `user_id`.
    ///
    /// `expires_at` is not validated; a past expiry stores a token that no
    /// lookup will ever return. Storage failures (unknown user, duplicate
    /// value, connectivity) are returned as-is.
    pub async fn set(
        &self,
        user_id: &UserId,
        token: &TokenValue,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        match self.strategy {
            StorageStrategy::SeparateTables => {
                // Delete must complete before the insert starts
                self.storage
                    .delete_tokens_for_user(self.kind, user_id)
                    .await?;
                self.storage
                    .insert_token(self.kind, token, user_id, expires_at)
                    .await?;
            }
            StorageStrategy::Inline => {
                self.storage
                    .update_inline_token(self.kind, user_id, token, expires_at)
                    .await?;
            }
        }

        tracing::debug!(
            kind = %self.kind,
            strategy = ?self.strategy,
            user_id = %user_id,
            token_fp = %token.fingerprint(),
            expires_at = %expires_at,
            "Token set"
        );

        Ok(())
    }

    /// Resolve a token to its user, or `None` when unknown or expired
    pub async fn get_user_by_token(&self, token: &TokenValue) -> AuthResult<Option<User>> {
        self.get_user_by_token_at(token, Utc::now()).await
    }

    /// Same as [`Self::get_user_by_token`] with an explicit clock
    pub async fn get_user_by_token_at(
        &self,
        token: &TokenValue,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<User>> {
        let stored = match self.strategy {
            StorageStrategy::SeparateTables => self.storage.find_token(self.kind, token).await?,
            StorageStrategy::Inline => self.storage.find_inline_token(self.kind, token).await?,
        };

        let Some(stored) = stored.filter(|s| s.is_live_at(now)) else {
            tracing::debug!(
                kind = %self.kind,
                token_fp = %token.fingerprint(),
                "Token not found or expired"
            );
            return Ok(None);
        };

        let user = self.users.find_by_id(&stored.user_id).await?;
        if user.is_none() {
            tracing::warn!(
                kind = %self.kind,
                user_id = %stored.user_id,
                "Token references a missing user"
            );
        }

        Ok(user)
    }

    /// Remove the token of this kind for `user_id`, if any
    pub async fn clear(&self, user_id: &UserId) -> AuthResult<()> {
        match self.strategy {
            StorageStrategy::SeparateTables => {
                self.storage
                    .delete_tokens_for_user(self.kind, user_id)
                    .await?
            }
            StorageStrategy::Inline => self.storage.clear_inline_token(self.kind, user_id).await?,
        }

        tracing::debug!(kind = %self.kind, user_id = %user_id, "Token cleared");

        Ok(())
    }
}

/// Both token policies, built from one strategy so the kinds never mix modes
pub struct AccountTokens<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    pub verification: TokenPolicy<S, U>,
    pub password_reset: TokenPolicy<S, U>,
}

impl<S, U> AccountTokens<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    pub fn new(strategy: StorageStrategy, storage: Arc<S>, users: Arc<U>) -> Self {
        tracing::info!(strategy = ?strategy, "Token storage configured");
        Self {
            verification: TokenPolicy::verification(
                strategy,
                Arc::clone(&storage),
                Arc::clone(&users),
            ),
            password_reset: TokenPolicy::password_reset(strategy, storage, users),
        }
    }

    pub fn strategy(&self) -> StorageStrategy {
        self.verification.strategy()
    }

    pub fn policy(&self, kind: TokenKind) -> &TokenPolicy<S, U> {
        match kind {
            TokenKind::Verification => &self.verification,
            TokenKind::PasswordReset => &self.password_reset,
        }
    }
}

impl<S, U> Clone for AccountTokens<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            verification: self.verification.clone(),
            password_reset: self.password_reset.clone(),
        }
    }
}
