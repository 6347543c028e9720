//! In-Memory Repository Implementation
//!
//! Single-process backend with the same observable semantics as the
//! PostgreSQL one: unique token values per kind, a user must exist before
//! a token can point at it, and lookups return expired rows untouched.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::{token::StoredToken, user::User};
use crate::domain::repository::{TokenStorage, UserRepository};
use crate::domain::value_object::{
    email::Email, storage_strategy::StorageStrategy, token_kind::TokenKind,
    token_value::TokenValue, user_id::UserId,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
struct TokenRow {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct InlineToken {
    token: TokenValue,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    /// Separate-table rows keyed by (kind, token value)
    tokens: HashMap<(TokenKind, TokenValue), TokenRow>,
    /// Inline columns keyed by (kind, owner)
    inline: HashMap<(TokenKind, UserId), InlineToken>,
}

/// In-memory users + tokens
#[derive(Debug, Default)]
pub struct MemoryAuthRepository {
    state: RwLock<MemoryState>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored separate-table rows of `kind`, expired ones included
    pub async fn token_count(&self, kind: TokenKind) -> usize {
        let state = self.state.read().await;
        state.tokens.keys().filter(|(k, _)| *k == kind).count()
    }

    /// Whether the user row currently carries an inline token of `kind`
    pub async fn has_inline_token(&self, kind: TokenKind, user_id: &UserId) -> bool {
        let state = self.state.read().await;
        state.inline.contains_key(&(kind, *user_id))
    }

    /// Drop tokens of `kind` that expired at or before `now`
    pub async fn purge_expired(
        &self,
        strategy: StorageStrategy,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> u64 {
        let mut state = self.state.write().await;
        let before;
        let after;
        match strategy {
            StorageStrategy::SeparateTables => {
                before = state.tokens.len();
                state
                    .tokens
                    .retain(|(k, _), row| *k != kind || row.expires_at > now);
                after = state.tokens.len();
            }
            StorageStrategy::Inline => {
                before = state.inline.len();
                state
                    .inline
                    .retain(|(k, _), col| *k != kind || col.expires_at > now);
                after = state.inline.len();
            }
        }

        let purged = (before - after) as u64;
        tracing::info!(kind = %kind, purged, "Purged expired tokens");
        purged
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        state.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.state.read().await.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut state = self.state.write().await;
        if state
            .users
            .values()
            .any(|u| u.user_id != user.user_id && u.email == user.email)
        {
            return Err(AuthError::EmailTaken);
        }
        match state.users.get_mut(&user.user_id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }
}

// ============================================================================
// Token Storage Implementation
// ============================================================================

impl TokenStorage for MemoryAuthRepository {
    async fn delete_tokens_for_user(&self, kind: TokenKind, user_id: &UserId) -> AuthResult<()> {
        let mut state = self.state.write().await;
        state
            .tokens
            .retain(|(k, _), row| *k != kind || row.user_id != *user_id);
        Ok(())
    }

    async fn insert_token(
        &self,
        kind: TokenKind,
        token: &TokenValue,
        user_id: &UserId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(user_id) {
            return Err(AuthError::UserNotFound);
        }
        let key = (kind, token.clone());
        if state.tokens.contains_key(&key) {
            return Err(AuthError::DuplicateToken);
        }
        state.tokens.insert(
            key,
            TokenRow {
                user_id: *user_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn find_token(
        &self,
        kind: TokenKind,
        token: &TokenValue,
    ) -> AuthResult<Option<StoredToken>> {
        let state = self.state.read().await;
        Ok(state
            .tokens
            .get(&(kind, token.clone()))
            .map(|row| StoredToken::new(row.user_id, row.expires_at)))
    }

    async fn update_inline_token(
        &self,
        kind: TokenKind,
        user_id: &UserId,
        token: &TokenValue,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(user_id) {
            return Err(AuthError::UserNotFound);
        }
        let taken = state
            .inline
            .iter()
            .any(|((k, owner), col)| *k == kind && owner != user_id && col.token == *token);
        if taken {
            return Err(AuthError::DuplicateToken);
        }
        state.inline.insert(
            (kind, *user_id),
            InlineToken {
                token: token.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn find_inline_token(
        &self,
        kind: TokenKind,
        token: &TokenValue,
    ) -> AuthResult<Option<StoredToken>> {
        let state = self.state.read().await;
        Ok(state
            .inline
            .iter()
            .find(|((k, _), col)| *k == kind && col.token == *token)
            .map(|((_, owner), col)| StoredToken::new(*owner, col.expires_at)))
    }

    async fn clear_inline_token(&self, kind: TokenKind, user_id: &UserId) -> AuthResult<()> {
        self.state.write().await.inline.remove(&(kind, *user_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn repo_with_user() -> (MemoryAuthRepository, User) {
        let repo = MemoryAuthRepository::new();
        let user = User::new(Email::new("member@example.com").unwrap());
        repo.create(&user).await.unwrap();
        (repo, user)
    }

    #[tokio::test]
    async fn test_create_rejects_taken_email() {
        let (repo, _) = repo_with_user().await;
        let twin = User::new(Email::new("MEMBER@example.com").unwrap());
        assert!(matches!(
            repo.create(&twin).await,
            Err(AuthError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let repo = MemoryAuthRepository::new();
        let ghost = User::new(Email::new("ghost@example.com").unwrap());
        assert!(matches!(
            repo.update(&ghost).await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_insert_requires_existing_user() {
        let repo = MemoryAuthRepository::new();
        let result = repo
            .insert_token(
                TokenKind::Verification,
                &TokenValue::from("tok"),
                &UserId::new(),
                Utc::now(),
            )
            .await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_token_values_unique_per_kind_only() {
        let (repo, user) = repo_with_user().await;
        let token = TokenValue::from("shared-value");
        let exp = Utc::now() + Duration::hours(1);

        repo.insert_token(TokenKind::Verification, &token, &user.user_id, exp)
            .await
            .unwrap();
        assert!(matches!(
            repo.insert_token(TokenKind::Verification, &token, &user.user_id, exp)
                .await,
            Err(AuthError::DuplicateToken)
        ));
        repo.insert_token(TokenKind::PasswordReset, &token, &user.user_id, exp)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_returns_expired_rows() {
        let (repo, user) = repo_with_user().await;
        let token = TokenValue::from("old");
        let exp = Utc::now() - Duration::days(1);
        repo.insert_token(TokenKind::Verification, &token, &user.user_id, exp)
            .await
            .unwrap();

        let found = repo
            .find_token(TokenKind::Verification, &token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.expires_at, Some(exp));
        assert_eq!(repo.token_count(TokenKind::Verification).await, 1);
    }

    #[tokio::test]
    async fn test_inline_duplicate_across_users() {
        let (repo, alice) = repo_with_user().await;
        let bob = User::new(Email::new("bob@example.com").unwrap());
        repo.create(&bob).await.unwrap();
        let token = TokenValue::from("same");
        let exp = Utc::now() + Duration::hours(1);

        repo.update_inline_token(TokenKind::PasswordReset, &alice.user_id, &token, exp)
            .await
            .unwrap();
        // Re-setting the same value on the same user is an overwrite
        repo.update_inline_token(TokenKind::PasswordReset, &alice.user_id, &token, exp)
            .await
            .unwrap();
        assert!(matches!(
            repo.update_inline_token(TokenKind::PasswordReset, &bob.user_id, &token, exp)
                .await,
            Err(AuthError::DuplicateToken)
        ));
    }

    #[tokio::test]
    async fn test_purge_expired_separate_tables() {
        let (repo, user) = repo_with_user().await;
        let now = Utc::now();
        repo.insert_token(
            TokenKind::Verification,
            &TokenValue::from("stale"),
            &user.user_id,
            now - Duration::minutes(5),
        )
        .await
        .unwrap();
        repo.insert_token(
            TokenKind::Verification,
            &TokenValue::from("fresh"),
            &user.user_id,
            now + Duration::minutes(5),
        )
        .await
        .unwrap();
        repo.insert_token(
            TokenKind::PasswordReset,
            &TokenValue::from("stale-reset"),
            &user.user_id,
            now - Duration::minutes(5),
        )
        .await
        .unwrap();

        let purged = repo
            .purge_expired(StorageStrategy::SeparateTables, TokenKind::Verification, now)
            .await;
        assert_eq!(purged, 1);
        assert_eq!(repo.token_count(TokenKind::Verification).await, 1);
        assert_eq!(repo.token_count(TokenKind::PasswordReset).await, 1);
    }

    #[tokio::test]
    async fn test_purge_expired_inline() {
        let (repo, user) = repo_with_user().await;
        let now = Utc::now();
        repo.update_inline_token(
            TokenKind::Verification,
            &user.user_id,
            &TokenValue::from("stale"),
            now - Duration::seconds(1),
        )
        .await
        .unwrap();

        let purged = repo
            .purge_expired(StorageStrategy::Inline, TokenKind::Verification, now)
            .await;
        assert_eq!(purged, 1);
        assert!(
            !repo
                .has_inline_token(TokenKind::Verification, &user.user_id)
                .await
        );
    }
}
