//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{token::StoredToken, user::User};
use crate::domain::value_object::{
    email::Email, token_kind::TokenKind, token_value::TokenValue, user_id::UserId,
};
use crate::error::AuthResult;

/// User directory
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user. The email must not be taken.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist changed fields of an existing user
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Token storage primitives
///
/// Two disjoint groups, one per storage strategy. `TokenPolicy` only ever
/// calls the group matching its configured strategy.
///
/// Implementations must:
/// - keep token values unique per kind
/// - return expired rows from lookups untouched; the caller decides
///   liveness
/// - not return until the change is applied or has failed
#[trait_variant::make(TokenStorage: Send)]
pub trait LocalTokenStorage {
    // ------------------------------------------------------------------
    // Separate-table mode
    // ------------------------------------------------------------------

    /// Delete every token of `kind` owned by `user_id`. No-op when none exist.
    async fn delete_tokens_for_user(&self, kind: TokenKind, user_id: &UserId) -> AuthResult<()>;

    async fn insert_token(
        &self,
        kind: TokenKind,
        token: &TokenValue,
        user_id: &UserId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()>;

    async fn find_token(&self, kind: TokenKind, token: &TokenValue)
    -> AuthResult<Option<StoredToken>>;

    // ------------------------------------------------------------------
    // Inline mode
    // ------------------------------------------------------------------

    /// Overwrite the token and expiry columns on the user row
    async fn update_inline_token(
        &self,
        kind: TokenKind,
        user_id: &UserId,
        token: &TokenValue,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()>;

    async fn find_inline_token(
        &self,
        kind: TokenKind,
        token: &TokenValue,
    ) -> AuthResult<Option<StoredToken>>;

    /// Null out the token and expiry columns. No-op when already empty.
    async fn clear_inline_token(&self, kind: TokenKind, user_id: &UserId) -> AuthResult<()>;
}
