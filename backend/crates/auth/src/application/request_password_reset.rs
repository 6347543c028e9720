//! Request Password Reset Use Case
//!
//! Issues a reset token for the account behind an email address. Unknown
//! addresses yield `Ok(None)` so callers can answer identically either way.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::{AuthConfig, expiry_after};
use crate::domain::entity::token::IssuedToken;
use crate::domain::repository::{TokenStorage, UserRepository};
use crate::domain::token_policy::AccountTokens;
use crate::domain::value_object::{email::Email, token_value::TokenValue};
use crate::error::{AuthError, AuthResult};

pub struct RequestPasswordResetUseCase<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    tokens: AccountTokens<S, U>,
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<S, U> RequestPasswordResetUseCase<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    pub fn new(tokens: AccountTokens<S, U>, user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            tokens,
            user_repo,
            config,
        }
    }

    pub async fn execute(&self, email: &str) -> AuthResult<Option<IssuedToken>> {
        let email = Email::new(email).map_err(|e| AuthError::InvalidEmail(e.message().to_string()))?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(None);
        };

        let token = TokenValue::generate(self.config.token_bytes_len);
        let expires_at = expiry_after(Utc::now(), self.config.password_reset_ttl());

        self.tokens
            .password_reset
            .set(&user.user_id, &token, expires_at)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            expires_at = %expires_at,
            "Password reset token issued"
        );

        Ok(Some(IssuedToken { token, expires_at }))
    }
}
