//! Request Verification Use Case
//!
//! Issues (or reissues) the email verification token for a user. The
//! caller is responsible for delivering the token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::{AuthConfig, expiry_after};
use crate::domain::entity::token::IssuedToken;
use crate::domain::repository::{TokenStorage, UserRepository};
use crate::domain::token_policy::AccountTokens;
use crate::domain::value_object::{token_value::TokenValue, user_id::UserId};
use crate::error::{AuthError, AuthResult};

pub struct RequestVerificationUseCase<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    tokens: AccountTokens<S, U>,
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<S, U> RequestVerificationUseCase<S, U>
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

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<IssuedToken> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.email_verified {
            return Err(AuthError::EmailAlreadyVerified);
        }

        let token = TokenValue::generate(self.config.token_bytes_len);
        let expires_at = expiry_after(Utc::now(), self.config.verification_ttl());

        self.tokens
            .verification
            .set(&user.user_id, &token, expires_at)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            expires_at = %expires_at,
            "Verification token issued"
        );

        Ok(IssuedToken { token, expires_at })
    }
}
