//! Reset Password Use Case
//!
//! Consumes a password reset token and stores the new password hash.

use std::sync::Arc;

use platform::password::NewPassword;

use crate::application::config::AuthConfig;
use crate::domain::repository::{TokenStorage, UserRepository};
use crate::domain::token_policy::AccountTokens;
use crate::domain::value_object::{token_value::TokenValue, user_id::UserId};
use crate::error::{AuthError, AuthResult};

pub struct ResetPasswordInput {
    pub token: TokenValue,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    tokens: AccountTokens<S, U>,
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<S, U> ResetPasswordUseCase<S, U>
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

    /// Returns the id of the user whose password changed
    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<UserId> {
        // Validate before touching the token so a weak password does not burn it
        let password = NewPassword::new(input.new_password)?;

        let mut user = self
            .tokens
            .password_reset
            .get_user_by_token(&input.token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let hash = password.hash(self.config.pepper())?;
        user.set_password_hash(hash);
        self.user_repo.update(&user).await?;

        self.tokens.password_reset.clear(&user.user_id).await?;

        tracing::info!(user_id = %user.user_id, "Password reset completed");

        Ok(user.user_id)
    }
}
