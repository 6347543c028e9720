//! Confirm Email Use Case
//!
//! Consumes a verification token: marks the owner's email verified and
//! clears the token.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::{TokenStorage, UserRepository};
use crate::domain::token_policy::AccountTokens;
use crate::domain::value_object::token_value::TokenValue;
use crate::error::{AuthError, AuthResult};

pub struct ConfirmEmailUseCase<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    tokens: AccountTokens<S, U>,
    user_repo: Arc<U>,
}

impl<S, U> ConfirmEmailUseCase<S, U>
where
    S: TokenStorage,
    U: UserRepository,
{
    pub fn new(tokens: AccountTokens<S, U>, user_repo: Arc<U>) -> Self {
        Self { tokens, user_repo }
    }

    pub async fn execute(&self, token: &TokenValue) -> AuthResult<User> {
        let mut user = self
            .tokens
            .verification
            .get_user_by_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !user.email_verified {
            user.mark_email_verified();
            self.user_repo.update(&user).await?;
        }

        self.tokens.verification.clear(&user.user_id).await?;

        tracing::info!(user_id = %user.user_id, "Email verified");

        Ok(user)
    }
}
