//! Token Kind
//!
//! Each kind is an independent namespace: a verification token and a
//! password-reset token with the same value never collide, and clearing
//! one kind leaves the other untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Email address verification
    Verification,
    /// Password reset
    PasswordReset,
}

impl TokenKind {
    pub const ALL: [TokenKind; 2] = [TokenKind::Verification, TokenKind::PasswordReset];

    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Verification => "verification",
            TokenKind::PasswordReset => "password_reset",
        }
    }

    /// Dedicated table used in separate-table mode
    pub const fn table_name(&self) -> &'static str {
        match self {
            TokenKind::Verification => "verification_tokens",
            TokenKind::PasswordReset => "password_reset_tokens",
        }
    }

    /// Token column on `users` used in inline mode
    pub const fn inline_token_column(&self) -> &'static str {
        match self {
            TokenKind::Verification => "verification_token",
            TokenKind::PasswordReset => "password_reset_token",
        }
    }

    /// Expiry column on `users` used in inline mode
    pub const fn inline_expiry_column(&self) -> &'static str {
        match self {
            TokenKind::Verification => "verification_token_expires_at",
            TokenKind::PasswordReset => "password_reset_token_expires_at",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_names_are_disjoint() {
        let v = TokenKind::Verification;
        let r = TokenKind::PasswordReset;
        assert_ne!(v.table_name(), r.table_name());
        assert_ne!(v.inline_token_column(), r.inline_token_column());
        assert_ne!(v.inline_expiry_column(), r.inline_expiry_column());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&TokenKind::PasswordReset).unwrap(),
            r#""password_reset""#
        );
        let kind: TokenKind = serde_json::from_str(r#""verification""#).unwrap();
        assert_eq!(kind, TokenKind::Verification);
    }
}
