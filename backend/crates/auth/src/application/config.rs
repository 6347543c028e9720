//! Application Configuration
//!
//! Configuration for the token use cases.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::value_object::storage_strategy::StorageStrategy;
use crate::error::{AuthError, AuthResult};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Where tokens are persisted; fixed for the lifetime of the process
    pub token_storage: StorageStrategy,
    /// Lifetime of an email verification token (24 hours)
    pub verification_token_ttl: Duration,
    /// Lifetime of a password reset token (1 hour)
    pub password_reset_token_ttl: Duration,
    /// Random bytes per generated token
    pub token_bytes_len: usize,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_storage: StorageStrategy::default(),
            verification_token_ttl: Duration::from_secs(24 * 3600),
            password_reset_token_ttl: Duration::from_secs(3600),
            token_bytes_len: 32,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Short TTLs for local development
    pub fn development() -> Self {
        Self {
            verification_token_ttl: Duration::from_secs(15 * 60),
            password_reset_token_ttl: Duration::from_secs(5 * 60),
            ..Self::default()
        }
    }

    /// Build from environment-style settings, falling back to defaults.
    ///
    /// Recognized keys: `TOKEN_STORAGE` (`separate` | `inline`),
    /// `VERIFICATION_TOKEN_TTL_SECS`, `PASSWORD_RESET_TOKEN_TTL_SECS`,
    /// `PASSWORD_PEPPER`.
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("TOKEN_STORAGE") {
            config.token_storage = raw.parse().map_err(AuthError::Internal)?;
        }
        if let Some(secs) = parse_secs(&lookup, "VERIFICATION_TOKEN_TTL_SECS")? {
            config.verification_token_ttl = secs;
        }
        if let Some(secs) = parse_secs(&lookup, "PASSWORD_RESET_TOKEN_TTL_SECS")? {
            config.password_reset_token_ttl = secs;
        }
        config.password_pepper = lookup("PASSWORD_PEPPER")
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        Ok(config)
    }

    pub fn verification_ttl(&self) -> TimeDelta {
        to_time_delta(self.verification_token_ttl)
    }

    pub fn password_reset_ttl(&self) -> TimeDelta {
        to_time_delta(self.password_reset_token_ttl)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

fn parse_secs<F>(lookup: &F, key: &str) -> AuthResult<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| AuthError::Internal(format!("{key}: {e}")))
        })
        .transpose()
}

/// `now + ttl`, saturating at the latest representable instant
pub fn expiry_after(now: DateTime<Utc>, ttl: TimeDelta) -> DateTime<Utc> {
    now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn to_time_delta(ttl: Duration) -> TimeDelta {
    TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX)
}
