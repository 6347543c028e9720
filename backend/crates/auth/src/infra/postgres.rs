//! PostgreSQL Repository Implementations
//!
//! Schema lives in `database/migrations`. Table and column names are
//! picked per token kind from a fixed set (see [`TokenKind`]), never from
//! user input.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{token::StoredToken, user::User};
use crate::domain::repository::{TokenStorage, UserRepository};
use crate::domain::value_object::{
    email::Email, storage_strategy::StorageStrategy, token_kind::TokenKind,
    token_value::TokenValue, user_id::UserId,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed users + tokens
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove tokens of `kind` that expired before now.
    ///
    /// Separate tables lose the rows; inline mode nulls the columns.
    /// Lookups never do this themselves.
    pub async fn purge_expired(&self, strategy: StorageStrategy, kind: TokenKind) -> AuthResult<u64> {
        let now = Utc::now();

        let sql = match strategy {
            StorageStrategy::SeparateTables => {
                format!("DELETE FROM {} WHERE expires_at <= $1", kind.table_name())
            }
            StorageStrategy::Inline => format!(
                "UPDATE users SET {token} = NULL, {exp} = NULL, updated_at = $1 WHERE {exp} <= $1",
                token = kind.inline_token_column(),
                exp = kind.inline_expiry_column(),
            ),
        };

        let purged = sqlx::query(&sql)
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(kind = %kind, strategy = ?strategy, purged, "Purged expired tokens");

        Ok(purged)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    email_verified,
    password_hash,
    tier,
    is_admin,
    created_at,
    updated_at
"#;

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                email_verified,
                password_hash,
                tier,
                is_admin,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.email_verified)
        .bind(&user.password_hash)
        .bind(&user.tier)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AuthError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                email_verified = $3,
                password_hash = $4,
                tier = $5,
                is_admin = $6,
                updated_at = $7
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.email_verified)
        .bind(&user.password_hash)
        .bind(&user.tier)
        .bind(user.is_admin)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Token Storage Implementation
// ============================================================================

impl TokenStorage for PgAuthRepository {
    async fn delete_tokens_for_user(&self, kind: TokenKind, user_id: &UserId) -> AuthResult<()> {
        let sql = format!("DELETE FROM {} WHERE user_id = $1", kind.table_name());
        sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_token(
        &self,
        kind: TokenKind,
        token: &TokenValue,
        user_id: &UserId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let sql = format!(
            "INSERT INTO {} (token, user_id, expires_at) VALUES ($1, $2, $3)",
            kind.table_name()
        );
        let result = sqlx::query(&sql)
            .bind(token.as_str())
            .bind(user_id.as_uuid())
            .bind(expires_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(map_token_write_error(e)),
        }
    }

    async fn find_token(
        &self,
        kind: TokenKind,
        token: &TokenValue,
    ) -> AuthResult<Option<StoredToken>> {
        let sql = format!(
            "SELECT user_id, expires_at FROM {} WHERE token = $1",
            kind.table_name()
        );
        let row = sqlx::query_as::<_, StoredTokenRow>(&sql)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(StoredTokenRow::into_stored))
    }

    async fn update_inline_token(
        &self,
        kind: TokenKind,
        user_id: &UserId,
        token: &TokenValue,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let sql = format!(
            "UPDATE users SET {} = $2, {} = $3, updated_at = $4 WHERE user_id = $1",
            kind.inline_token_column(),
            kind.inline_expiry_column()
        );
        let affected = sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .bind(token.as_str())
            .bind(expires_at)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(map_token_write_error)?
            .rows_affected();

        if affected == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    async fn find_inline_token(
        &self,
        kind: TokenKind,
        token: &TokenValue,
    ) -> AuthResult<Option<StoredToken>> {
        let sql = format!(
            "SELECT user_id, {} AS expires_at FROM users WHERE {} = $1",
            kind.inline_expiry_column(),
            kind.inline_token_column()
        );
        let row = sqlx::query_as::<_, StoredTokenRow>(&sql)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(StoredTokenRow::into_stored))
    }

    async fn clear_inline_token(&self, kind: TokenKind, user_id: &UserId) -> AuthResult<()> {
        sqlx::query(&clear_inline_sql(kind))
            .bind(user_id.as_uuid())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn clear_inline_sql(kind: TokenKind) -> String {
    format!(
        "UPDATE users SET {} = NULL, {} = NULL, updated_at = $2 WHERE user_id = $1",
        kind.inline_token_column(),
        kind.inline_expiry_column()
    )
}

/// Token value collisions and dangling owners get their domain errors
fn map_token_write_error(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::DuplicateToken,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => AuthError::UserNotFound,
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    email_verified: bool,
    password_hash: Option<String>,
    tier: Option<String>,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            email_verified: self.email_verified,
            password_hash: self.password_hash,
            tier: self.tier,
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StoredTokenRow {
    user_id: Uuid,
    expires_at: Option<DateTime<Utc>>,
}

impl StoredTokenRow {
    fn into_stored(self) -> StoredToken {
        StoredToken {
            user_id: UserId::from_uuid(self.user_id),
            expires_at: self.expires_at,
        }
    }
}
