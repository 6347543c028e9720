//! Auth (Account Token) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, token policy
//! - `application/` - Use cases and configuration
//! - `infra/` - Storage backends (PostgreSQL, in-memory)
//!
//! ## Token storage
//! Short-lived single-use tokens (email verification, password reset) are
//! kept either in dedicated tables or as columns on the user row. The
//! strategy is fixed when [`AccountTokens`] is built and applies to both
//! kinds.
//!
//! ## Security Model
//! - At most one live token per user and kind; issuing replaces the old one
//! - Expiry is checked at read time; expired and unknown tokens look the same
//! - Token values never appear in logs or `Debug` output

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::token_policy::{AccountTokens, TokenPolicy};
pub use domain::value_object::{
    storage_strategy::StorageStrategy, token_kind::TokenKind, token_value::TokenValue,
};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}
