//! Domain Layer
//!
//! Entities, value objects, repository traits and the token policy.

pub mod entity;
pub mod repository;
pub mod token_policy;
pub mod value_object;

// Re-exports
pub use entity::{
    token::{IssuedToken, StoredToken},
    user::User,
};
pub use repository::{TokenStorage, UserRepository};
pub use token_policy::{AccountTokens, TokenPolicy};
