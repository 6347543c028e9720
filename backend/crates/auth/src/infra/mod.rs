//! Infrastructure Layer
//!
//! Storage backends for users and tokens.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAuthRepository;
pub use postgres::PgAuthRepository;
