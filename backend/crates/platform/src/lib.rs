//! Platform Crate - Technical Infrastructure
//!
//! Domain-free building blocks:
//! - Secure random token generation, SHA-256, constant-time comparison
//! - Password hashing (Argon2id, NIST SP 800-63B length rules)

pub mod crypto;
pub mod password;
