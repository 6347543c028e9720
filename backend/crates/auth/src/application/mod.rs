//! Application Layer
//!
//! Use cases built on top of the token policies.

pub mod config;
pub mod confirm_email;
pub mod request_password_reset;
pub mod request_verification;
pub mod reset_password;

// Re-exports
pub use config::AuthConfig;
pub use confirm_email::ConfirmEmailUseCase;
pub use request_password_reset::RequestPasswordResetUseCase;
pub use request_verification::RequestVerificationUseCase;
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
