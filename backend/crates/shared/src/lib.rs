//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - [`error::kind::ErrorKind`] and [`error::app_error::AppError`]
//! - Typed identifiers ([`id::Id`])
//!
//! Only things whose meaning does not change between domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
