//! Value Object Module

pub mod email;
pub mod storage_strategy;
pub mod token_kind;
pub mod token_value;
pub mod user_id;
