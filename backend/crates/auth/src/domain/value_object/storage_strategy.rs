//! Token Storage Strategy
//!
//! Chosen once when the token policies are built and never changed
//! afterwards. Both token kinds always use the same strategy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageStrategy {
    /// Tokens live in dedicated tables keyed by token value
    #[default]
    SeparateTables,
    /// The single live token and its expiry are columns on the user row
    Inline,
}

impl StorageStrategy {
    /// Map the classic `separateTokenTables` boolean option
    pub const fn from_separate_token_tables(separate: bool) -> Self {
        if separate {
            StorageStrategy::SeparateTables
        } else {
            StorageStrategy::Inline
        }
    }

    pub const fn uses_separate_tables(&self) -> bool {
        matches!(self, StorageStrategy::SeparateTables)
    }
}

/// Parse a setting such as `TOKEN_STORAGE=inline`
impl FromStr for StorageStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "separate" | "separate_tables" | "tables" | "true" => Ok(StorageStrategy::SeparateTables),
            "inline" | "columns" | "false" => Ok(StorageStrategy::Inline),
            other => Err(format!("unknown token storage strategy: {other}")),
        }
    }
}
