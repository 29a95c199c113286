use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 1000;

/// Pagination parameters for list operations.
#[derive(Debug, Deserialize, Serialize, IntoParams)]
pub struct PaginationParams {
    /// Maximum number of rows to return (default 100, bounded [1, 1000])
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Number of rows to skip (default 0)
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl PaginationParams {
    /// Limit clamped into [1, 1000]; offset passes through.
    pub fn clamped(&self) -> (u64, u64) {
        (self.limit.clamp(1, MAX_LIMIT), self.offset)
    }
}
