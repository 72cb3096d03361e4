//! Data Transfer Objects - request types for the API that are not owned by
//! the domain.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// `?page=&limit=` on the user listing.
///
/// Values are kept as raw strings so that a bad value falls back to the
/// default instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    /// Requested page, 1 when absent, non-numeric or below 1.
    pub fn page(&self) -> u64 {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    /// Requested page size, 10 when absent, non-numeric or below 1.
    pub fn limit(&self) -> u64 {
        parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok().filter(|n| *n >= 1)
}
