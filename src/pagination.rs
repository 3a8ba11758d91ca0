//! Common functionality for paging API responses.
//!
//! Every listing endpoint accepts `page` and `limit` query parameters and
//! responds with a `{ data, pagination }` envelope. Handlers slice their own
//! collections with [take_page]; [Paginated::new] only attaches the
//! bookkeeping.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    config::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, MIN_LIMIT},
};

/// The page window requested by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    /// The 1-based page number.
    #[serde(default = "default_page")]
    pub page: u64,
    /// The number of records per page.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PaginationParams {
    /// Check the window against the accepted page and limit ranges.
    pub fn validated(self) -> Result<Self, Error> {
        if self.page < 1 {
            return Err(Error::InvalidPagination(format!(
                "page must be at least 1, got {}",
                self.page
            )));
        }

        if self.limit < MIN_LIMIT || self.limit > MAX_LIMIT {
            return Err(Error::InvalidPagination(format!(
                "limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }

        Ok(self)
    }
}

/// Where a page sits within the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// The requested page number.
    pub page: u64,
    /// The requested page size.
    pub limit: u64,
    /// How many records matched in total.
    pub total_count: u64,
    /// How many pages the collection spans at this limit.
    pub total_pages: u64,
    /// Whether a page exists after this one.
    pub has_next_page: bool,
}

/// One page of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    /// The records within the requested window.
    pub data: Vec<T>,
    /// Where the window sits within the full collection.
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    /// Wrap an already-sliced page of records with metadata describing the
    /// full collection.
    ///
    /// `params` must have been validated, a zero limit is a logic error.
    pub fn new(data: Vec<T>, params: PaginationParams, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(params.limit);

        Self {
            data,
            pagination: PaginationMeta {
                page: params.page,
                limit: params.limit,
                total_count,
                total_pages,
                has_next_page: params.page < total_pages,
            },
        }
    }
}

/// Extract the requested window from a full, already-sorted collection.
pub fn take_page<T>(items: Vec<T>, params: PaginationParams) -> Vec<T> {
    let offset = params.page.saturating_sub(1).saturating_mul(params.limit);

    items
        .into_iter()
        .skip(offset as usize)
        .take(params.limit as usize)
        .collect()
}
