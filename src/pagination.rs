//! Page arithmetic for list requests.
//!
//! Callers pass `limit` and `offset`, but the store is addressed by page:
//! `page_number = offset / limit` and `page_size = limit`. An `offset` that
//! is not a multiple of `limit` is rounded down to the start of its page, so
//! `limit=10, offset=25` yields rows 20..30.

use thiserror::Error;

pub const DEFAULT_LIMIT: i32 = 10_000;
pub const DEFAULT_OFFSET: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("limit must be greater than zero, got {0}")]
    NonPositiveLimit(i32),
    #[error("offset must not be negative, got {0}")]
    NegativeOffset(i32),
}

/// A zero-based page of `page_size` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i32,
    page_size: i32,
}

impl PageRequest {
    /// Derive the page containing `offset` for pages of `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns `PageError::NonPositiveLimit` for `limit <= 0` and
    /// `PageError::NegativeOffset` for `offset < 0`.
    pub const fn from_limit_offset(limit: i32, offset: i32) -> Result<Self, PageError> {
        if limit <= 0 {
            return Err(PageError::NonPositiveLimit(limit));
        }
        if offset < 0 {
            return Err(PageError::NegativeOffset(offset));
        }
        Ok(Self {
            page_number: offset / limit,
            page_size: limit,
        })
    }

    #[must_use]
    pub const fn page_number(&self) -> i32 {
        self.page_number
    }

    #[must_use]
    pub const fn page_size(&self) -> i32 {
        self.page_size
    }

    /// Index of the first row on this page.
    #[must_use]
    pub const fn row_offset(&self) -> i64 {
        self.page_number as i64 * self.page_size as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_OFFSET / DEFAULT_LIMIT,
            page_size: DEFAULT_LIMIT,
        }
    }
}
