//! Pagination types
//!
//! Two flavours are in use:
//! - [`PageWindow`] slices an already-loaded, ordered list and produces
//!   previous/next links for the home page.
//! - [`Pagination`] / [`Paginated`] push LIMIT/OFFSET into SQL for the
//!   `/posts` listing.

use serde::{Deserialize, Serialize};

/// Navigation link to a neighbouring page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavToken {
    /// No page in this direction; rendered as `#`
    Disabled,
    Page(u32),
}

impl NavToken {
    /// Render as a link relative to `base` (e.g. `/` gives `/?page=2`).
    pub fn href(&self, base: &str) -> String {
        match self {
            Self::Disabled => "#".to_string(),
            Self::Page(n) => format!("{}?page={}", base, n),
        }
    }
}

/// One page of an in-memory ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Requested page (1-indexed, clamped to at least 1)
    pub page: u32,
    /// ceil(total / per_page); zero for an empty sequence
    pub last_page: u32,
    pub start: usize,
    pub end: usize,
    pub prev: NavToken,
    pub next: NavToken,
}

impl PageWindow {
    /// Compute the window for `page` over `total` items.
    ///
    /// Page 1 never has a previous link and always links forward, even when
    /// it is the only page. `per_page` must be non-zero.
    pub fn compute(total: usize, per_page: u32, page: u32) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let last_page = total.div_ceil(per_page as usize) as u32;

        let (prev, next) = if page == 1 {
            (NavToken::Disabled, NavToken::Page(page + 1))
        } else if page == last_page {
            (NavToken::Page(page - 1), NavToken::Disabled)
        } else {
            (NavToken::Page(page - 1), NavToken::Page(page.saturating_add(1)))
        };

        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let end = start.saturating_add(per_page as usize);

        Self {
            page,
            last_page,
            start,
            end,
            prev,
            next,
        }
    }

    /// Items of `items` that fall in this window; empty past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.min(items.len());
        let end = self.end.min(items.len());
        &items[start..end]
    }
}

/// LIMIT/OFFSET parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination; page and per_page are clamped to at least 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

/// Paginated query result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Calculate total number of pages.
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            1
        } else {
            (self.total as u64).div_ceil(self.per_page as u64).max(1) as u32
        }
    }

    /// Check if there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn next_num(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn prev_num(&self) -> Option<u32> {
        self.has_prev().then(|| self.page - 1)
    }
}

/// `?page=` query parameter.
///
/// Kept as a string so that junk like `?page=abc` falls back to page 1
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
}

impl PaginationParams {
    pub fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1)
    }
}
