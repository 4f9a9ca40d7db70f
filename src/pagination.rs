//! Page windows over listing and search results.
//!
//! Pages are zero-based. A requested page is never clamped to the number of
//! pages that exist: asking past the end yields an empty window while the
//! page count still describes the whole result set.

use serde::Deserialize;

/// Number of records shown per page
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Raw `page` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Requested page, falling back to the first page when the parameter is
    /// missing, has no leading digits, or is negative.
    pub fn page_number(&self) -> i64 {
        parse_page(self.page.as_deref())
    }
}

/// Parse a raw page parameter from its leading digits.
///
/// `"2abc"` and `"2.5"` are page 2. A value with no leading digits, a negative
/// value, or one too large for an `i64` is page 0.
pub fn parse_page(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    let text = raw.trim();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse::<i64>().unwrap_or(0)
}

/// LIMIT/OFFSET pair for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = page.max(0);
        let limit = page_size.max(1);
        Self {
            page,
            limit,
            offset: page.saturating_mul(limit),
        }
    }
}

/// One page of records together with what the view needs to draw navigation
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_count: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, window: PageWindow) -> Self {
        Self {
            items,
            total,
            page: window.page,
            page_count: page_count(total, window.limit),
        }
    }
}

/// ceil(total / page_size)
pub fn page_count(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    let size = page_size.max(1);
    (total + size - 1) / size
}
