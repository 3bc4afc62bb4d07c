use serde::Serialize;

/// Fixed number of posts per listing page.
pub const PER_PAGE: u64 = 10;

/// Highest page a query addresses. Keeps the row offset within `i64`, the
/// widest offset SQL backends bind.
pub const MAX_PAGE: u64 = i64::MAX as u64 / PER_PAGE;

/// Listing request: a 1-based page number and an optional search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    page: u64,
    search: Option<String>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
        }
    }
}

impl PostQuery {
    /// Build a query; page numbers are clamped to `1..=MAX_PAGE` and an
    /// empty search term means "no filter".
    pub fn new(page: u64, search: Option<String>) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            search: search.filter(|s| !s.is_empty()),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        PER_PAGE
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Zero-based page index, as storage paginators count.
    pub fn page_index(&self) -> u64 {
        self.page - 1
    }

    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        self.page_index() * PER_PAGE
    }
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total_items: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total_items.div_ceil(per_page)
        };
        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn next_page(&self) -> Option<u64> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn prev_page(&self) -> Option<u64> {
        self.has_prev().then(|| self.page - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
