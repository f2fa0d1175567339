use serde::Serialize;

/// Number of consecutive page numbers shown around the current page.
pub const WINDOW_SIZE: usize = 5;

/// Page size of the storefront and dashboard card grids.
pub const GRID_PAGE_SIZE: usize = 6;
/// Page size of the dashboard tables.
pub const TABLE_PAGE_SIZE: usize = 10;

/// Compact page list: up to [`WINDOW_SIZE`] pages centred on the current
/// one, with the first and last page always reachable. `None` marks an
/// ellipsis.
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let mut start = current_page.saturating_sub(WINDOW_SIZE / 2).max(1);
    let end = (start + WINDOW_SIZE - 1).min(total_pages);
    start = (end + 1).saturating_sub(WINDOW_SIZE).max(1);

    let mut pages = Vec::with_capacity(WINDOW_SIZE + 4);

    if start > 1 {
        pages.push(Some(1));
        if start > 2 {
            pages.push(None);
        }
    }

    pages.extend((start..=end).map(Some));

    if end < total_pages {
        if end < total_pages - 1 {
            pages.push(None);
        }
        pages.push(Some(total_pages));
    }

    pages
}

/// Slices filtered sequences into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub const fn new(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(len / page_size)`, zero for an empty sequence.
    pub const fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Elements at `[(page - 1) * size, page * size)` clamped to the
    /// sequence. An out-of-range page yields an empty slice; callers clamp
    /// the page first.
    pub fn page_slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let page = page.max(1);
        let start = ((page - 1).saturating_mul(self.page_size)).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize, total_items: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = page_window(total_pages, current_page);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            total_items,
            has_previous: current_page > 1,
            has_next: total_pages > 0 && current_page < total_pages,
        }
    }

    /// Page controls are shown only when there is something to page through.
    pub fn show_controls(&self) -> bool {
        self.total_pages > 0
    }
}
