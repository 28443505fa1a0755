//! Slices an ordered sequence into fixed-size pages and computes the page
//! window, the bounded row of page-number buttons shown under a listing.

use serde::Deserialize;

/// The most page-number buttons [`page_window`] will return.
pub const WINDOW_SIZE: usize = 5;

/// The number of items per page. Never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Creates a page size, clamping zero to one.
    pub fn new(size: usize) -> PageSize {
        PageSize(size.max(1))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl std::convert::TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        match size {
            0 => Err(String::from("page size must be at least 1")),
            size => Ok(PageSize(size)),
        }
    }
}

/// One page of a paginated sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// The items on this page. At most `page_size` of them.
    pub items: Vec<T>,

    /// The number of items across all pages.
    pub total_count: usize,

    /// Always at least 1, even when there are no items.
    pub total_pages: usize,

    /// The 1-based page number, clamped into `[1, total_pages]`.
    pub page_number: usize,

    pub page_size: PageSize,
}

impl<T> Page<T> {
    /// Whether a "Previous" control should be enabled.
    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    /// Whether a "Next" control should be enabled.
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// The page a "Previous" control leads to, clamped at the first page.
    pub fn prev_page(&self) -> usize {
        self.page_number.saturating_sub(1).max(1)
    }

    /// The page a "Next" control leads to, clamped at the last page.
    pub fn next_page(&self) -> usize {
        (self.page_number + 1).min(self.total_pages)
    }

    /// The page-number buttons to display for this page.
    pub fn window(&self) -> Vec<usize> {
        page_window(self.total_pages, self.page_number)
    }
}

/// Returns the number of pages needed for `total_count` items, which is at
/// least 1.
pub fn total_pages(total_count: usize, page_size: PageSize) -> usize {
    let size = page_size.get();
    match total_count % size {
        0 => (total_count / size).max(1),
        _ => total_count / size + 1,
    }
}

/// Clamps `page_number` into `[1, total_pages]`.
pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.max(1).min(total_pages.max(1))
}

/// Takes the page numbered `page_number` (1-based, clamped) out of `items`.
pub fn paginate<T>(items: Vec<T>, page_number: usize, page_size: PageSize) -> Page<T> {
    let total_count = items.len();
    let total_pages = total_pages(total_count, page_size);
    let page_number = clamp_page(page_number, total_pages);
    let start = (page_number - 1) * page_size.get();
    let items = items
        .into_iter()
        .skip(start)
        .take(page_size.get())
        .collect();
    Page {
        items,
        total_count,
        total_pages,
        page_number,
        page_size,
    }
}

/// Computes the page-number buttons to show: at most [`WINDOW_SIZE`]
/// consecutive page numbers, always containing `current_page`, kept centered
/// on it except near either end.
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let current_page = clamp_page(current_page, total_pages);
    let half = WINDOW_SIZE / 2;
    let first = if total_pages <= WINDOW_SIZE || current_page <= half + 1 {
        1
    } else if current_page >= total_pages - half {
        total_pages - (WINDOW_SIZE - 1)
    } else {
        current_page - half
    };
    let last = (first + WINDOW_SIZE - 1).min(total_pages);
    (first..=last).collect()
}
