//! Defines [`QuerySession`], which owns the [`Criteria`] for one open listing
//! view and recomputes the visible [`View`] whenever they change.
//!
//! Recomputation always runs the same three steps in order:
//!
//! 1. filter the [`Collection`] with a [`Predicate`] built from the criteria,
//! 2. sort the survivors with the criteria's [`SortKey`],
//! 3. slice out the requested page with [`paginate`].
//!
//! The resulting view is a pure function of the collection and the criteria,
//! so calling [`QuerySession::current_view`] repeatedly without mutating the
//! criteria always returns the same thing.

use crate::criteria::Criteria;
use crate::facet::Facets;
use crate::page::{page_window, paginate, PageSize};
use crate::predicate::Predicate;
use crate::record::{Collection, Record};
use crate::sort::SortKey;
use tracing::debug;

/// What the rendering layer draws for the current criteria.
#[derive(Clone, Debug, PartialEq)]
pub struct View<'c> {
    /// The records on the current page.
    pub items: Vec<&'c Record>,

    /// The number of records matching the criteria, across all pages.
    pub total_count: usize,

    /// At least 1.
    pub total_pages: usize,

    /// The page-number buttons to show; always contains `page_number`.
    pub page_window: Vec<usize>,

    /// The current page, clamped into `[1, total_pages]`.
    pub page_number: usize,

    pub page_size: PageSize,

    /// Whether the "clear filters" affordance should be shown.
    pub is_filtered: bool,
}

impl View<'_> {
    /// Returns `true` if nothing matched the criteria.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// The result count line, e.g. `Showing 9 of 12 posts`.
    pub fn summary(&self) -> String {
        format!("Showing {} of {} posts", self.items.len(), self.total_count)
    }
}

/// The query state for one listing view. Sessions share no mutable state, so
/// any number of them may exist over the same [`Collection`].
#[derive(Debug)]
pub struct QuerySession<'c> {
    collection: &'c Collection,
    facets: Facets,
    page_size: PageSize,
    default_sort: SortKey,
    criteria: Criteria,
    view: View<'c>,
}

impl<'c> QuerySession<'c> {
    /// Opens a session with default [`Criteria`] and computes the first view.
    pub fn new(collection: &'c Collection, facets: Facets, page_size: PageSize) -> QuerySession<'c> {
        QuerySession::with_default_sort(collection, facets, page_size, SortKey::default())
    }

    /// Like [`QuerySession::new`], but with a different initial (and reset)
    /// sort order.
    pub fn with_default_sort(
        collection: &'c Collection,
        facets: Facets,
        page_size: PageSize,
        default_sort: SortKey,
    ) -> QuerySession<'c> {
        let criteria = Criteria {
            sort_key: default_sort,
            ..Criteria::default()
        };
        let view = compute(collection, &facets, &criteria, page_size, default_sort);
        QuerySession {
            collection,
            facets,
            page_size,
            default_sort,
            criteria,
            view,
        }
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn collection(&self) -> &'c Collection {
        self.collection
    }

    pub fn current_view(&self) -> &View<'c> {
        &self.view
    }

    /// Sets the search term and returns to page 1.
    pub fn set_search_term(&mut self, term: &str) -> &View<'c> {
        self.criteria.search_term = term.to_owned();
        self.criteria.page_number = 1;
        self.recompute()
    }

    /// Selects `value` for facet `facet` (use [`crate::facet::ALL`] to clear
    /// it) and returns to page 1.
    pub fn set_filter(&mut self, facet: &str, value: &str) -> &View<'c> {
        self.criteria
            .filters
            .insert(facet.to_owned(), value.to_owned());
        self.criteria.page_number = 1;
        self.recompute()
    }

    /// Sets the sort order and returns to page 1.
    pub fn set_sort_key(&mut self, key: SortKey) -> &View<'c> {
        self.criteria.sort_key = key;
        self.criteria.page_number = 1;
        self.recompute()
    }

    /// Moves to page `n`, clamped into range. Other criteria are untouched.
    pub fn set_page_number(&mut self, n: usize) -> &View<'c> {
        self.criteria.page_number = n;
        self.recompute()
    }

    /// Restores every criterion to its default.
    pub fn reset(&mut self) -> &View<'c> {
        self.criteria = Criteria {
            sort_key: self.default_sort,
            ..Criteria::default()
        };
        self.recompute()
    }

    fn recompute(&mut self) -> &View<'c> {
        self.view = compute(
            self.collection,
            &self.facets,
            &self.criteria,
            self.page_size,
            self.default_sort,
        );
        // keep the stored page in range so that Previous/Next step from the
        // page actually shown
        self.criteria.page_number = self.view.page_number;
        &self.view
    }
}

/// Filters, sorts, and paginates `collection` under `criteria`.
fn compute<'c>(
    collection: &'c Collection,
    facets: &Facets,
    criteria: &Criteria,
    page_size: PageSize,
    default_sort: SortKey,
) -> View<'c> {
    let predicate = Predicate::build(criteria, facets);
    let mut matched: Vec<&'c Record> = collection
        .records()
        .iter()
        .filter(|r| predicate.matches(r))
        .collect();
    criteria.sort_key.sort(&mut matched);
    let page = paginate(matched, criteria.page_number, page_size);

    debug!(
        search_term = %criteria.search_term,
        sort_key = %criteria.sort_key,
        requested_page = criteria.page_number,
        page = page.page_number,
        total_count = page.total_count,
        total_pages = page.total_pages,
        "recomputed view"
    );

    View {
        page_window: page_window(page.total_pages, page.page_number),
        items: page.items,
        total_count: page.total_count,
        total_pages: page.total_pages,
        page_number: page.page_number,
        page_size,
        is_filtered: predicate.constrains() || criteria.sort_key != default_sort,
    }
}
