//! Defines [`Criteria`], the full set of user-controlled query parameters for
//! one listing view.

use crate::facet::ALL;
use crate::sort::SortKey;
use std::collections::BTreeMap;

/// The current query parameters. A fresh [`Criteria`] (see [`Default`]) imposes
/// no constraint, sorts by [`SortKey::DateDesc`], and shows page 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Criteria {
    /// Free-text search term. Empty matches everything.
    pub search_term: String,

    /// Selected filter value per facet name. Absent entries and entries equal
    /// to [`ALL`] impose no constraint.
    pub filters: BTreeMap<String, String>,

    pub sort_key: SortKey,

    /// 1-based page number. Clamped by [`crate::page::paginate`].
    pub page_number: usize,
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria {
            search_term: String::new(),
            filters: BTreeMap::new(),
            sort_key: SortKey::default(),
            page_number: 1,
        }
    }
}

impl Criteria {
    /// Returns the selected value for `facet`, or [`ALL`] if none is selected.
    pub fn filter(&self, facet: &str) -> &str {
        self.filters.get(facet).map(String::as_str).unwrap_or(ALL)
    }

    /// Iterates over the filters whose value is not [`ALL`].
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| v.as_str() != ALL)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
