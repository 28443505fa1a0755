//! Builds the boolean [`Predicate`] a [`Record`] must satisfy to appear in a
//! listing: a case-insensitive free-text match AND every active facet filter.

use crate::criteria::Criteria;
use crate::facet::{Facet, Facets};
use crate::record::Record;
use tracing::warn;

/// A compiled filter over [`Record`]s. Building one resolves the facet names
/// in the [`Criteria`] once, so [`Predicate::matches`] does no lookups.
#[derive(Debug)]
pub struct Predicate<'a> {
    /// The lower-cased search term. Empty matches everything.
    needle: String,

    /// Active filters whose facet and value are both known.
    filters: Vec<(&'a Facet, &'a str)>,
}

impl<'a> Predicate<'a> {
    /// Combines the search term and filters in `criteria` against the facets
    /// in `facets`. Filters naming an unknown facet or an unknown option are
    /// dropped (they impose no constraint).
    pub fn build(criteria: &'a Criteria, facets: &'a Facets) -> Predicate<'a> {
        let mut filters = Vec::new();
        for (name, value) in criteria.active_filters() {
            match facets.get(name) {
                None => warn!(facet = name, "ignoring filter on unknown facet"),
                Some(facet) if !facet.knows(value) => {
                    warn!(facet = name, value, "ignoring unknown filter value")
                }
                Some(facet) => filters.push((facet, value)),
            }
        }
        Predicate {
            needle: criteria.search_term.to_lowercase(),
            filters,
        }
    }

    /// Returns `true` if `record` satisfies the search term and every filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_text(record)
            && self
                .filters
                .iter()
                .all(|(facet, value)| facet.matches(record, value).unwrap_or(true))
    }

    /// Returns `true` if the predicate can reject anything: the search term is
    /// non-empty or at least one filter survived [`Predicate::build`].
    pub fn constrains(&self) -> bool {
        !self.needle.is_empty() || !self.filters.is_empty()
    }

    fn matches_text(&self, record: &Record) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let contains = |haystack: &str| haystack.to_lowercase().contains(&self.needle);
        contains(&record.title)
            || contains(&record.description)
            || record.tags.iter().any(|t| contains(t))
    }
}
