//! Defines the [`TagCount`] type and the tag cloud: every tag in a
//! [`Collection`] together with the number of records carrying it, most used
//! first.

use crate::record::Collection;
use std::hash::{Hash, Hasher};

/// A tag and the number of records carrying it.
#[derive(Clone, Debug)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

impl Hash for TagCount {
    /// Implements [`Hash`] for [`TagCount`] by delegating directly to the
    /// `name` field.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}

impl PartialEq for TagCount {
    /// Implements [`PartialEq`] and [`Eq`] for [`TagCount`] by delegating
    /// directly to the `name` field.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for TagCount {}

/// Counts the records carrying each of `tags`, sorted by count descending.
/// Tags with equal counts keep their order in `tags`.
pub fn tag_counts(collection: &Collection, tags: &[String]) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = tags
        .iter()
        .map(|tag| TagCount {
            name: tag.clone(),
            count: collection
                .records()
                .iter()
                .filter(|r| r.has_tag(tag))
                .count(),
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Keeps the tags whose name contains `query`, ignoring case.
pub fn filter_tags<'a>(counts: &'a [TagCount], query: &str) -> Vec<&'a TagCount> {
    let query = query.to_lowercase();
    counts
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&query))
        .collect()
}
