//! Defines [`Facet`]s, the named filterable dimensions of a listing (author,
//! category, tag), and the [`Facets`] registry a listing context hands to
//! [`crate::session::QuerySession`].
//!
//! A facet is made of an extraction function, which pulls a [`FacetValue`] out
//! of a [`Record`], and a membership [`Rule`], which tests that value against
//! the filter value the user selected. Two rules exist:
//!
//! * [`Rule::Equals`]: the record's value equals the filter value (or, for a
//!   set-valued extraction, contains it). This is how the `author` facet works.
//! * [`Rule::Overlap`]: the filter value names an option which carries its own
//!   tag set, and the record matches if its tags intersect that set. This is
//!   how the `category` facet works; category membership is never stored, it is
//!   computed here at query time.

use crate::record::{tags_overlap, Author, Category, Record};
use std::fmt;

/// The filter value meaning "no constraint".
pub const ALL: &str = "all";

/// The comparison value a facet extracts from a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacetValue<'r> {
    Scalar(&'r str),
    Set(&'r [String]),
}

/// Extracts a facet's [`FacetValue`] from a [`Record`].
pub type Extract = for<'r> fn(&'r Record) -> FacetValue<'r>;

/// The membership test a [`Facet`] applies between a record's extracted value
/// and the selected filter value.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    /// Equality. When `options` is `Some`, filter values outside of it are
    /// unknown and impose no constraint; when `None`, any value is accepted.
    Equals { options: Option<Vec<String>> },

    /// Set overlap against the tag set configured for the selected option.
    Overlap { options: Vec<(String, Vec<String>)> },
}

/// A named filterable dimension.
#[derive(Clone)]
pub struct Facet {
    name: String,
    extract: Extract,
    rule: Rule,
}

impl fmt::Debug for Facet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Facet")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .finish()
    }
}

impl Facet {
    /// Creates an equality facet over an open universe of values.
    pub fn scalar(name: &str, extract: Extract) -> Facet {
        Facet {
            name: name.to_owned(),
            extract,
            rule: Rule::Equals { options: None },
        }
    }

    /// Creates a set-overlap facet. Each option maps a filter value to the tag
    /// set a record must intersect.
    pub fn overlap<I>(name: &str, extract: Extract, options: I) -> Facet
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        Facet {
            name: name.to_owned(),
            extract,
            rule: Rule::Overlap {
                options: options.into_iter().collect(),
            },
        }
    }

    /// Restricts an equality facet to a known set of values. Has no effect on
    /// overlap facets, whose options are fixed at construction.
    pub fn with_options<I>(mut self, options: I) -> Facet
    where
        I: IntoIterator<Item = String>,
    {
        if let Rule::Equals { .. } = self.rule {
            self.rule = Rule::Equals {
                options: Some(options.into_iter().collect()),
            };
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lists the selectable filter values, or `None` if the universe is open.
    pub fn options(&self) -> Option<Vec<&str>> {
        match &self.rule {
            Rule::Equals { options } => options
                .as_ref()
                .map(|o| o.iter().map(String::as_str).collect()),
            Rule::Overlap { options } => Some(options.iter().map(|(k, _)| k.as_str()).collect()),
        }
    }

    /// Returns `true` if `value` is a filter value this facet can test.
    pub fn knows(&self, value: &str) -> bool {
        match &self.rule {
            Rule::Equals { options: None } => true,
            Rule::Equals {
                options: Some(options),
            } => options.iter().any(|o| o == value),
            Rule::Overlap { options } => options.iter().any(|(k, _)| k == value),
        }
    }

    /// Tests `record` against the filter `value`. Returns `None` if `value` is
    /// not a known option, which callers treat as "no constraint".
    pub fn matches(&self, record: &Record, value: &str) -> Option<bool> {
        if !self.knows(value) {
            return None;
        }
        let extracted = (self.extract)(record);
        match &self.rule {
            Rule::Equals { .. } => Some(match extracted {
                FacetValue::Scalar(s) => s == value,
                FacetValue::Set(set) => set.iter().any(|s| s == value),
            }),
            Rule::Overlap { options } => {
                let (_, tags) = options.iter().find(|(k, _)| k == value)?;
                Some(match extracted {
                    FacetValue::Scalar(s) => tags.iter().any(|t| t == s),
                    FacetValue::Set(set) => tags_overlap(set, tags),
                })
            }
        }
    }
}

/// The facets configured for one listing context, in display order.
#[derive(Clone, Debug, Default)]
pub struct Facets(Vec<Facet>);

impl Facets {
    pub fn new() -> Facets {
        Facets(Vec::new())
    }

    /// Adds `facet`, replacing any facet already registered under its name.
    pub fn insert(&mut self, facet: Facet) {
        match self.0.iter_mut().find(|f| f.name == facet.name) {
            Some(existing) => *existing = facet,
            None => self.0.push(facet),
        }
    }

    pub fn with(mut self, facet: Facet) -> Facets {
        self.insert(facet);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Facet> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lists the selectable values for facet `name`. `None` if there is no
    /// such facet or its universe is open.
    pub fn options(&self, name: &str) -> Option<Vec<&str>> {
        self.get(name)?.options()
    }

    /// Tests `record` against facet `name` with filter `value`. `None` means
    /// the facet or the value is unknown.
    pub fn matches(&self, name: &str, record: &Record, value: &str) -> Option<bool> {
        self.get(name)?.matches(record, value)
    }
}

fn extract_author(record: &Record) -> FacetValue<'_> {
    FacetValue::Scalar(&record.author)
}

fn extract_tags(record: &Record) -> FacetValue<'_> {
    FacetValue::Set(&record.tags)
}

/// The `author` facet: equality on [`Record::author`], restricted to the
/// given authors' slugs.
pub fn author_facet(authors: &[Author]) -> Facet {
    Facet::scalar("author", extract_author).with_options(authors.iter().map(|a| a.slug.clone()))
}

/// The `category` facet: a record matches a category slug if its tags
/// intersect that category's tags.
pub fn category_facet(categories: &[Category]) -> Facet {
    Facet::overlap(
        "category",
        extract_tags,
        categories.iter().map(|c| (c.slug.clone(), c.tags.clone())),
    )
}

/// The `tag` facet: a record matches if it carries the selected tag exactly.
pub fn tag_facet() -> Facet {
    Facet::scalar("tag", extract_tags)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::record::test::record;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                slug: String::from("technology"),
                title: String::from("Technology"),
                description: String::new(),
                tags: vec![String::from("ai"), String::from("technology")],
            },
            Category {
                slug: String::from("career"),
                title: String::from("Career"),
                description: String::new(),
                tags: vec![String::from("career")],
            },
        ]
    }

    fn authors() -> Vec<Author> {
        vec![Author {
            slug: String::from("ethan-kim"),
            name: String::from("Ethan Kim"),
            bio: String::new(),
        }]
    }

    #[test]
    fn test_author_equality() {
        let facet = author_facet(&authors());
        let mut r = record("a", &[], "2025-01-01");
        assert_eq!(Some(false), facet.matches(&r, "ethan-kim"));
        r.author = String::from("ethan-kim");
        assert_eq!(Some(true), facet.matches(&r, "ethan-kim"));
    }

    #[test]
    fn test_unknown_author_is_no_constraint() {
        let facet = author_facet(&authors());
        let r = record("a", &[], "2025-01-01");
        assert_eq!(None, facet.matches(&r, "nobody-at-all"));
    }

    #[test]
    fn test_category_overlap() {
        let facet = category_facet(&categories());
        let r = record("a", &["ai", "healthcare"], "2025-01-01");
        assert_eq!(Some(true), facet.matches(&r, "technology"));
        assert_eq!(Some(false), facet.matches(&r, "career"));
        assert_eq!(None, facet.matches(&r, "design"));
    }

    #[test]
    fn test_tag_facet_open_universe() {
        let facet = tag_facet();
        let r = record("a", &["rust", "cli"], "2025-01-01");
        assert_eq!(Some(true), facet.matches(&r, "cli"));
        assert_eq!(Some(false), facet.matches(&r, "go"));
        assert_eq!(None, facet.options());
    }

    #[test]
    fn test_registry() {
        let facets = Facets::new()
            .with(author_facet(&authors()))
            .with(category_facet(&categories()));
        assert_eq!(vec!["author", "category"], facets.names().collect::<Vec<_>>());
        assert_eq!(
            Some(vec!["technology", "career"]),
            facets.options("category")
        );
        let r = record("a", &["career"], "2025-01-01");
        assert_eq!(Some(true), facets.matches("category", &r, "career"));
        assert_eq!(None, facets.matches("colour", &r, "red"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut facets = Facets::new().with(tag_facet());
        facets.insert(tag_facet().with_options(vec![String::from("rust")]));
        assert_eq!(1, facets.names().count());
        assert_eq!(Some(vec!["rust"]), facets.options("tag"));
    }
}
