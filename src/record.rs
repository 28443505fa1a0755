//! Defines the [`Record`], [`Collection`], [`Author`], and [`Category`] types.
//! A [`Collection`] is the immutable, ordered input to a
//! [`crate::session::QuerySession`]; its order is the tie-break order for every
//! sort in [`crate::sort`].

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;

/// A single content item (a post). Only the fields the query engine looks at
/// are modeled here; rendering concerns like bodies and images belong to the
/// caller.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Record {
    /// The record's stable identifier (its slug). When omitted from the
    /// source data, [`crate::dataset`] derives it from the title.
    #[serde(default, alias = "slug")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Publication date. Comparisons are at day precision.
    pub date: NaiveDate,

    /// Key into the author collection. Only ever compared, never resolved by
    /// the engine.
    pub author: String,

    #[serde(default)]
    pub likes: u64,

    #[serde(default)]
    pub comments: u64,
}

impl Record {
    /// Returns `true` if the record carries `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

/// An author of [`Record`]s. Records refer to authors by `slug`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Author {
    pub slug: String,
    pub name: String,

    #[serde(default)]
    pub bio: String,
}

impl Author {
    /// Counts the records in `collection` written by this author.
    pub fn post_count(&self, collection: &Collection) -> usize {
        collection
            .records()
            .iter()
            .filter(|r| r.author == self.slug)
            .count()
    }
}

/// A category groups records by a configured set of tags. Membership is not
/// stored anywhere; it is computed by [`belongs_to`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Category {
    pub slug: String,
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Category {
    /// Counts the records in `collection` which belong to this category.
    pub fn post_count(&self, collection: &Collection) -> usize {
        collection
            .records()
            .iter()
            .filter(|r| belongs_to(r, self))
            .count()
    }
}

/// Returns `true` if `record`'s tag set intersects `category`'s tag set. A
/// category without tags has no members.
pub fn belongs_to(record: &Record, category: &Category) -> bool {
    tags_overlap(&record.tags, &category.tags)
}

/// Returns `true` if the two tag lists share at least one tag.
pub(crate) fn tags_overlap(left: &[String], right: &[String]) -> bool {
    if left.is_empty() || right.is_empty() {
        return false;
    }
    let right: HashSet<&str> = right.iter().map(String::as_str).collect();
    left.iter().any(|t| right.contains(t.as_str()))
}

/// The immutable, ordered sequence of [`Record`]s for one listing context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub fn new(records: Vec<Record>) -> Collection {
        Collection { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by its identifier.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns a new collection holding only the records for which `keep`
    /// returns `true`, in their original order.
    pub fn scoped<F>(&self, keep: F) -> Collection
    where
        F: Fn(&Record) -> bool,
    {
        Collection {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Collection {
        Collection::new(records)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Builds a record with the given id, tags, and date (`YYYY-MM-DD`); the
    /// remaining fields are filler.
    pub(crate) fn record(id: &str, tags: &[&str], date: &str) -> Record {
        Record {
            id: id.to_owned(),
            title: format!("Title {}", id),
            description: String::new(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            date: date.parse().unwrap(),
            author: String::from("nobody"),
            likes: 0,
            comments: 0,
        }
    }

    fn category(tags: &[&str]) -> Category {
        Category {
            slug: String::from("technology"),
            title: String::from("Technology"),
            description: String::new(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    #[test]
    fn test_belongs_to_intersection() {
        let r = record("a", &["ai", "healthcare"], "2025-01-01");
        assert!(belongs_to(&r, &category(&["technology", "ai"])));
        assert!(!belongs_to(&r, &category(&["career"])));
    }

    #[test]
    fn test_belongs_to_ignores_title_substrings() {
        let mut r = record("a", &["career"], "2025-01-01");
        r.title = String::from("Technology trends");
        assert!(!belongs_to(&r, &category(&["ai"])));
    }

    #[test]
    fn test_belongs_to_empty_category() {
        let r = record("a", &["ai"], "2025-01-01");
        assert!(!belongs_to(&r, &category(&[])));
    }

    #[test]
    fn test_scoped_preserves_order() {
        let c = Collection::new(vec![
            record("a", &["x"], "2025-01-01"),
            record("b", &["y"], "2025-01-02"),
            record("c", &["x"], "2025-01-03"),
        ]);
        let scoped = c.scoped(|r| r.has_tag("x"));
        let ids: Vec<&str> = scoped.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_post_counts() {
        let mut a = record("a", &["ai", "career"], "2025-01-01");
        a.author = String::from("ethan-kim");
        let mut b = record("b", &["python"], "2025-01-02");
        b.author = String::from("julia-white");
        let mut c = record("c", &["remote"], "2025-01-03");
        c.author = String::from("ethan-kim");
        let collection = Collection::new(vec![a, b, c]);

        let author = |slug: &str| Author {
            slug: slug.to_owned(),
            name: String::new(),
            bio: String::new(),
        };
        assert_eq!(2, author("ethan-kim").post_count(&collection));
        assert_eq!(1, author("julia-white").post_count(&collection));
        assert_eq!(0, author("nobody").post_count(&collection));

        assert_eq!(2, category(&["ai", "python"]).post_count(&collection));
        assert_eq!(1, category(&["career", "ai"]).post_count(&collection));
        assert_eq!(0, category(&[]).post_count(&collection));
    }

    #[test]
    fn test_get() {
        let c = Collection::new(vec![record("a", &[], "2025-01-01")]);
        assert!(c.get("a").is_some());
        assert!(c.get("b").is_none());
    }
}
