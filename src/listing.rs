//! Defines [`Listing`], one listing context of the site (all posts, or the
//! posts of one author, category, or tag) and the facets and page size that
//! go with it. Every listing is served by the same
//! [`crate::session::QuerySession`]; they differ only in which records they
//! start from and which facets they expose.

use crate::config::Config;
use crate::dataset::{Dataset, Result};
use crate::facet::{author_facet, category_facet, Facets};
use crate::page::PageSize;
use crate::record::{belongs_to, Collection, Record};
use crate::session::QuerySession;
use crate::sort::SortKey;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which records a [`Listing`] is scoped to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Every post, filterable by author and category.
    Posts,

    /// The posts written by the author with this slug.
    Author(String),

    /// The posts belonging to the category with this slug.
    Category(String),

    /// The posts carrying this tag.
    Tag(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scope::Posts => f.write_str("posts"),
            Scope::Author(slug) => write!(f, "author:{}", slug),
            Scope::Category(slug) => write!(f, "category:{}", slug),
            Scope::Tag(tag) => write!(f, "tag:{}", tag),
        }
    }
}

impl FromStr for Scope {
    type Err = ParseScopeError;

    /// Parses `posts`, `author:<slug>`, `category:<slug>`, or `tag:<tag>`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "posts" {
            return Ok(Scope::Posts);
        }
        let (kind, key) = match s.find(':') {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => return Err(ParseScopeError(s.to_owned())),
        };
        if key.is_empty() {
            return Err(ParseScopeError(s.to_owned()));
        }
        match kind {
            "author" => Ok(Scope::Author(key.to_owned())),
            "category" => Ok(Scope::Category(key.to_owned())),
            "tag" => Ok(Scope::Tag(key.to_owned())),
            _ => Err(ParseScopeError(s.to_owned())),
        }
    }
}

/// Returned when a listing scope can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScopeError(pub String);

impl fmt::Display for ParseScopeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid listing `{}`; wanted `posts`, `author:<slug>`, `category:<slug>`, or `tag:<tag>`",
            self.0
        )
    }
}

impl std::error::Error for ParseScopeError {}

/// One listing context: a pre-scoped [`Collection`] plus its facets, page
/// size, and default sort order.
#[derive(Debug)]
pub struct Listing {
    scope: Scope,
    heading: String,
    collection: Collection,
    facets: Facets,
    page_size: PageSize,
    default_sort: SortKey,
}

impl Listing {
    /// Opens the listing for `scope`. Fails with
    /// [`crate::dataset::Error::NotFound`] if the scope names an author,
    /// category, or tag the dataset doesn't have.
    pub fn open(dataset: &Dataset, scope: &Scope, config: &Config) -> Result<Listing> {
        let listing = match scope {
            Scope::Posts => Listing::posts(dataset, config),
            Scope::Author(slug) => Listing::author(dataset, slug, config)?,
            Scope::Category(slug) => Listing::category(dataset, slug, config)?,
            Scope::Tag(tag) => Listing::tag(dataset, tag, config)?,
        };
        debug!(
            scope = %listing.scope,
            records = listing.collection.len(),
            page_size = listing.page_size.get(),
            "opened listing"
        );
        Ok(listing)
    }

    /// All posts, filterable by `author` and `category`.
    pub fn posts(dataset: &Dataset, config: &Config) -> Listing {
        Listing {
            scope: Scope::Posts,
            heading: String::from("All Posts"),
            collection: dataset.posts.clone(),
            facets: Facets::new()
                .with(author_facet(&dataset.authors))
                .with(category_facet(&dataset.categories)),
            page_size: config.page_sizes.posts,
            default_sort: config.default_sort,
        }
    }

    /// The posts by one author.
    pub fn author(dataset: &Dataset, slug: &str, config: &Config) -> Result<Listing> {
        let author = dataset.author(slug)?;
        Ok(Listing {
            scope: Scope::Author(author.slug.clone()),
            heading: author.name.clone(),
            collection: dataset.posts.scoped(|r| r.author == author.slug),
            facets: Facets::new(),
            page_size: config.page_sizes.author,
            default_sort: config.default_sort,
        })
    }

    /// The posts whose tags intersect a category's tags.
    pub fn category(dataset: &Dataset, slug: &str, config: &Config) -> Result<Listing> {
        let category = dataset.category(slug)?;
        Ok(Listing {
            scope: Scope::Category(category.slug.clone()),
            heading: category.title.clone(),
            collection: dataset.posts.scoped(|r| belongs_to(r, category)),
            facets: Facets::new(),
            page_size: config.page_sizes.category,
            default_sort: config.default_sort,
        })
    }

    /// The posts carrying one tag.
    pub fn tag(dataset: &Dataset, tag: &str, config: &Config) -> Result<Listing> {
        let tag = dataset.tag(tag)?;
        Ok(Listing {
            scope: Scope::Tag(tag.to_owned()),
            heading: format!("#{}", tag),
            collection: dataset.posts.scoped(|r| r.has_tag(tag)),
            facets: Facets::new(),
            page_size: config.page_sizes.tag,
            default_sort: config.default_sort,
        })
    }

    /// Opens a fresh [`QuerySession`] over this listing.
    pub fn session(&self) -> QuerySession<'_> {
        QuerySession::with_default_sort(
            &self.collection,
            self.facets.clone(),
            self.page_size,
            self.default_sort,
        )
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// A title for the listing: `All Posts`, the author's name, the category's
    /// title, or `#tag`.
    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }
}

/// Returns up to `limit` other records sharing at least one tag with
/// `record`, in collection order.
pub fn related<'c>(collection: &'c Collection, record: &Record, limit: usize) -> Vec<&'c Record> {
    collection
        .records()
        .iter()
        .filter(|r| r.id != record.id && r.tags.iter().any(|t| record.has_tag(t)))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dataset::Error;

    const YAML: &str = r#"
posts:
  - { title: Alpha, date: 2025-01-01, author: ethan-kim, tags: [ai, career] }
  - { title: Beta, date: 2025-01-02, author: julia-white, tags: [python] }
  - { title: Gamma, date: 2025-01-03, author: ethan-kim, tags: [remote] }
  - { title: Delta, date: 2025-01-04, author: julia-white, tags: [ai] }
authors:
  - { slug: ethan-kim, name: Ethan Kim }
  - { slug: julia-white, name: Julia White }
categories:
  - { slug: technology, title: Technology, tags: [ai, python] }
  - { slug: lifestyle, title: Lifestyle, tags: [wellness] }
"#;

    fn dataset() -> Dataset {
        Dataset::from_yaml(YAML).unwrap()
    }

    fn ids(listing: &Listing) -> Vec<&str> {
        listing
            .collection()
            .records()
            .iter()
            .map(|r| r.id.as_str())
            .collect()
    }

    #[test]
    fn test_parse_scope() {
        assert_eq!(Ok(Scope::Posts), "posts".parse());
        assert_eq!(Ok(Scope::Author(String::from("ethan-kim"))), "author:ethan-kim".parse());
        assert_eq!(Ok(Scope::Tag(String::from("ai"))), "tag:ai".parse());
        assert!("tag:".parse::<Scope>().is_err());
        assert!("series:rust".parse::<Scope>().is_err());
        assert!("everything".parse::<Scope>().is_err());
    }

    #[test]
    fn test_posts_listing() {
        let listing = Listing::posts(&dataset(), &Config::default());
        assert_eq!(4, listing.collection().len());
        assert_eq!(vec!["author", "category"], listing.facets().names().collect::<Vec<_>>());
        assert_eq!(9, listing.page_size().get());

        let mut session = listing.session();
        assert_eq!(3, session.set_filter("category", "technology").total_count);
        assert_eq!(2, session.set_filter("author", "julia-white").total_count);
    }

    #[test]
    fn test_author_listing() -> Result<()> {
        let listing = Listing::author(&dataset(), "ethan-kim", &Config::default())?;
        assert_eq!("Ethan Kim", listing.heading());
        assert_eq!(vec!["alpha", "gamma"], ids(&listing));
        assert_eq!(6, listing.page_size().get());
        assert!(listing.facets().is_empty());
        Ok(())
    }

    #[test]
    fn test_category_listing_uses_tag_intersection() -> Result<()> {
        let listing = Listing::category(&dataset(), "technology", &Config::default())?;
        assert_eq!(vec!["alpha", "beta", "delta"], ids(&listing));
        let view = listing.session().current_view().clone();
        assert_eq!("delta", view.items[0].id);
        Ok(())
    }

    #[test]
    fn test_empty_category() -> Result<()> {
        let listing = Listing::category(&dataset(), "lifestyle", &Config::default())?;
        let session = listing.session();
        let view = session.current_view();
        assert!(view.is_empty());
        assert_eq!(1, view.total_pages);
        assert_eq!(vec![1], view.page_window);
        Ok(())
    }

    #[test]
    fn test_tag_listing() -> Result<()> {
        let listing = Listing::open(&dataset(), &"tag:ai".parse().unwrap(), &Config::default())?;
        assert_eq!("#ai", listing.heading());
        assert_eq!(&Scope::Tag(String::from("ai")), listing.scope());
        assert_eq!("tag:ai", listing.scope().to_string());
        assert_eq!(vec!["alpha", "delta"], ids(&listing));
        Ok(())
    }

    #[test]
    fn test_not_found() {
        let dataset = dataset();
        let config = Config::default();
        for scope in &["author:nobody", "category:cooking", "tag:rust"] {
            match Listing::open(&dataset, &scope.parse().unwrap(), &config) {
                Err(Error::NotFound { .. }) => {}
                other => panic!("wanted NotFound for {}; found {:?}", scope, other),
            }
        }
    }

    #[test]
    fn test_related() {
        let dataset = dataset();
        let alpha = dataset.post("alpha").unwrap();
        let related: Vec<&str> = related(&dataset.posts, alpha, 3)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(vec!["delta"], related);
    }
}
