//! Defines the [`Dataset`] type and the logic for loading one from a YAML
//! document. A dataset is the fixed content of a site: its posts, authors,
//! and categories. The query engine never loads anything itself; this module
//! is the content-loading collaborator that hands it a ready-made
//! [`Collection`].
//!
//! The document looks like this:
//!
//! ```yaml
//! posts:
//!   - title: Top Python Libraries for Web Development
//!     slug: top-python-libraries-for-web-development
//!     description: A curated list of the most useful Python libraries.
//!     date: 2025-07-12
//!     author: julia-white
//!     likes: 60
//!     comments: 38
//!     tags: [python, web-development, programming]
//! authors:
//!   - slug: julia-white
//!     name: Julia White
//! categories:
//!   - slug: programming
//!     title: Programming
//!     tags: [python, programming]
//! ```
//!
//! Posts without a `slug` get one derived from their title.

use crate::record::{Author, Category, Collection, Record};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    posts: Vec<Record>,

    #[serde(default)]
    authors: Vec<Author>,

    #[serde(default)]
    categories: Vec<Category>,

    /// The tag universe. When omitted it is every tag used by some post.
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// The full, immutable content of a site.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub posts: Collection,
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
    pub tags: Vec<String>,
}

impl Dataset {
    /// Loads a dataset from the YAML file at `path`.
    pub fn from_path(path: &Path) -> Result<Dataset> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let document: Document = serde_yaml::from_reader(file).map_err(|e| {
            Error::Annotated(format!("parsing dataset `{}`", path.display()), Box::new(e.into()))
        })?;
        Dataset::from_document(document)
    }

    /// Parses a dataset from a YAML string.
    pub fn from_yaml(input: &str) -> Result<Dataset> {
        Dataset::from_document(serde_yaml::from_str(input)?)
    }

    fn from_document(document: Document) -> Result<Dataset> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut posts = Vec::with_capacity(document.posts.len());
        for mut post in document.posts {
            if post.id.is_empty() {
                post.id = slug::slugify(&post.title);
            }
            if !seen.insert(post.id.clone()) {
                return Err(Error::DuplicateId(post.id));
            }
            posts.push(post);
        }

        let tags = match document.tags {
            Some(tags) => tags,
            None => {
                let mut used: Vec<String> = Vec::new();
                for post in &posts {
                    for tag in &post.tags {
                        if !used.contains(tag) {
                            used.push(tag.clone());
                        }
                    }
                }
                used
            }
        };

        debug!(
            posts = posts.len(),
            authors = document.authors.len(),
            categories = document.categories.len(),
            tags = tags.len(),
            "loaded dataset"
        );

        Ok(Dataset {
            posts: Collection::new(posts),
            authors: document.authors,
            categories: document.categories,
            tags,
        })
    }

    /// Looks up an author by slug.
    pub fn author(&self, slug: &str) -> Result<&Author> {
        self.authors
            .iter()
            .find(|a| a.slug == slug)
            .ok_or_else(|| Error::NotFound {
                kind: "author",
                key: slug.to_owned(),
            })
    }

    /// Looks up a category by slug.
    pub fn category(&self, slug: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| Error::NotFound {
                kind: "category",
                key: slug.to_owned(),
            })
    }

    /// Looks up a post by its identifier.
    pub fn post(&self, id: &str) -> Result<&Record> {
        self.posts.get(id).ok_or_else(|| Error::NotFound {
            kind: "post",
            key: id.to_owned(),
        })
    }

    /// Checks that `tag` is part of the tag universe.
    pub fn tag(&self, tag: &str) -> Result<&str> {
        self.tags
            .iter()
            .find(|t| *t == tag)
            .map(String::as_str)
            .ok_or_else(|| Error::NotFound {
                kind: "tag",
                key: tag.to_owned(),
            })
    }
}

/// The result of a fallible dataset operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a dataset or looking something up in it.
#[derive(Debug)]
pub enum Error {
    /// Returned when the dataset file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the dataset isn't valid YAML or doesn't match the
    /// expected shape.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when two posts share an identifier.
    DuplicateId(String),

    /// Returned when a lookup by slug finds nothing. Callers usually render
    /// this as a "not found" page.
    NotFound { kind: &'static str, key: String },

    /// An error with additional context.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening dataset file '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => {
                write!(f, "Deserializing YAML: {}", err)
            }
            Error::DuplicateId(id) => write!(f, "Duplicate post id `{}`", id),
            Error::NotFound { kind, key } => write!(f, "No such {} `{}`", kind, key),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
            Error::DuplicateId(_) => None,
            Error::NotFound { .. } => None,
            Error::Annotated(_, err) => Some(&**err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for fallible YAML deserialization.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const YAML: &str = r#"
posts:
  - title: How to Run Effective Virtual Meetings
    date: 2025-03-05
    author: ethan-kim
    likes: 99
    comments: 72
    tags: [productivity, remote, communication]
  - title: Top Python Libraries for Web Development
    slug: python-libraries
    date: 2025-07-12
    author: julia-white
    tags: [python, programming, productivity]
authors:
  - slug: ethan-kim
    name: Ethan Kim
categories:
  - slug: programming
    title: Programming
    tags: [python, programming]
"#;

    #[test]
    fn test_from_yaml() -> Result<()> {
        let dataset = Dataset::from_yaml(YAML)?;
        assert_eq!(2, dataset.posts.len());
        let first = &dataset.posts.records()[0];
        assert_eq!("how-to-run-effective-virtual-meetings", first.id);
        assert_eq!(99, first.likes);
        let second = dataset.post("python-libraries")?;
        assert_eq!(0, second.comments);
        assert_eq!(
            vec!["productivity", "remote", "communication", "python", "programming"],
            dataset.tags
        );
        Ok(())
    }

    #[test]
    fn test_lookups() -> Result<()> {
        let dataset = Dataset::from_yaml(YAML)?;
        assert_eq!("Ethan Kim", dataset.author("ethan-kim")?.name);
        assert_eq!("Programming", dataset.category("programming")?.title);
        assert_eq!("remote", dataset.tag("remote")?);
        match dataset.author("nobody") {
            Err(Error::NotFound { kind, key }) => {
                assert_eq!("author", kind);
                assert_eq!("nobody", key);
            }
            other => panic!("wanted NotFound; found {:?}", other),
        }
        assert!(dataset.tag("cooking").is_err());
        Ok(())
    }

    #[test]
    fn test_duplicate_ids() {
        let yaml = r#"
posts:
  - { title: Same, date: 2025-01-01, author: a }
  - { title: Same, date: 2025-01-02, author: b }
"#;
        match Dataset::from_yaml(yaml) {
            Err(Error::DuplicateId(id)) => assert_eq!("same", id),
            other => panic!("wanted DuplicateId; found {:?}", other.map(|d| d.posts)),
        }
    }

    #[test]
    fn test_explicit_tag_universe() -> Result<()> {
        let dataset = Dataset::from_yaml("tags: [rust, go]\n")?;
        assert!(dataset.posts.is_empty());
        assert_eq!(vec!["rust", "go"], dataset.tags);
        Ok(())
    }

    #[test]
    fn test_invalid_date() {
        let yaml = "posts:\n  - { title: A, date: yesterday, author: a }\n";
        assert!(matches!(
            Dataset::from_yaml(yaml),
            Err(Error::DeserializeYaml(_))
        ));
    }
}
