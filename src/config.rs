//! Loads the listing configuration from a `quire.yaml` project file. Every
//! key is optional:
//!
//! ```yaml
//! page_sizes:
//!   posts: 9
//!   author: 6
//!   category: 9
//!   tag: 9
//! default_sort: date-desc
//! ```

use crate::page::PageSize;
use crate::sort::SortKey;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The name of the project file [`Config::from_directory`] looks for.
pub const PROJECT_FILE: &str = "quire.yaml";

#[derive(Deserialize)]
struct PostsPageSize(PageSize);
impl Default for PostsPageSize {
    fn default() -> Self {
        PostsPageSize(PageSize::new(9))
    }
}

#[derive(Deserialize)]
struct AuthorPageSize(PageSize);
impl Default for AuthorPageSize {
    fn default() -> Self {
        AuthorPageSize(PageSize::new(6))
    }
}

#[derive(Deserialize)]
struct CategoryPageSize(PageSize);
impl Default for CategoryPageSize {
    fn default() -> Self {
        CategoryPageSize(PageSize::new(9))
    }
}

#[derive(Deserialize)]
struct TagPageSize(PageSize);
impl Default for TagPageSize {
    fn default() -> Self {
        TagPageSize(PageSize::new(9))
    }
}

#[derive(Deserialize, Default)]
struct PageSizesFile {
    #[serde(default)]
    posts: PostsPageSize,

    #[serde(default)]
    author: AuthorPageSize,

    #[serde(default)]
    category: CategoryPageSize,

    #[serde(default)]
    tag: TagPageSize,
}

#[derive(Deserialize, Default)]
struct Project {
    #[serde(default)]
    page_sizes: PageSizesFile,

    #[serde(default)]
    default_sort: SortKey,
}

/// Items per page for each kind of listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSizes {
    pub posts: PageSize,
    pub author: PageSize,
    pub category: PageSize,
    pub tag: PageSize,
}

impl Default for PageSizes {
    fn default() -> Self {
        PageSizes::from(PageSizesFile::default())
    }
}

impl From<PageSizesFile> for PageSizes {
    fn from(file: PageSizesFile) -> PageSizes {
        PageSizes {
            posts: file.posts.0,
            author: file.author.0,
            category: file.category.0,
            tag: file.tag.0,
        }
    }
}

/// The listing configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub page_sizes: PageSizes,

    /// The sort order a listing opens with and returns to on reset.
    pub default_sort: SortKey,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for a [`PROJECT_FILE`]
    /// and loads the first one found. Returns the default configuration if
    /// there is none.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Ok(Config::default()),
            }
        }
    }

    /// Loads the configuration from the project file at `path`.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file).map_err(|err| Error::Parse {
            path: path.to_owned(),
            err,
        })?;
        Ok(Config::from(project))
    }

    /// Parses the configuration from a YAML string.
    pub fn from_yaml(input: &str) -> Result<Config> {
        let project: Project = serde_yaml::from_str(input).map_err(|err| Error::Parse {
            path: PathBuf::new(),
            err,
        })?;
        Ok(Config::from(project))
    }
}

impl From<Project> for Config {
    fn from(project: Project) -> Config {
        Config {
            page_sizes: PageSizes::from(project.page_sizes),
            default_sort: project.default_sort,
        }
    }
}

/// The result of loading a configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the project file.
#[derive(Debug)]
pub enum Error {
    /// Returned when the project file exists but can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the project file is malformed, including page sizes of
    /// zero and unknown sort keys.
    Parse { path: PathBuf, err: serde_yaml::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening project file '{}': {}", path.display(), err)
            }
            Error::Parse { path, err } => {
                write!(f, "Loading configuration '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Parse { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() -> Result<()> {
        let config = Config::from_yaml("{}")?;
        assert_eq!(Config::default(), config);
        assert_eq!(9, config.page_sizes.posts.get());
        assert_eq!(6, config.page_sizes.author.get());
        assert_eq!(SortKey::DateDesc, config.default_sort);
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let config = Config::from_yaml("page_sizes:\n  tag: 12\ndefault_sort: likes\n")?;
        assert_eq!(12, config.page_sizes.tag.get());
        assert_eq!(9, config.page_sizes.category.get());
        assert_eq!(SortKey::LikesDesc, config.default_sort);
        Ok(())
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(Config::from_yaml("page_sizes:\n  posts: 0\n").is_err());
    }

    #[test]
    fn test_unknown_sort_rejected() {
        assert!(Config::from_yaml("default_sort: random\n").is_err());
    }

    #[test]
    fn test_from_directory_without_project_file() -> Result<()> {
        let dir = std::env::temp_dir().join("quire-no-project");
        std::fs::create_dir_all(&dir).map_err(|err| Error::Open {
            path: dir.clone(),
            err,
        })?;
        let config = Config::from_directory(&dir)?;
        assert_eq!(Config::default(), config);
        Ok(())
    }

    #[test]
    fn test_from_directory_finds_parent() -> Result<()> {
        let config = Config::from_directory(Path::new("testdata/site/nested"))?;
        assert_eq!(12, config.page_sizes.posts.get());
        Ok(())
    }
}
