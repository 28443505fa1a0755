//! The fixed registry of named sort orders. Every order is stable: records
//! that compare equal keep their relative order from the
//! [`crate::record::Collection`].

use crate::record::Record;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A named sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SortKey {
    /// Newest first.
    DateDesc,

    /// Most liked first.
    LikesDesc,

    /// Most commented first.
    CommentsDesc,

    /// Alphabetical by title.
    TitleAsc,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::DateDesc
    }
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::LikesDesc,
        SortKey::CommentsDesc,
        SortKey::TitleAsc,
    ];

    /// The canonical name, e.g. `date-desc`.
    pub fn name(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::LikesDesc => "likes-desc",
            SortKey::CommentsDesc => "comments-desc",
            SortKey::TitleAsc => "title-asc",
        }
    }

    /// The label shown in a sort selector.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::DateDesc => "Latest",
            SortKey::LikesDesc => "Most Liked",
            SortKey::CommentsDesc => "Most Commented",
            SortKey::TitleAsc => "Title A-Z",
        }
    }

    /// Parses `s`, falling back to [`SortKey::DateDesc`] for unknown names.
    pub fn parse_lossy(s: &str) -> SortKey {
        match s.parse() {
            Ok(key) => key,
            Err(err) => {
                warn!("{}; falling back to `{}`", err, SortKey::default());
                SortKey::default()
            }
        }
    }

    /// Compares two records under this order. Ties return
    /// [`Ordering::Equal`] so that a stable sort preserves input order.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::DateDesc => b.date.cmp(&a.date),
            SortKey::LikesDesc => b.likes.cmp(&a.likes),
            SortKey::CommentsDesc => b.comments.cmp(&a.comments),
            SortKey::TitleAsc => collate(&a.title, &b.title),
        }
    }

    /// Sorts `records` in place. `sort_by` is stable.
    pub fn sort<R: AsRef<Record>>(self, records: &mut [R]) {
        records.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}

/// Orders titles ignoring case. Titles differing only in case put the
/// lower-case spelling first, as browser collation does.
fn collate(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    match folded {
        Ordering::Equal => b.cmp(a),
        other => other,
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    /// Accepts the canonical names as well as the short names the sort
    /// selector submits (`date`, `likes`, `comments`, `title`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-desc" | "date" => Ok(SortKey::DateDesc),
            "likes-desc" | "likes" => Ok(SortKey::LikesDesc),
            "comments-desc" | "comments" => Ok(SortKey::CommentsDesc),
            "title-asc" | "title" => Ok(SortKey::TitleAsc),
            _ => Err(UnknownSortKey(s.to_owned())),
        }
    }
}

impl std::convert::TryFrom<String> for SortKey {
    type Error = UnknownSortKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Returned when parsing a name that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl fmt::Display for UnknownSortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown sort key `{}`", self.0)
    }
}

impl std::error::Error for UnknownSortKey {}
