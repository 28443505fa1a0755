//! The library code for `quire`, an in-memory query engine for the listing
//! pages of a static content site. A listing shows a collection of posts
//! (all of them, or those of one author, category, or tag) and lets the reader
//! search, filter, sort, and page through it. The architecture breaks down
//! into a pipeline that every listing shares:
//!
//! 1. Filtering records with a [`predicate::Predicate`] built from the current
//!    [`criteria::Criteria`] and the listing's [`facet::Facets`]
//! 2. Ordering the survivors with a stable [`sort::SortKey`]
//! 3. Slicing out the current page and its page-number window
//!    ([`page`])
//!
//! [`session::QuerySession`] owns the criteria for one open view and re-runs
//! the pipeline on every change. [`listing::Listing`] sets up a session for
//! each kind of listing page, and [`dataset`] and [`config`] load the content
//! and settings those listings are built from.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod config;
pub mod criteria;
pub mod dataset;
pub mod facet;
pub mod listing;
pub mod page;
pub mod predicate;
pub mod record;
pub mod session;
pub mod sort;
pub mod tag;
