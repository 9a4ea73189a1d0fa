//! Core domain entities.
//!
//! The service has a single entity, [`Link`], plus the input and query types
//! used to create and list it:
//!
//! - [`NewLink`] - Data for inserting a link
//! - [`LinkFilter`] - Search and ordering for listings

pub mod link;

pub use link::{Link, LinkFilter, LinkSort, NewLink, SortOrder};
