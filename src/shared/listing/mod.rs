//! Listing Query Engine: filtering, sorting, pagination and navigation links
//! for collection endpoints.

pub mod engine;
pub mod links;
pub mod query;

pub use engine::{
    compare, last_page, list, list_from, navigation, InMemorySource, ItemSource, Listable,
    PageMeta, PageResult, SortKey, Window,
};
pub use links::{Link, LinkTemplate};
pub use query::{FilterCriteria, FilterField, PageRequest, SortDirection, SortField, SortSpec};
