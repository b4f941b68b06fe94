//! Navigation descriptors (HATEOAS links)

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::ToSchema;

use super::query::{FilterCriteria, FilterField, SortField, SortSpec};

/// A navigation descriptor: relation, target and HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    /// Relation name (`self`, `prev`, `next`, `last`, `update`, ...)
    pub rel: String,
    /// Target path, including the query string when relevant
    pub href: String,
    /// HTTP method to use against `href`
    pub method: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            method: method.into(),
        }
    }

    pub fn get(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(rel, href, "GET")
    }
}

/// Rebuilds listing URLs for arbitrary pages while keeping the caller's
/// filters and the resolved sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplate {
    base_path: String,
    params: Vec<(&'static str, String)>,
}

impl LinkTemplate {
    /// Template without extra parameters.
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            params: Vec::new(),
        }
    }

    /// Template carrying the filter terms and the resolved sort.
    pub fn for_query<F: FilterField, S: SortField>(
        base_path: impl Into<String>,
        filter: &FilterCriteria<F>,
        sort: &SortSpec<S>,
    ) -> Self {
        let mut params: Vec<(&'static str, String)> = filter
            .terms()
            .iter()
            .map(|(field, value)| (field.as_str(), value.clone()))
            .collect();
        params.push(("sort_by", sort.field.as_str().to_string()));
        params.push(("sort_dir", sort.direction.as_str().to_string()));

        Self {
            base_path: base_path.into(),
            params,
        }
    }

    /// Target for `page` with `page_size`.
    pub fn href(&self, page: u32, page_size: u32) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &page.to_string());
        query.append_pair("page_size", &page_size.to_string());
        for (name, value) in &self.params {
            query.append_pair(name, value);
        }
        format!("{}?{}", self.base_path, query.finish())
    }

    pub fn link(&self, rel: &str, page: u32, page_size: u32) -> Link {
        Link::get(rel, self.href(page, page_size))
    }
}
