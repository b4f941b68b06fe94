//! Query strings read as ordered key/value pairs.
//!
//! Listing parameters are normalised rather than rejected, so repeated keys
//! and mixed English/Portuguese names must not fail extraction the way a
//! strict `Query<T>` does. The first occurrence wins.

use axum::http::Uri;
use url::form_urlencoded;

#[derive(Debug, Default, Clone)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn parse(query: &str) -> Self {
        Self(form_urlencoded::parse(query.as_bytes()).into_owned().collect())
    }

    pub fn from_uri(uri: &Uri) -> Self {
        uri.query().map(Self::parse).unwrap_or_default()
    }

    /// Value of the earliest pair whose key is any of `names`.
    pub fn first(&self, names: &[&str]) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| names.contains(&key.as_str()))
            .map(|(_, value)| value.as_str())
    }

    /// Like [`first`](Self::first), with an unparseable number read as absent.
    pub fn first_number(&self, names: &[&str]) -> Option<i64> {
        self.first(names).and_then(|v| v.trim().parse().ok())
    }
}
