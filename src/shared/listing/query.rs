//! Listing inputs: filter criteria, sort specification and page request.
//!
//! Every constructor here is lenient. Unknown sort fields, unknown
//! directions, non-positive page numbers and negative page sizes are
//! normalised to defaults instead of being rejected.

use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a direction, returning `None` for anything unrecognised.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allow-list of sortable fields for a listable record.
pub trait SortField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Field used when the caller supplies nothing or something unknown.
    const DEFAULT: Self;

    /// Canonical name, used when rebuilding navigation links.
    fn as_str(&self) -> &'static str;

    /// Parse a caller-supplied name. Returns `None` for names outside the allow-list.
    fn parse(s: &str) -> Option<Self>;
}

/// Allow-list of text fields that accept substring filters.
pub trait FilterField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Query parameter name carrying this filter.
    fn as_str(&self) -> &'static str;
}

/// Resolved sort: always a valid (field, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Resolve raw query values.
    ///
    /// An unknown field falls back to the default field *and* the default
    /// direction, whatever direction was asked for. A known field with an
    /// unknown direction sorts ascending.
    pub fn resolve(sort_by: Option<&str>, sort_dir: Option<&str>) -> Self {
        match sort_by.and_then(F::parse) {
            Some(field) => Self {
                field,
                direction: sort_dir.and_then(SortDirection::parse).unwrap_or_default(),
            },
            None => Self::default(),
        }
    }
}

impl<F: SortField> Default for SortSpec<F> {
    fn default() -> Self {
        Self {
            field: F::DEFAULT,
            direction: SortDirection::Asc,
        }
    }
}

/// Conjunction of case-insensitive substring filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria<F> {
    terms: Vec<(F, String)>,
}

impl<F: FilterField> FilterCriteria<F> {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a term. `None` and whitespace-only values are ignored.
    pub fn with(mut self, field: F, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            let value = value.into();
            if !value.trim().is_empty() {
                self.terms.retain(|(f, _)| *f != field);
                self.terms.push((field, value));
            }
        }
        self
    }

    pub fn terms(&self) -> &[(F, String)] {
        &self.terms
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.terms
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether every term matches, using `text` to read a field value.
    pub fn matches_with<'a>(&self, text: impl Fn(F) -> &'a str) -> bool {
        self.terms
            .iter()
            .all(|(field, needle)| contains_ignore_case(text(*field), needle))
    }
}

impl<F: FilterField> Default for FilterCriteria<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Page request. `page_size == 0` means "everything, unpaged".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request, clamping the page number to at least 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    pub fn unpaged() -> Self {
        Self::new(1, 0)
    }

    /// Build a request from raw (possibly missing or negative) query values.
    ///
    /// A missing or negative page size uses `default_size`; positive sizes
    /// are capped at `max_size`. Zero is kept as the unpaged sentinel.
    pub fn from_query(
        page: Option<i64>,
        page_size: Option<i64>,
        default_size: u32,
        max_size: u32,
    ) -> Self {
        let page = page.unwrap_or(1).clamp(1, u32::MAX as i64) as u32;
        let page_size = match page_size {
            Some(0) => 0,
            Some(size) if size > 0 => size.min(max_size.max(1) as i64) as u32,
            _ => default_size,
        };
        Self::new(page, page_size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_unpaged(&self) -> bool {
        self.page_size == 0
    }

    /// Zero-based offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        Size,
    }

    impl SortField for Field {
        const DEFAULT: Self = Field::Name;

        fn as_str(&self) -> &'static str {
            match self {
                Field::Name => "name",
                Field::Size => "size",
            }
        }

        fn parse(s: &str) -> Option<Self> {
            match s.to_ascii_lowercase().as_str() {
                "name" => Some(Field::Name),
                "size" => Some(Field::Size),
                _ => None,
            }
        }
    }

    impl FilterField for Field {
        fn as_str(&self) -> &'static str {
            SortField::as_str(self)
        }
    }

    #[test]
    fn unknown_sort_field_ignores_requested_direction() {
        let spec = SortSpec::<Field>::resolve(Some("bogusfield"), Some("desc"));
        assert_eq!(spec, SortSpec::new(Field::Name, SortDirection::Asc));
    }

    #[test]
    fn known_field_with_unknown_direction_sorts_ascending() {
        let spec = SortSpec::<Field>::resolve(Some("SIZE"), Some("sideways"));
        assert_eq!(spec, SortSpec::new(Field::Size, SortDirection::Asc));
    }

    #[test]
    fn direction_parse_is_case_insensitive() {
        assert_eq!(SortDirection::parse(" DESC "), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("Asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse(""), None);
    }

    #[test]
    fn blank_filters_are_dropped() {
        let filter = FilterCriteria::new()
            .with(Field::Name, Some("   "))
            .with(Field::Size, None::<String>);
        assert!(filter.is_empty());
    }

    #[test]
    fn filter_matches_all_terms_ignoring_case() {
        let filter = FilterCriteria::new()
            .with(Field::Name, Some("cg"))
            .with(Field::Size, Some("16"));
        assert!(filter.matches_with(|f| match f {
            Field::Name => "Honda CG 160",
            Field::Size => "160cc",
        }));
        assert!(!filter.matches_with(|f| match f {
            Field::Name => "NMax 160",
            Field::Size => "160cc",
        }));
    }

    #[test]
    fn repeated_filter_field_keeps_last_value() {
        let filter = FilterCriteria::new()
            .with(Field::Name, Some("a"))
            .with(Field::Name, Some("b"));
        assert_eq!(filter.terms().len(), 1);
        assert_eq!(filter.get(Field::Name), Some("b"));
    }

    #[test]
    fn page_is_clamped_to_one() {
        assert_eq!(PageRequest::new(0, 10).page(), 1);
        assert_eq!(PageRequest::from_query(Some(-5), Some(10), 20, 100).page(), 1);
    }

    #[test]
    fn page_size_defaults_and_caps() {
        assert_eq!(PageRequest::from_query(None, None, 20, 100).page_size(), 20);
        assert_eq!(PageRequest::from_query(None, Some(-3), 20, 100).page_size(), 20);
        assert_eq!(PageRequest::from_query(None, Some(500), 20, 100).page_size(), 100);
        assert!(PageRequest::from_query(None, Some(0), 20, 100).is_unpaged());
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }
}
