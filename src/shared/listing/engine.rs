//! Listing Query Engine
//!
//! Filters, sorts and pages a collection, then describes how to reach the
//! neighbouring pages. The engine itself cannot fail: the only errors that
//! can come out of [`list_from`] are the item source's own, unchanged.

use std::cmp::Ordering;
use std::convert::Infallible;

use async_trait::async_trait;

use super::links::{Link, LinkTemplate};
use super::query::{FilterCriteria, FilterField, PageRequest, SortDirection, SortField, SortSpec};

/// Comparable value of a sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    Integer(i64),
    Text(&'a str),
}

/// A record the engine can filter and sort.
pub trait Listable {
    type Filter: FilterField;
    type Sort: SortField;
    /// Unique key, used as the ascending tie-break on equal sort values.
    type Key: Ord;

    fn filter_text(&self, field: Self::Filter) -> &str;
    fn sort_key(&self, field: Self::Sort) -> SortKey<'_>;
    fn unique_key(&self) -> Self::Key;
}

/// Paging metadata, absent for unpaged results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub last_page: u32,
}

/// One computed page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    /// Matching items before pagination
    pub total: u64,
    pub meta: Option<PageMeta>,
    pub links: Vec<Link>,
}

impl<T> PageResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            meta: self.meta,
            links: self.links,
        }
    }

    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.rel == rel)
    }
}

/// Window of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

/// Something that can count and fetch ordered items (a table, a vector...).
#[async_trait]
pub trait ItemSource<T: Listable>: Send + Sync {
    type Error: Send;

    async fn count(&self, filter: &FilterCriteria<T::Filter>) -> Result<u64, Self::Error>;

    /// Matching items in `sort` order (unique-key tie-break), restricted to
    /// `window` when given.
    async fn fetch(
        &self,
        filter: &FilterCriteria<T::Filter>,
        sort: SortSpec<T::Sort>,
        window: Option<Window>,
    ) -> Result<Vec<T>, Self::Error>;
}

/// `max(1, ceil(total / page_size))`. `page_size` must be non-zero.
pub fn last_page(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(page_size as u64).max(1);
    pages.min(u32::MAX as u64) as u32
}

/// Navigation for a paged result: self, prev (page > 1), next
/// (page < last), last.
pub fn navigation(page: u32, page_size: u32, last_page: u32, links: &LinkTemplate) -> Vec<Link> {
    let mut nav = vec![links.link("self", page, page_size)];
    if page > 1 {
        nav.push(links.link("prev", page - 1, page_size));
    }
    if page < last_page {
        nav.push(links.link("next", page + 1, page_size));
    }
    nav.push(links.link("last", last_page, page_size));
    nav
}

/// Total order used by the engine: the sort field in the requested
/// direction, then the unique key ascending.
pub fn compare<T: Listable>(a: &T, b: &T, sort: SortSpec<T::Sort>) -> Ordering {
    let primary = a.sort_key(sort.field).cmp(&b.sort_key(sort.field));
    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| a.unique_key().cmp(&b.unique_key()))
}

fn filter_and_sort<T: Listable>(
    items: impl IntoIterator<Item = T>,
    filter: &FilterCriteria<T::Filter>,
    sort: SortSpec<T::Sort>,
) -> Vec<T> {
    let mut matching: Vec<T> = items
        .into_iter()
        .filter(|item| filter.matches_with(|field| item.filter_text(field)))
        .collect();
    matching.sort_by(|a, b| compare(a, b, sort));
    matching
}

fn unpaged<T>(items: Vec<T>, links: &LinkTemplate) -> PageResult<T> {
    PageResult {
        total: items.len() as u64,
        items,
        meta: None,
        links: vec![links.link("self", 1, 0)],
    }
}

fn paged<T>(items: Vec<T>, total: u64, page: PageRequest, links: &LinkTemplate) -> PageResult<T> {
    let last = last_page(total, page.page_size());
    PageResult {
        items,
        total,
        meta: Some(PageMeta {
            page: page.page(),
            page_size: page.page_size(),
            last_page: last,
        }),
        links: navigation(page.page(), page.page_size(), last, links),
    }
}

/// Compute a page over an in-memory collection.
pub fn list<T: Listable>(
    items: impl IntoIterator<Item = T>,
    filter: &FilterCriteria<T::Filter>,
    sort: SortSpec<T::Sort>,
    page: PageRequest,
    links: &LinkTemplate,
) -> PageResult<T> {
    let matching = filter_and_sort(items, filter, sort);
    if page.is_unpaged() {
        return unpaged(matching, links);
    }

    let total = matching.len() as u64;
    let window: Vec<T> = matching
        .into_iter()
        .skip(page.offset().min(usize::MAX as u64) as usize)
        .take(page.page_size() as usize)
        .collect();
    paged(window, total, page, links)
}

/// Compute a page against an [`ItemSource`]. Source errors are returned as-is.
pub async fn list_from<T, S>(
    source: &S,
    filter: &FilterCriteria<T::Filter>,
    sort: SortSpec<T::Sort>,
    page: PageRequest,
    links: &LinkTemplate,
) -> Result<PageResult<T>, S::Error>
where
    T: Listable,
    S: ItemSource<T> + ?Sized,
{
    if page.is_unpaged() {
        let items = source.fetch(filter, sort, None).await?;
        return Ok(unpaged(items, links));
    }

    let total = source.count(filter).await?;
    let items = if page.offset() >= total {
        Vec::new()
    } else {
        let window = Window {
            offset: page.offset(),
            limit: page.page_size() as u64,
        };
        source.fetch(filter, sort, Some(window)).await?
    };
    Ok(paged(items, total, page, links))
}

/// [`ItemSource`] over an owned snapshot.
#[derive(Debug, Clone)]
pub struct InMemorySource<T> {
    items: Vec<T>,
}

impl<T> InMemorySource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl<T> ItemSource<T> for InMemorySource<T>
where
    T: Listable + Clone + Send + Sync,
{
    type Error = Infallible;

    async fn count(&self, filter: &FilterCriteria<T::Filter>) -> Result<u64, Self::Error> {
        Ok(self
            .items
            .iter()
            .filter(|item| filter.matches_with(|field| item.filter_text(field)))
            .count() as u64)
    }

    async fn fetch(
        &self,
        filter: &FilterCriteria<T::Filter>,
        sort: SortSpec<T::Sort>,
        window: Option<Window>,
    ) -> Result<Vec<T>, Self::Error> {
        let sorted = filter_and_sort(self.items.iter().cloned(), filter, sort);
        Ok(match window {
            Some(w) => sorted
                .into_iter()
                .skip(w.offset.min(usize::MAX as u64) as usize)
                .take(w.limit.min(usize::MAX as u64) as usize)
                .collect(),
            None => sorted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Bike {
        id: u32,
        model: String,
        plate: String,
        year: i64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum BikeFilter {
        Model,
        Plate,
    }

    impl FilterField for BikeFilter {
        fn as_str(&self) -> &'static str {
            match self {
                BikeFilter::Model => "model",
                BikeFilter::Plate => "plate",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum BikeSort {
        Model,
        Year,
    }

    impl SortField for BikeSort {
        const DEFAULT: Self = BikeSort::Model;

        fn as_str(&self) -> &'static str {
            match self {
                BikeSort::Model => "model",
                BikeSort::Year => "year",
            }
        }

        fn parse(s: &str) -> Option<Self> {
            match s {
                "model" => Some(BikeSort::Model),
                "year" => Some(BikeSort::Year),
                _ => None,
            }
        }
    }

    impl Listable for Bike {
        type Filter = BikeFilter;
        type Sort = BikeSort;
        type Key = u32;

        fn filter_text(&self, field: BikeFilter) -> &str {
            match field {
                BikeFilter::Model => &self.model,
                BikeFilter::Plate => &self.plate,
            }
        }

        fn sort_key(&self, field: BikeSort) -> SortKey<'_> {
            match field {
                BikeSort::Model => SortKey::Text(&self.model),
                BikeSort::Year => SortKey::Integer(self.year),
            }
        }

        fn unique_key(&self) -> u32 {
            self.id
        }
    }

    fn bike(id: u32, model: &str, year: i64) -> Bike {
        Bike {
            id,
            model: model.to_string(),
            plate: format!("ABC{:04}", id),
            year,
        }
    }

    fn five_bikes() -> Vec<Bike> {
        vec![
            bike(1, "NMax 160", 2023),
            bike(2, "CG 160", 2022),
            bike(3, "Pop 110i", 2021),
            bike(4, "CG 125", 2020),
            bike(5, "Biz 125", 2022),
        ]
    }

    /// 25 bikes whose model order matches their id order.
    fn twenty_five_bikes() -> Vec<Bike> {
        (1..=25)
            .rev()
            .map(|i| bike(i, &format!("Model {:02}", i), 2000 + i as i64))
            .collect()
    }

    fn tpl() -> LinkTemplate {
        LinkTemplate::new("/bikes")
    }

    #[test]
    fn filter_sort_and_single_page() {
        let filter = FilterCriteria::new().with(BikeFilter::Model, Some("cg"));
        let sort = SortSpec::new(BikeSort::Model, SortDirection::Asc);
        let result = list(five_bikes(), &filter, sort, PageRequest::new(1, 20), &tpl());

        let models: Vec<&str> = result.items.iter().map(|b| b.model.as_str()).collect();
        assert_eq!(models, vec!["CG 125", "CG 160"]);
        assert_eq!(result.total, 2);
        assert_eq!(result.meta.map(|m| m.last_page), Some(1));
        assert!(result.link("prev").is_none());
        assert!(result.link("next").is_none());
        assert!(result.link("self").is_some());
        assert!(result.link("last").is_some());
    }

    #[test]
    fn middle_page_has_prev_and_next() {
        let result = list(
            twenty_five_bikes(),
            &FilterCriteria::new(),
            SortSpec::default(),
            PageRequest::new(2, 10),
            &tpl(),
        );

        let ids: Vec<u32> = result.items.iter().map(|b| b.id).collect();
        assert_eq!(ids, (11..=20).collect::<Vec<_>>());
        assert_eq!(result.total, 25);
        assert_eq!(
            result.meta,
            Some(PageMeta {
                page: 2,
                page_size: 10,
                last_page: 3
            })
        );
        assert_eq!(
            result.link("prev").map(|l| l.href.as_str()),
            Some("/bikes?page=1&page_size=10")
        );
        assert_eq!(
            result.link("next").map(|l| l.href.as_str()),
            Some("/bikes?page=3&page_size=10")
        );
        assert_eq!(
            result.link("last").map(|l| l.href.as_str()),
            Some("/bikes?page=3&page_size=10")
        );
    }

    #[test]
    fn zero_page_size_returns_everything_with_one_link() {
        let result = list(
            twenty_five_bikes(),
            &FilterCriteria::new(),
            SortSpec::default(),
            PageRequest::unpaged(),
            &tpl(),
        );

        assert_eq!(result.items.len(), 25);
        assert_eq!(result.total, 25);
        assert!(result.meta.is_none());
        assert_eq!(result.links.len(), 1);
        assert_eq!(result.links[0].rel, "self");
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let result = list(
            twenty_five_bikes(),
            &FilterCriteria::new(),
            SortSpec::default(),
            PageRequest::new(10, 10),
            &tpl(),
        );

        assert!(result.items.is_empty());
        assert_eq!(result.total, 25);
        assert_eq!(result.meta.map(|m| m.last_page), Some(3));
        assert!(result.link("next").is_none());
        assert_eq!(
            result.link("prev").map(|l| l.href.as_str()),
            Some("/bikes?page=9&page_size=10")
        );
    }

    #[test]
    fn bogus_sort_equals_default_sort() {
        let bogus = SortSpec::resolve(Some("bogusfield"), Some("desc"));
        let explicit = SortSpec::new(BikeSort::Model, SortDirection::Asc);
        let page = PageRequest::new(1, 20);
        let filter = FilterCriteria::new();

        let a = list(five_bikes(), &filter, bogus, page, &tpl());
        let b = list(five_bikes(), &filter, explicit, page, &tpl());
        assert_eq!(a.items, b.items);
    }

    #[test]
    fn descending_sort_is_monotonic_with_id_tie_break() {
        let sort = SortSpec::new(BikeSort::Year, SortDirection::Desc);
        let result = list(
            five_bikes(),
            &FilterCriteria::new(),
            sort,
            PageRequest::unpaged(),
            &tpl(),
        );

        let keys: Vec<(i64, u32)> = result.items.iter().map(|b| (b.year, b.id)).collect();
        // 2022 appears twice (ids 2 and 5): ties stay in ascending id order
        assert_eq!(keys, vec![(2023, 1), (2022, 2), (2022, 5), (2021, 3), (2020, 4)]);
    }

    #[test]
    fn repeated_calls_are_identical_regardless_of_input_order() {
        let sort = SortSpec::new(BikeSort::Year, SortDirection::Asc);
        let page = PageRequest::new(1, 3);
        let filter = FilterCriteria::new();

        let mut shuffled = five_bikes();
        shuffled.reverse();

        let a = list(five_bikes(), &filter, sort, page, &tpl());
        let b = list(shuffled, &filter, sort, page, &tpl());
        assert_eq!(a, b);
    }

    #[test]
    fn single_page_has_neither_prev_nor_next() {
        let result = list(
            five_bikes(),
            &FilterCriteria::new(),
            SortSpec::default(),
            PageRequest::new(1, 5),
            &tpl(),
        );
        assert_eq!(result.meta.map(|m| m.last_page), Some(1));
        let rels: Vec<&str> = result.links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, vec!["self", "last"]);
    }

    #[test]
    fn empty_collection_still_has_one_last_page() {
        let result = list(
            Vec::<Bike>::new(),
            &FilterCriteria::new(),
            SortSpec::default(),
            PageRequest::new(1, 10),
            &tpl(),
        );
        assert_eq!(result.total, 0);
        assert_eq!(result.meta.map(|m| m.last_page), Some(1));
    }

    #[test]
    fn last_page_formula() {
        assert_eq!(last_page(0, 10), 1);
        assert_eq!(last_page(10, 10), 1);
        assert_eq!(last_page(11, 10), 2);
        assert_eq!(last_page(25, 10), 3);
        assert_eq!(last_page(25, 1), 25);
    }

    #[test]
    fn links_keep_filters_and_sort() {
        let filter = FilterCriteria::new().with(BikeFilter::Model, Some("CG 1"));
        let sort = SortSpec::new(BikeSort::Year, SortDirection::Desc);
        let links = LinkTemplate::for_query("/bikes", &filter, &sort);

        let result = list(five_bikes(), &filter, sort, PageRequest::new(1, 1), &links);
        assert_eq!(
            result.link("next").map(|l| l.href.as_str()),
            Some("/bikes?page=2&page_size=1&model=CG+1&sort_by=year&sort_dir=desc")
        );
    }

    #[test]
    fn filtered_items_all_contain_needle() {
        let filter = FilterCriteria::new().with(BikeFilter::Plate, Some("abc000"));
        let result = list(
            twenty_five_bikes(),
            &filter,
            SortSpec::default(),
            PageRequest::unpaged(),
            &tpl(),
        );
        assert_eq!(result.total, 9);
        assert!(result
            .items
            .iter()
            .all(|b| b.plate.to_lowercase().contains("abc000")));
    }

    #[tokio::test]
    async fn in_memory_source_matches_pure_listing() {
        let filter = FilterCriteria::new().with(BikeFilter::Model, Some("model"));
        let sort = SortSpec::new(BikeSort::Year, SortDirection::Desc);
        let source = InMemorySource::new(twenty_five_bikes());

        for page in [
            PageRequest::new(1, 10),
            PageRequest::new(3, 10),
            PageRequest::new(7, 10),
            PageRequest::unpaged(),
        ] {
            let expected = list(twenty_five_bikes(), &filter, sort, page, &tpl());
            let actual = list_from::<Bike, _>(&source, &filter, sort, page, &tpl()).await.unwrap();
            assert_eq!(actual, expected);
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ItemSource<Bike> for FailingSource {
        type Error = String;

        async fn count(&self, _filter: &FilterCriteria<BikeFilter>) -> Result<u64, String> {
            Err("backing store offline".to_string())
        }

        async fn fetch(
            &self,
            _filter: &FilterCriteria<BikeFilter>,
            _sort: SortSpec<BikeSort>,
            _window: Option<Window>,
        ) -> Result<Vec<Bike>, String> {
            Err("backing store offline".to_string())
        }
    }

    #[tokio::test]
    async fn source_errors_propagate_unchanged() {
        let err = list_from::<Bike, _>(
            &FailingSource,
            &FilterCriteria::new(),
            SortSpec::default(),
            PageRequest::new(1, 10),
            &tpl(),
        )
        .await
        .unwrap_err();
        assert_eq!(err, "backing store offline");
    }
}
