//! Canonical pagination contract shared by every resource query.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sort direction requested by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters driving a resource fetch.
///
/// `page` is 1-based and `page_size` is never zero; both are clamped on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl QueryParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            search: None,
            sort_by: None,
            sort_order: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }

    /// Number of items to skip: `(page - 1) * page_size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u32 {
        self.page_size.max(1)
    }

    /// The search term, if it carries anything besides whitespace.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether moving from `self` to `next` requires a refetch.
    ///
    /// Only `page`, `page_size` and `search` count; sort fields are compared
    /// separately by resources that act on them.
    pub fn fetch_changed(&self, next: &QueryParams) -> bool {
        self.page != next.page || self.page_size != next.page_size || self.search != next.search
    }

    pub fn sort_changed(&self, next: &QueryParams) -> bool {
        self.sort_by != next.sort_by || self.sort_order != next.sort_order
    }
}

/// `ceil(total / page_size)`; zero when `page_size` is zero.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}

/// The single page shape every resource converges to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    /// A page whose items were already sliced by the server.
    pub fn from_server(items: Vec<T>, total: u64, params: &QueryParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            page_size: params.page_size,
            total_pages: total_pages(total, params.page_size),
        }
    }

    /// Slice a complete, already filtered collection on the client.
    ///
    /// `total` is the length of `all`; pages past the end yield no items.
    pub fn from_full_list(all: Vec<T>, params: &QueryParams) -> Self {
        let total = all.len() as u64;
        let offset = usize::try_from(params.offset()).unwrap_or(usize::MAX);
        let items = all
            .into_iter()
            .skip(offset)
            .take(params.limit() as usize)
            .collect();
        Self::from_server(items, total, params)
    }

    pub fn empty(params: &QueryParams) -> Self {
        Self::from_server(Vec::new(), 0, params)
    }
}
