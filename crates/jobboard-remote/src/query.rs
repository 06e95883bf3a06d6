use jobboard_core::config::ApiSettings;
use std::num::NonZeroUsize;

use jobboard_core::types::{DateRange, SearchParams, DEFAULT_SALARY_CEILING};

/// Translates search parameters into the backend's listing query string.
///
/// Only non-default dimensions are sent. The backend has no work-mode
/// column, so the work filter never leaves the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    default_page_size: usize,
    salary_ceiling: u64,
}

impl Default for QueryBuilder {
    fn default() -> Self { Self { default_page_size: 20, salary_ceiling: DEFAULT_SALARY_CEILING } }
}

impl QueryBuilder {
    pub fn new(default_page_size: usize, salary_ceiling: u64) -> Self { Self { default_page_size, salary_ceiling } }

    pub fn from_settings(api: &ApiSettings, salary_ceiling: u64) -> Self { Self::new(api.default_page_size, salary_ceiling) }

    /// Page size the backend uses when none is sent.
    pub fn default_page_size(&self) -> Option<NonZeroUsize> { NonZeroUsize::new(self.default_page_size) }

    pub fn pairs(&self, params: &SearchParams) -> Vec<(&'static str, String)> {
        let filters = &params.filters;
        let mut pairs = vec![("page", params.page.to_string())];
        if params.limit.get() != self.default_page_size { pairs.push(("page_size", params.limit.to_string())); }
        if !filters.search.is_empty() { pairs.push(("search", filters.search.clone())); }
        if let Some(contract) = filters.contract { pairs.push(("type_contrat", contract.as_str().to_string())); }
        if filters.salary_min > 0 { pairs.push(("salaire_min__gte", filters.salary_min.to_string())); }
        if filters.salary_max < self.salary_ceiling { pairs.push(("salaire_max__lte", filters.salary_max.to_string())); }
        if filters.date_range != DateRange::All { pairs.push(("date_range", filters.date_range.as_str().to_string())); }
        pairs
    }

    pub fn encode(&self, params: &SearchParams) -> String {
        self.pairs(params)
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
