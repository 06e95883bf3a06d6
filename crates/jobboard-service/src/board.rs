use chrono::{DateTime, Utc};

use jobboard_core::error::Result;
use jobboard_core::traits::RecordSource;
use jobboard_core::types::{page_count, Fetched, JobId, JobRecord, PageToken, SearchParams, SearchResult, DEFAULT_SALARY_CEILING};
use jobboard_search::{page_window, JobCatalog};

use crate::generation::SearchGeneration;

/// The job listing as the UI sees it: one source, searched page by page.
///
/// Candidates coming from the source are matched, sorted and paged locally.
/// Pages already assembled by a backend are passed through with the same
/// page arithmetic; a source only answers with a page when its backend
/// evaluated every active filter dimension, and falls back to candidates
/// otherwise.
pub struct JobBoard<S> {
    source: S,
    salary_ceiling: u64,
    generation: SearchGeneration,
}

impl<S: RecordSource> JobBoard<S> {
    pub fn new(source: S) -> Self { Self { source, salary_ceiling: DEFAULT_SALARY_CEILING, generation: SearchGeneration::new() } }

    pub fn with_salary_ceiling(mut self, ceiling: u64) -> Self { self.salary_ceiling = ceiling; self }

    pub fn source(&self) -> &S { &self.source }

    pub async fn search(&self, params: &SearchParams) -> Result<SearchResult> { self.search_at(params, Utc::now()).await }

    pub async fn search_at(&self, params: &SearchParams, now: DateTime<Utc>) -> Result<SearchResult> {
        match self.source.fetch(params).await? {
            Fetched::Candidates(records) => {
                Ok(JobCatalog::new(records).with_salary_ceiling(self.salary_ceiling).search_at(params, now))
            }
            Fetched::Page { jobs, total } => Ok(SearchResult {
                jobs,
                total,
                total_pages: page_count(total, params.limit),
                current_page: params.page.get(),
            }),
        }
    }

    /// Runs [`JobBoard::search`] and returns `None` if another search started
    /// on this board before this one resolved. Failures of a superseded search
    /// are dropped as well.
    pub async fn search_latest(&self, params: &SearchParams) -> Result<Option<SearchResult>> {
        let ticket = self.generation.begin();
        let outcome = self.search(params).await;
        if !self.generation.is_current(ticket) {
            tracing::warn!(page = params.page.get(), "discarding stale search response");
            return Ok(None);
        }
        outcome.map(Some)
    }

    pub async fn by_id(&self, id: JobId) -> Result<Option<JobRecord>> { self.source.fetch_one(id).await }

    /// Pagination bar for a result this board produced.
    pub fn page_window(&self, result: &SearchResult) -> Vec<PageToken> { page_window(result.current_page, result.total_pages) }
}
