use serde::Deserialize;
use std::future::Future;
use std::num::NonZeroUsize;

use jobboard_core::error::{Error, Result};
use jobboard_core::traits::RecordSource;
use jobboard_core::types::{Fetched, JobId, JobRecord, SearchParams};

use crate::mapping::ApiJob;
use crate::query::QueryBuilder;

/// Minimal GET-only view of the HTTP client.
///
/// `path` is relative to the API root and already carries its query string.
/// Implementations return the response body, `Error::NotFound` for a 404 and
/// `Error::Source` for any other failure.
pub trait Transport: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<String>> + Send;
}

/// The listing endpoint answers with a paginated envelope, or with a bare
/// array when pagination is disabled server side.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Paginated { count: usize, results: Vec<ApiJob> },
    Plain(Vec<ApiJob>),
}

/// Record source backed by the job board's REST API.
pub struct DrfSource<T> {
    transport: T,
    query: QueryBuilder,
    base_url: String,
}

impl<T: Transport> DrfSource<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self { transport, query: QueryBuilder::default(), base_url: base_url.into() }
    }

    pub fn with_query_builder(mut self, query: QueryBuilder) -> Self { self.query = query; self }

    pub fn transport(&self) -> &T { &self.transport }

    fn map_records(&self, jobs: Vec<ApiJob>) -> Vec<JobRecord> {
        jobs.into_iter()
            .filter_map(|job| match job.into_record(&self.base_url) {
                Ok(record) => Some(record),
                Err(e) => { tracing::warn!(error = %e, "skipping job from backend"); None }
            })
            .collect()
    }
}

impl<T: Transport> DrfSource<T> {
    async fn listing(&self, params: &SearchParams) -> Result<Listing> {
        let path = format!("/jobs/publiques/?{}", self.query.encode(params));
        let body = self.transport.get(&path).await?;
        serde_json::from_str(&body).map_err(|e| Error::decode(path.as_str(), e))
    }

    /// Every record the backend matches on the dimensions it understands,
    /// read page by page at the backend's default page size.
    async fn scan(&self, params: &SearchParams) -> Result<Vec<JobRecord>> {
        let limit = self.query.default_page_size().unwrap_or(params.limit);
        let mut records = Vec::new();
        let mut seen = 0;
        for page in (1..).filter_map(NonZeroUsize::new) {
            let batch = SearchParams::new(page, limit, params.filters.clone());
            match self.listing(&batch).await? {
                Listing::Paginated { count, results } => {
                    let returned = results.len();
                    seen += returned;
                    records.extend(self.map_records(results));
                    if returned == 0 || seen >= count { break; }
                }
                Listing::Plain(all) => {
                    records.extend(self.map_records(all));
                    break;
                }
            }
        }
        tracing::debug!(pages_read = seen.div_ceil(limit.get()), candidates = records.len(), "scanned backend listing");
        Ok(records)
    }
}

impl<T: Transport> RecordSource for DrfSource<T> {
    /// A backend page is only trusted when the backend saw every active
    /// dimension. With a work-mode filter the matching rows are collected
    /// and handed back as candidates for local matching and paging.
    async fn fetch(&self, params: &SearchParams) -> Result<Fetched> {
        if params.filters.work.is_some() {
            return Ok(Fetched::Candidates(self.scan(params).await?));
        }
        match self.listing(params).await? {
            Listing::Paginated { count, results } => {
                tracing::debug!(count, returned = results.len(), "backend returned a page");
                Ok(Fetched::Page { jobs: self.map_records(results), total: count })
            }
            Listing::Plain(all) => {
                tracing::warn!(returned = all.len(), "backend returned an unpaginated list, paging client side");
                Ok(Fetched::Candidates(self.map_records(all)))
            }
        }
    }

    async fn fetch_one(&self, id: JobId) -> Result<Option<JobRecord>> {
        let path = format!("/jobs/{id}/");
        let body = match self.transport.get(&path).await {
            Ok(body) => body,
            Err(Error::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        let job: ApiJob = serde_json::from_str(&body).map_err(|e| Error::decode(path.as_str(), e))?;
        job.into_record(&self.base_url).map(Some)
    }
}
