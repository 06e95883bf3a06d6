//! Turns a candidate set into one page of results.
use chrono::{DateTime, Utc};

use jobboard_core::types::{page_count, JobId, JobRecord, SearchParams, SearchResult, DEFAULT_SALARY_CEILING};

use crate::filter::Predicate;

/// Filter, sort most recent first and slice the requested page.
///
/// Records sharing a timestamp keep their input order. A page past the end
/// yields an empty `jobs` with `current_page` still echoing the request.
pub fn assemble<'a, I>(records: I, params: &SearchParams, now: DateTime<Utc>) -> SearchResult
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    assemble_with(records, params, Predicate::new(&params.filters, now))
}

fn assemble_with<'a, I>(records: I, params: &SearchParams, predicate: Predicate<'_>) -> SearchResult
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut matched: Vec<&JobRecord> = records.into_iter().filter(|r| predicate.matches(r)).collect();
    // sort_by is stable
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = matched.len();
    let jobs: Vec<JobRecord> = matched.into_iter().skip(params.offset()).take(params.limit.get()).cloned().collect();
    tracing::debug!(total, page = params.page.get(), returned = jobs.len(), "assembled search page");
    SearchResult { jobs, total, total_pages: page_count(total, params.limit), current_page: params.page.get() }
}

/// An in-memory snapshot of the listing.
#[derive(Debug, Clone)]
pub struct JobCatalog {
    records: Vec<JobRecord>,
    salary_ceiling: u64,
}

impl JobCatalog {
    pub fn new(records: Vec<JobRecord>) -> Self { Self { records, salary_ceiling: DEFAULT_SALARY_CEILING } }

    pub fn with_salary_ceiling(mut self, ceiling: u64) -> Self { self.salary_ceiling = ceiling; self }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn records(&self) -> &[JobRecord] { &self.records }

    pub fn search(&self, params: &SearchParams) -> SearchResult { self.search_at(params, Utc::now()) }

    /// Like [`JobCatalog::search`], with the date filters evaluated at `now`.
    pub fn search_at(&self, params: &SearchParams, now: DateTime<Utc>) -> SearchResult {
        let predicate = Predicate::new(&params.filters, now).with_salary_ceiling(self.salary_ceiling);
        assemble_with(&self.records, params, predicate)
    }

    pub fn by_id(&self, id: JobId) -> Option<&JobRecord> { self.records.iter().find(|r| r.id == id) }
}

impl From<Vec<JobRecord>> for JobCatalog {
    fn from(records: Vec<JobRecord>) -> Self { Self::new(records) }
}
