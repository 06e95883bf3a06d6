//! Domain types shared by the search engine, the record sources and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::error::Error;

pub type JobId = u64;

/// Upper bound of the salary slider. A filter whose `salary_max` sits at this
/// value does not constrain salaries from above.
pub const DEFAULT_SALARY_CEILING: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "CDI")]
    Cdi,
    #[serde(rename = "CDD")]
    Cdd,
    Stage,
    Freelance,
    Alternance,
}

impl ContractType {
    pub const ALL: [ContractType; 5] = [Self::Cdi, Self::Cdd, Self::Stage, Self::Freelance, Self::Alternance];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cdi => "CDI",
            Self::Cdd => "CDD",
            Self::Stage => "Stage",
            Self::Freelance => "Freelance",
            Self::Alternance => "Alternance",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ContractType {
    type Err = Error;

    /// Exact, case-sensitive match on the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownValue { kind: "contract type", value: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkMode {
    Remote,
    Hybride,
    #[serde(rename = "Présentiel")]
    Presentiel,
}

impl WorkMode {
    pub const ALL: [WorkMode; 3] = [Self::Remote, Self::Hybride, Self::Presentiel];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybride => "Hybride",
            Self::Presentiel => "Présentiel",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for WorkMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| Error::UnknownValue { kind: "work mode", value: s.to_string() })
    }
}

/// Recency window applied to `JobRecord::created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    /// Largest accepted age in whole days, `None` when the window is open.
    pub fn max_age_days(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Today => Some(0),
            Self::Week => Some(7),
            Self::Month => Some(30),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(Error::UnknownValue { kind: "date range", value: other.to_string() }),
        }
    }
}

/// A job offer as rendered by the listing.
///
/// - `salary`: free-text display string (e.g. `"45000€ - 65000€"`)
/// - `keywords`: ordered, at most a handful of tags
/// - `created_at`: publication time, drives recency sort and date filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    pub company: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub contract: ContractType,
    pub work: WorkMode,
    pub location: String,
    pub salary: String,
    pub experience: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Filters chosen in the listing sidebar. `None` on `contract`/`work` means "all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub search: String,
    pub contract: Option<ContractType>,
    pub work: Option<WorkMode>,
    pub salary_min: u64,
    pub salary_max: u64,
    pub date_range: DateRange,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            search: String::new(),
            contract: None,
            work: None,
            salary_min: 0,
            salary_max: DEFAULT_SALARY_CEILING,
            date_range: DateRange::All,
        }
    }
}

impl FilterSet {
    pub fn with_search(mut self, search: impl Into<String>) -> Self { self.search = search.into(); self }
    pub fn with_contract(mut self, contract: ContractType) -> Self { self.contract = Some(contract); self }
    pub fn with_work(mut self, work: WorkMode) -> Self { self.work = Some(work); self }
    pub fn with_salary(mut self, min: u64, max: u64) -> Self { self.salary_min = min; self.salary_max = max; self }
    pub fn with_date_range(mut self, range: DateRange) -> Self { self.date_range = range; self }

    /// True when the salary bounds narrow the `[0, ceiling]` range.
    pub fn salary_constrained_by(&self, ceiling: u64) -> bool {
        self.salary_min > 0 || self.salary_max < ceiling
    }

    /// Number of filter dimensions that differ from the identity filter,
    /// salary being judged against the configured `salary_ceiling`.
    pub fn active_count(&self, salary_ceiling: u64) -> usize {
        [
            !self.search.is_empty(),
            self.contract.is_some(),
            self.work.is_some(),
            self.salary_constrained_by(salary_ceiling),
            self.date_range != DateRange::All,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// One query against the listing. Both `page` (1-based) and `limit` are non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub page: NonZeroUsize,
    pub limit: NonZeroUsize,
    #[serde(default)]
    pub filters: FilterSet,
}

impl SearchParams {
    pub fn new(page: NonZeroUsize, limit: NonZeroUsize, filters: FilterSet) -> Self { Self { page, limit, filters } }

    pub fn first_page(limit: NonZeroUsize, filters: FilterSet) -> Self { Self::new(NonZeroUsize::MIN, limit, filters) }

    /// Index of the first record of the requested page.
    pub fn offset(&self) -> usize { (self.page.get() - 1).saturating_mul(self.limit.get()) }
}

/// `ceil(total / limit)`, zero when there is nothing to page.
pub fn page_count(total: usize, limit: NonZeroUsize) -> usize { total.div_ceil(limit.get()) }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub jobs: Vec<JobRecord>,
    pub total: usize,
    pub total_pages: usize,
    /// Echo of the requested page, even when it lies past `total_pages`.
    pub current_page: usize,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool { self.jobs.is_empty() }
}

/// What a record source hands back for a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Unfiltered candidates; matching, sorting and paging happen locally.
    Candidates(Vec<JobRecord>),
    /// A page already matched on every active dimension, sorted and sliced
    /// by the backend.
    Page { jobs: Vec<JobRecord>, total: usize },
}

/// One control in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(n) => serializer.serialize_u64(*n as u64),
            Self::Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_parsing_is_case_sensitive() {
        assert_eq!("CDI".parse::<ContractType>().expect("parse"), ContractType::Cdi);
        assert!("cdi".parse::<ContractType>().is_err());
        assert_eq!("Présentiel".parse::<WorkMode>().expect("parse"), WorkMode::Presentiel);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&(ContractType::Cdd, WorkMode::Presentiel, DateRange::Week)).expect("ser");
        assert_eq!(json, r#"["CDD","Présentiel","week"]"#);
    }

    #[test]
    fn default_filter_has_no_active_dimension() {
        let filters = FilterSet::default();
        assert_eq!(filters.active_count(DEFAULT_SALARY_CEILING), 0);
        assert!(!filters.salary_constrained_by(DEFAULT_SALARY_CEILING));
    }

    #[test]
    fn active_count_counts_salary_once() {
        let filters = FilterSet::default()
            .with_search("rust")
            .with_contract(ContractType::Cdi)
            .with_salary(30_000, 60_000)
            .with_date_range(DateRange::Month);
        assert_eq!(filters.active_count(DEFAULT_SALARY_CEILING), 4);
    }

    #[test]
    fn untouched_salary_is_inactive_under_a_lower_ceiling() {
        let filters = FilterSet { salary_max: 50_000, ..FilterSet::default() };
        assert_eq!(filters.active_count(50_000), 0);
        assert_eq!(filters.active_count(DEFAULT_SALARY_CEILING), 1);
        assert_eq!(filters.with_salary(0, 40_000).active_count(50_000), 1);
    }

    #[test]
    fn page_count_rounds_up() {
        let ten = NonZeroUsize::new(10).expect("non-zero");
        assert_eq!(page_count(0, ten), 0);
        assert_eq!(page_count(10, ten), 1);
        assert_eq!(page_count(12, ten), 2);
    }

    #[test]
    fn page_token_serialises_as_number_or_marker() {
        let json = serde_json::to_string(&[PageToken::Page(1), PageToken::Ellipsis]).expect("ser");
        assert_eq!(json, r#"[1,"ellipsis"]"#);
    }
}
