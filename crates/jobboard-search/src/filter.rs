//! Match decision for one record against one filter set.
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

use jobboard_core::types::{FilterSet, JobRecord, DEFAULT_SALARY_CEILING};

const MILLIS_PER_DAY: i64 = 86_400_000;

fn salary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // digits (optionally grouped by thousands with plain, no-break or narrow
    // no-break spaces) directly followed by a euro marker
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d{1,3}(?:[ \u{a0}\u{202f}]\d{3})+|\d+)\s*(?:€|euros?\b)")
            .unwrap_or_else(|e| unreachable!("salary pattern is a valid regex: {e}"))
    })
}

/// First amount written in front of a euro marker, e.g. `45000` for
/// `"45000€ - 65000€"`. Only the first amount is read; ranges are not parsed.
pub fn extract_salary(display: &str) -> Option<u64> {
    let caps = salary_regex().captures(display)?;
    let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Whole days elapsed since `created_at`, floored. Future dates are negative.
pub fn age_in_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// A filter set prepared for repeated evaluation at a fixed instant.
#[derive(Debug, Clone)]
pub struct Predicate<'a> {
    filters: &'a FilterSet,
    needle: String,
    now: DateTime<Utc>,
    salary_ceiling: u64,
}

impl<'a> Predicate<'a> {
    pub fn new(filters: &'a FilterSet, now: DateTime<Utc>) -> Self {
        Self { filters, needle: filters.search.to_lowercase(), now, salary_ceiling: DEFAULT_SALARY_CEILING }
    }

    /// Ceiling below which `salary_max` starts constraining results.
    pub fn with_salary_ceiling(mut self, ceiling: u64) -> Self { self.salary_ceiling = ceiling; self }

    pub fn matches(&self, record: &JobRecord) -> bool {
        self.text_matches(record)
            && self.filters.contract.map_or(true, |c| record.contract == c)
            && self.filters.work.map_or(true, |w| record.work == w)
            && self.salary_matches(record)
            && self.date_matches(record)
    }

    fn text_matches(&self, record: &JobRecord) -> bool {
        if self.needle.is_empty() { return true; }
        let hit = |s: &str| s.to_lowercase().contains(&self.needle);
        hit(&record.title) || hit(&record.company) || hit(&record.description) || record.keywords.iter().any(|k| hit(k))
    }

    fn salary_matches(&self, record: &JobRecord) -> bool {
        if !self.filters.salary_constrained_by(self.salary_ceiling) { return true; }
        // unreadable salaries are kept
        extract_salary(&record.salary)
            .map_or(true, |amount| self.filters.salary_min <= amount && amount <= self.filters.salary_max)
    }

    fn date_matches(&self, record: &JobRecord) -> bool {
        match self.filters.date_range.max_age_days() {
            None => true,
            Some(max_age) => age_in_days(record.created_at, self.now) <= max_age,
        }
    }
}

/// Does `record` satisfy every dimension of `filters` at instant `now`?
pub fn matches(record: &JobRecord, filters: &FilterSet, now: DateTime<Utc>) -> bool {
    Predicate::new(filters, now).matches(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use jobboard_core::types::{ContractType, DateRange, WorkMode};

    fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).single().expect("valid date") }

    fn job(salary: &str) -> JobRecord {
        JobRecord {
            id: 1,
            title: "Développeur Rust".into(),
            description: "Services backend et outillage".into(),
            requirements: String::new(),
            company: "Ferris SAS".into(),
            logo_url: None,
            contract: ContractType::Cdi,
            work: WorkMode::Hybride,
            location: "Lyon".into(),
            salary: salary.into(),
            experience: "Senior (5+ ans)".into(),
            keywords: vec!["tokio".into(), "PostgreSQL".into()],
            created_at: now() - Duration::days(3),
        }
    }

    #[test]
    fn extracts_first_amount_only() {
        assert_eq!(extract_salary("45000€ - 65000€"), Some(45_000));
        assert_eq!(extract_salary("À partir de 38000€"), Some(38_000));
        assert_eq!(extract_salary("Jusqu'à 52000 euros"), Some(52_000));
        assert_eq!(extract_salary("30000 EUR ou 31000 Euro"), Some(31_000));
        assert_eq!(extract_salary("45 000 € brut"), Some(45_000));
    }

    #[test]
    fn extraction_needs_a_currency_marker() {
        assert_eq!(extract_salary("Non spécifié"), None);
        assert_eq!(extract_salary("45000"), None);
        assert_eq!(extract_salary(""), None);
    }

    #[test]
    fn text_search_covers_title_company_description_keywords() {
        let record = job("40000€");
        for needle in ["rust", "FERRIS", "outillage", "postgres"] {
            assert!(matches(&record, &FilterSet::default().with_search(needle), now()), "{needle}");
        }
        assert!(!matches(&record, &FilterSet::default().with_search("lyon"), now()), "location is not searched");
    }

    #[test]
    fn enum_filters_compare_exactly() {
        let record = job("40000€");
        assert!(matches(&record, &FilterSet::default().with_contract(ContractType::Cdi), now()));
        assert!(!matches(&record, &FilterSet::default().with_contract(ContractType::Cdd), now()));
        assert!(matches(&record, &FilterSet::default().with_work(WorkMode::Hybride), now()));
        assert!(!matches(&record, &FilterSet::default().with_work(WorkMode::Remote), now()));
    }

    #[test]
    fn salary_bounds_are_inclusive() {
        let record = job("50000€");
        assert!(matches(&record, &FilterSet::default().with_salary(50_000, 70_000), now()));
        assert!(matches(&record, &FilterSet::default().with_salary(10_000, 50_000), now()));
        assert!(!matches(&record, &FilterSet::default().with_salary(50_001, 70_000), now()));
    }

    #[test]
    fn ranged_salary_is_judged_on_its_first_amount() {
        let record = job("45000€ - 65000€");
        assert!(!matches(&record, &FilterSet::default().with_salary(50_000, 70_000), now()));
    }

    #[test]
    fn unreadable_salary_passes_salary_filter() {
        let record = job("Non spécifié");
        assert!(matches(&record, &FilterSet::default().with_salary(90_000, 95_000), now()));
    }

    #[test]
    fn salary_filter_is_skipped_at_default_bounds() {
        let record = job("150000€");
        assert!(matches(&record, &FilterSet::default(), now()));
        assert!(!matches(&record, &FilterSet::default().with_salary(1, 100_000), now()));
    }

    #[test]
    fn inverted_salary_range_matches_nothing_readable() {
        let filters = FilterSet::default().with_salary(70_000, 50_000);
        assert!(!matches(&job("60000€"), &filters, now()));
        assert!(matches(&job("à négocier"), &filters, now()));
    }

    #[test]
    fn custom_ceiling_changes_when_salary_applies() {
        let record = job("150000€");
        let filters = FilterSet::default();
        assert!(!Predicate::new(&filters, now()).with_salary_ceiling(200_000).matches(&record));
    }

    #[test]
    fn date_windows_include_their_boundary() {
        let mut record = job("40000€");
        record.created_at = now() - Duration::days(7);
        assert!(matches(&record, &FilterSet::default().with_date_range(DateRange::Week), now()));
        record.created_at = now() - Duration::days(8);
        assert!(!matches(&record, &FilterSet::default().with_date_range(DateRange::Week), now()));
        record.created_at = now() - Duration::days(30) - Duration::hours(23);
        assert!(matches(&record, &FilterSet::default().with_date_range(DateRange::Month), now()));
    }

    #[test]
    fn today_accepts_less_than_a_day_and_future_dates() {
        let mut record = job("40000€");
        record.created_at = now() - Duration::hours(23);
        assert!(matches(&record, &FilterSet::default().with_date_range(DateRange::Today), now()));
        record.created_at = now() - Duration::hours(25);
        assert!(!matches(&record, &FilterSet::default().with_date_range(DateRange::Today), now()));
        record.created_at = now() + Duration::hours(2);
        assert_eq!(age_in_days(record.created_at, now()), -1);
        assert!(matches(&record, &FilterSet::default().with_date_range(DateRange::Today), now()));
    }
}
