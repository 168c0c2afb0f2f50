//! Vacancy aggregation.
//!
//! Reduces the raw records returned by a fetcher into the response payload:
//! count, average salary over the entries that state one, and a short sample.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::salary::{AVG_NOT_AVAILABLE, ParsedSalary, SalaryRules, format_rub};

/// Number of entries included in the response sample.
const SAMPLE_SIZE: usize = 5;

/// One unprocessed vacancy as extracted by a fetcher.
///
/// `salary_text` is whatever the upstream showed, or empty when the listing
/// stated no salary at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVacancy {
    pub title: String,
    pub salary_text: String,
}

/// One entry of the response sample list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VacancySummary {
    pub title: String,
    pub salary_display: String,
    pub salary_value: u64,
}

/// The full analytics payload, persisted verbatim and returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsResult {
    pub query: String,
    pub count: usize,
    pub avg_salary: String,
    pub sample: Vec<VacancySummary>,
    pub source: String,
    pub updated: String,
    pub cached: bool,
}

/// Reduce a vacancy list to an [`AnalyticsResult`].
///
/// `count` is the full input length, including entries whose salary could not be
/// parsed. The average is taken only over strictly positive parsed values,
/// floored, and formatted with thousands grouping; with no qualifying entries it
/// is the "not available" sentinel, never zero. The sample is the first five
/// records in fetch order.
pub fn aggregate(query: &str, source: &str, records: &[RawVacancy], rules: &SalaryRules) -> AnalyticsResult {
    let parsed: Vec<ParsedSalary> = records.iter().map(|r| rules.parse(&r.salary_text)).collect();

    let positive: Vec<u64> = parsed.iter().map(|p| p.value).filter(|v| *v > 0).collect();
    let avg_salary = if positive.is_empty() {
        AVG_NOT_AVAILABLE.to_string()
    } else {
        format_rub(positive.iter().sum::<u64>() / positive.len() as u64)
    };

    let sample = records
        .iter()
        .zip(&parsed)
        .take(SAMPLE_SIZE)
        .map(|(record, salary)| VacancySummary {
            title: record.title.clone(),
            salary_display: salary.display.clone(),
            salary_value: salary.value,
        })
        .collect();

    AnalyticsResult {
        query: query.to_string(),
        count: records.len(),
        avg_salary,
        sample,
        source: source.to_string(),
        updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        cached: false,
    }
}
