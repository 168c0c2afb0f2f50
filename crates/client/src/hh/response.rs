//! hh.ru vacancy search API response types.
//!
//! Only the fields the aggregation needs are modeled; everything else in the
//! (large) API payload is ignored.

use serde::Deserialize;

use vacstat_core::{RawVacancy, group_digits};

/// One page of `GET /vacancies`.
#[derive(Debug, Deserialize)]
pub struct HhSearchPage {
    #[serde(default)]
    pub items: Vec<HhItem>,
    #[serde(default)]
    pub found: u64,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub page: u32,
}

/// One vacancy item.
#[derive(Debug, Deserialize)]
pub struct HhItem {
    #[serde(default = "untitled")]
    pub name: String,
    #[serde(default)]
    pub salary: Option<HhSalary>,
}

/// Structured salary as the API reports it.
#[derive(Debug, Deserialize)]
pub struct HhSalary {
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub currency: Option<String>,
}

fn untitled() -> String {
    "Без названия".to_string()
}

impl HhItem {
    /// Render the structured salary into the free-text form the normalizer
    /// consumes: "100 000–150 000 RUR", "от 100 000 RUR", or empty when the
    /// listing states no lower bound.
    pub fn salary_text(&self) -> String {
        let Some(salary) = &self.salary else { return String::new() };
        let Some(from) = salary.from else { return String::new() };
        let currency = salary.currency.as_deref().unwrap_or("RUR");

        match salary.to {
            Some(to) => format!("{}–{} {}", group_digits(from), group_digits(to), currency),
            None => format!("от {} {}", group_digits(from), currency),
        }
    }

    pub fn into_raw(self) -> RawVacancy {
        let salary_text = self.salary_text();
        RawVacancy { title: self.name, salary_text }
    }
}
