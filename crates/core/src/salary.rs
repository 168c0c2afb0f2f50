//! Free-text salary normalization.
//!
//! Converts one salary string as shown by the upstream site ("от 100 000 руб.",
//! "150–200 тыс. ₽", "по договорённости") into a ruble amount plus a display
//! string. Unparseable text is coerced to 0, never an error: a missing salary is
//! ordinary data, not a failure.

use regex::Regex;

/// Per-vacancy sentinel shown when no salary is stated.
pub const NOT_STATED: &str = "Не указана";

/// Sentinel for an average that has no qualifying entries.
pub const AVG_NOT_AVAILABLE: &str = "Не указано";

/// One normalized salary: a ruble amount (0 = not stated) and a display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSalary {
    pub value: u64,
    pub display: String,
}

/// Normalization rules with the tunable parts injected.
///
/// Exchange rates come from configuration rather than being baked in here;
/// they go stale and operators need to adjust them without a rebuild.
#[derive(Debug, Clone)]
pub struct SalaryRules {
    usd_to_rub: f64,
    eur_to_rub: f64,
    number: Regex,
}

impl SalaryRules {
    pub fn new(usd_to_rub: f64, eur_to_rub: f64) -> Self {
        // Grouped digits first so "100 000" is one number, not two.
        Self { usd_to_rub, eur_to_rub, number: Regex::new(r"\d{1,3}(?: \d{3})+|\d+").unwrap() }
    }

    /// Normalize one free-text salary string.
    ///
    /// Policy:
    /// - empty / "negotiable" / "not stated" text yields value 0 and the sentinel
    /// - one number is taken as-is ("от X" and "до X" alike)
    /// - two numbers are a range, reduced to their arithmetic mean
    /// - a "тыс" magnitude marker multiplies every number by 1000
    /// - a USD/EUR marker converts via the injected rate; anything else is rubles
    pub fn parse(&self, text: &str) -> ParsedSalary {
        let display = clean_text(text);
        let lower = display.to_lowercase();

        if display.is_empty() || lower.contains("договор") || lower.contains("не указан") {
            return ParsedSalary { value: 0, display: NOT_STATED.to_string() };
        }

        let mut amounts: Vec<f64> = self
            .number
            .find_iter(&display)
            .take(2)
            .filter_map(|m| m.as_str().replace(' ', "").parse::<u64>().ok())
            .map(|n| n as f64)
            .collect();

        if lower.contains("тыс") {
            for amount in &mut amounts {
                *amount *= 1000.0;
            }
        }

        let rate = self.currency_rate(&lower);
        let value = match amounts.as_slice() {
            [] => 0.0,
            [single] => single * rate,
            [low, high, ..] => (low + high) / 2.0 * rate,
        };

        if value <= 0.0 {
            ParsedSalary { value: 0, display: NOT_STATED.to_string() }
        } else {
            ParsedSalary { value: value as u64, display }
        }
    }

    fn currency_rate(&self, lower: &str) -> f64 {
        if lower.contains("usd") || lower.contains('$') || lower.contains("долл") {
            self.usd_to_rub
        } else if lower.contains("eur") || lower.contains('€') || lower.contains("евро") {
            self.eur_to_rub
        } else {
            1.0
        }
    }
}

impl Default for SalaryRules {
    fn default() -> Self {
        Self::new(90.0, 100.0)
    }
}

/// Fold Unicode space variants into ASCII space and collapse runs of whitespace.
///
/// hh.ru interleaves NBSP and narrow NBSP as thousands separators; both are
/// Unicode whitespace, so one collapse normalizes them without corrupting the
/// digit sequence.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Group an amount in threes with spaces: 1234567 -> "1 234 567".
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(*b as char);
    }
    out
}

/// Format a ruble amount for display: 125000 -> "125 000 ₽".
pub fn format_rub(value: u64) -> String {
    format!("{} ₽", group_digits(value))
}
