//! The acquisition seam: a trait over vacancy sources, plus request pacing.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::Mutex;

use crate::error::SourceError;
use vacstat_core::RawVacancy;

/// What a multi-page fetch produced.
///
/// A failure on a page after the first does not discard the records already
/// collected: the prior pages are kept and the failure is recorded in `aborted`
/// instead of being swallowed. `aborted: None` means the fetch ran to its
/// natural end (page budget exhausted or the upstream ran out of pages).
#[derive(Debug)]
pub struct FetchOutcome {
    pub vacancies: Vec<RawVacancy>,
    pub pages_fetched: u32,
    pub aborted: Option<SourceError>,
}

/// A source of vacancy listings for a query string.
///
/// Implemented by the official API client and the HTML scraper; the aggregation
/// core neither knows nor cares which one produced the records.
#[async_trait]
pub trait VacancyFetcher: Send + Sync {
    /// Label echoed in the response payload (e.g. "hh.ru official API").
    fn source_name(&self) -> &'static str;

    /// Fetch all pages for a query.
    ///
    /// An error here means the very first page failed and no records exist;
    /// later-page failures surface through [`FetchOutcome::aborted`].
    async fn fetch(&self, query: &str) -> Result<FetchOutcome, SourceError>;
}

/// Enforces a pause between consecutive upstream requests.
///
/// The pause is `min_delay` plus a uniform random amount up to `jitter`,
/// measured from the previous request. This is a politeness measure toward the
/// scraped site, not a correctness mechanism.
#[derive(Debug)]
pub struct Pacer {
    last_request: Mutex<Instant>,
    min_delay: Duration,
    jitter: Duration,
}

impl Pacer {
    pub fn new(min_delay: Duration, jitter: Duration) -> Self {
        Self {
            last_request: Mutex::new(Instant::now().checked_sub(min_delay).unwrap_or_else(Instant::now)),
            min_delay,
            jitter,
        }
    }

    /// Wait until the pacing interval since the previous request has elapsed.
    pub async fn pause(&self) {
        let extra = if self.jitter.is_zero() {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64))
        };

        let mut last = self.last_request.lock().await;
        let target = self.min_delay + extra;
        let elapsed = last.elapsed();
        if elapsed < target {
            tokio::time::sleep(target - elapsed).await;
        }
        *last = Instant::now();
    }
}
