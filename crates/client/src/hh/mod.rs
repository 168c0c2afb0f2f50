//! Official hh.ru vacancy search API client.
//!
//! - **Endpoint**: `GET {base_url}/vacancies`
//! - **Pagination**: walks pages up to the configured budget, pausing between
//!   requests; stops early when the upstream reports no further pages.
//! - **Partial results**: a failure after the first page keeps what was already
//!   collected and records the failure in the outcome.

pub mod response;

pub use response::{HhItem, HhSalary, HhSearchPage};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::fetcher::{FetchOutcome, Pacer, VacancyFetcher};
use vacstat_core::AppConfig;

/// Source label echoed in every payload built from this client.
const SOURCE_NAME: &str = "hh.ru official API";

/// hh.ru API client configuration.
#[derive(Debug, Clone)]
pub struct HhConfig {
    /// Base URL (default: https://api.hh.ru).
    pub base_url: String,
    /// User-agent string sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Area id restricting the search (1 = Moscow).
    pub area: u32,
    /// Listings per page (hh.ru caps this at 100).
    pub per_page: u32,
    /// Page budget per query.
    pub max_pages: u32,
    /// Minimum pause between page requests.
    pub page_delay: Duration,
    /// Jitter added on top of the pause.
    pub page_jitter: Duration,
}

impl Default for HhConfig {
    fn default() -> Self {
        let app = AppConfig::default();
        Self::from_app(&app)
    }
}

impl HhConfig {
    /// Derive the client configuration from the application config.
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            base_url: config.hh_base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            area: config.area,
            per_page: config.per_page,
            max_pages: config.max_pages,
            page_delay: config.page_delay(),
            page_jitter: config.page_jitter(),
        }
    }
}

/// hh.ru vacancy search API client.
#[derive(Debug)]
pub struct HhClient {
    http: reqwest::Client,
    config: HhConfig,
    pacer: Pacer,
}

impl HhClient {
    /// Create a new client with the given configuration.
    pub fn new(config: HhConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let pacer = Pacer::new(config.page_delay, config.page_jitter);

        Ok(Self { http, config, pacer })
    }

    /// Fetch a single search page.
    async fn search_page(&self, query: &str, page: u32) -> Result<HhSearchPage, SourceError> {
        let url = format!("{}/vacancies", self.config.base_url);

        tracing::debug!("searching hh.ru API: text={} page={}", query, page);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("text", query.to_string()),
                ("area", self.config.area.to_string()),
                ("per_page", self.config.per_page.to_string()),
                ("page", page.to_string()),
                ("only_with_salary", "false".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl VacancyFetcher for HhClient {
    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self, query: &str) -> Result<FetchOutcome, SourceError> {
        let mut vacancies = Vec::new();
        let mut pages_fetched = 0u32;

        for page in 0..self.config.max_pages {
            if page > 0 {
                self.pacer.pause().await;
            }

            let listing = match self.search_page(query, page).await {
                Ok(listing) => listing,
                Err(err) if page == 0 => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        "page {} failed ({}); keeping {} records from earlier pages",
                        page,
                        err,
                        vacancies.len()
                    );
                    return Ok(FetchOutcome { vacancies, pages_fetched, aborted: Some(err) });
                }
            };

            pages_fetched += 1;
            let upstream_pages = listing.pages;
            vacancies.extend(listing.items.into_iter().map(HhItem::into_raw));

            if page + 1 >= upstream_pages {
                break;
            }
        }

        tracing::debug!("fetched {} vacancies over {} pages for {:?}", vacancies.len(), pages_fetched, query);

        Ok(FetchOutcome { vacancies, pages_fetched, aborted: None })
    }
}
