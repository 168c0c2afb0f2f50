//! Static HTML scrape of hh.ru search result pages.
//!
//! The selectors are a fragile external contract: they break whenever hh.ru
//! ships a new search page markup. They are kept in one place here so a
//! breakage is a three-constant fix.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::error::SourceError;
use crate::fetcher::{FetchOutcome, Pacer, VacancyFetcher};
use vacstat_core::{AppConfig, RawVacancy};

/// Source label echoed in every payload built from this scraper.
const SOURCE_NAME: &str = "hh.ru html";

const CARD_SELECTOR: &str = r#"[data-qa="vacancy-serp__vacancy"]"#;
const TITLE_SELECTOR: &str = r#"[data-qa="serp-item__title"]"#;
const SALARY_SELECTOR: &str = r#"[data-qa="vacancy-serp__vacancy-compensation"]"#;

/// HTML scraper configuration.
#[derive(Debug, Clone)]
pub struct HtmlScraperConfig {
    /// Base URL of the site (default: https://hh.ru).
    pub base_url: String,
    /// User-agent string sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Area id restricting the search (1 = Moscow).
    pub area: u32,
    /// Page budget per query.
    pub max_pages: u32,
    /// Minimum pause between page requests.
    pub page_delay: Duration,
    /// Jitter added on top of the pause.
    pub page_jitter: Duration,
}

impl Default for HtmlScraperConfig {
    fn default() -> Self {
        let app = AppConfig::default();
        Self::from_app(&app)
    }
}

impl HtmlScraperConfig {
    /// Derive the scraper configuration from the application config.
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            base_url: config.hh_html_base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            area: config.area,
            max_pages: config.max_pages,
            page_delay: config.page_delay(),
            page_jitter: config.page_jitter(),
        }
    }
}

/// Scraper for hh.ru search result pages.
pub struct HtmlScraper {
    http: reqwest::Client,
    config: HtmlScraperConfig,
    pacer: Pacer,
    card: Selector,
    title: Selector,
    salary: Selector,
}

impl HtmlScraper {
    /// Create a new scraper with the given configuration.
    pub fn new(config: HtmlScraperConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let pacer = Pacer::new(config.page_delay, config.page_jitter);

        Ok(Self {
            http,
            config,
            pacer,
            card: Selector::parse(CARD_SELECTOR).unwrap(),
            title: Selector::parse(TITLE_SELECTOR).unwrap(),
            salary: Selector::parse(SALARY_SELECTOR).unwrap(),
        })
    }

    /// Fetch the raw HTML of one search page.
    async fn fetch_page(&self, query: &str, page: u32) -> Result<String, SourceError> {
        let url = format!("{}/search/vacancy", self.config.base_url);

        tracing::debug!("scraping hh.ru: text={} page={}", query, page);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("text", query.to_string()),
                ("area", self.config.area.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus { status: status.as_u16() });
        }

        response.text().await.map_err(SourceError::from)
    }

    /// Pull vacancy records out of one page of markup.
    ///
    /// Cards without a compensation element are listings with no stated salary;
    /// they come back with an empty salary text, not an error.
    fn parse_listing(&self, html: &str) -> Vec<RawVacancy> {
        let doc = Html::parse_document(html);

        doc.select(&self.card)
            .map(|card| {
                let title = card
                    .select(&self.title)
                    .next()
                    .map(element_text)
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Без названия".to_string());

                let salary_text = card.select(&self.salary).next().map(element_text).unwrap_or_default();

                RawVacancy { title, salary_text }
            })
            .collect()
    }
}

/// Concatenated text content of an element with whitespace collapsed.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl VacancyFetcher for HtmlScraper {
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

            let html = match self.fetch_page(query, page).await {
                Ok(html) => html,
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
            let records = self.parse_listing(&html);
            if records.is_empty() {
                // an empty page means the listing ran out
                break;
            }
            vacancies.extend(records);
        }

        tracing::debug!("scraped {} vacancies over {} pages for {:?}", vacancies.len(), pages_fetched, query);

        Ok(FetchOutcome { vacancies, pages_fetched, aborted: None })
    }
}
