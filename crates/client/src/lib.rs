//! Upstream collaborators for vacstat.
//!
//! This crate provides the vacancy acquisition strategies (official hh.ru API,
//! static HTML scrape) behind a common trait, plus the pacing that keeps page
//! requests polite.

pub mod error;
pub mod fetcher;
pub mod hh;
pub mod scrape;

pub use error::SourceError;
pub use fetcher::{FetchOutcome, Pacer, VacancyFetcher};
pub use hh::{HhClient, HhConfig};
pub use scrape::{HtmlScraper, HtmlScraperConfig};
