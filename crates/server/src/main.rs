//! vacstat server entry point.
//!
//! Wires configuration, the result store, and the configured vacancy source
//! together, then serves HTTP until ctrl-c.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use vacstat_client::{HhClient, HhConfig, HtmlScraper, HtmlScraperConfig, VacancyFetcher};
use vacstat_core::config::SourceKind;
use vacstat_core::{AppConfig, CacheDb, SalaryRules};
use vacstat_server::{AppState, router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;

    tracing::info!(
        db_path = %config.db_path.display(),
        source = ?config.source,
        "starting vacstat"
    );

    let db = CacheDb::open(&config.db_path).await?;

    let fetcher: Box<dyn VacancyFetcher> = match config.source {
        SourceKind::Api => Box::new(HhClient::new(HhConfig::from_app(&config))?),
        SourceKind::Html => Box::new(HtmlScraper::new(HtmlScraperConfig::from_app(&config))?),
    };

    let rules = SalaryRules::new(config.usd_rate, config.eur_rate);

    let state = Arc::new(AppState { db, fetcher, rules });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", err);
    }
}
