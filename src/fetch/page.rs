// src/fetch/page.rs

use std::path::Path;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE},
    Client, StatusCode,
};
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};

use super::urls::market_results_request;
use crate::config::ScraperConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// Page HTML together with where it came from.
#[derive(Debug, Clone)]
pub struct Page {
    pub source: String,
    pub html: String,
}

static DENIAL_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b403\b|access denied|forbidden|attention required|request blocked").unwrap()
});
static DENIAL_PLACES: Lazy<Selector> = Lazy::new(|| Selector::parse("title, h1").unwrap());

/// HTTP client for the results site. Headed mode sends the header set of a
/// desktop browser, which is what the site lets through when it blocks
/// plain clients.
pub fn build_client(config: &ScraperConfig) -> ScrapeResult<Client> {
    let mut headers = HeaderMap::new();
    if config.headed {
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.9"));
    }

    Ok(Client::builder()
        .user_agent(config.user_agent())
        .default_headers(headers)
        .cookie_store(true)
        .gzip(true)
        .timeout(config.timeout)
        .build()?)
}

/// Whether a page is an access-denial page rather than market results.
/// Only the title and top-level headings are checked.
pub fn is_access_denied(html: &str) -> bool {
    let doc = Html::parse_document(html);
    let denied = doc.select(&DENIAL_PLACES).any(|el| {
        let text: String = el.text().collect();
        DENIAL_MARKER.is_match(&text)
    });
    denied
}

fn check_access(page: Page) -> ScrapeResult<Page> {
    if is_access_denied(&page.html) {
        warn!(source = %page.source, "page content is an access-denial page");
        return Err(ScrapeError::Forbidden { url: page.source });
    }
    Ok(page)
}

/// Fetch the market-results page for `delivery_date`.
#[instrument(level = "info", skip(client, config))]
pub async fn fetch_market_page(
    client: &Client,
    config: &ScraperConfig,
    delivery_date: NaiveDate,
) -> ScrapeResult<Page> {
    let request = market_results_request(client, config, delivery_date)?;
    let url = request.url().to_string();
    info!(%url, headed = config.headed, "fetching market results");

    let resp = client.execute(request).await?;
    let status = resp.status();
    debug!(%status, "response");

    if status == StatusCode::FORBIDDEN {
        warn!(%url, "HTTP 403");
        return Err(ScrapeError::Forbidden { url });
    }
    if !status.is_success() {
        return Err(ScrapeError::Http { status, url });
    }

    let html = resp.text().await?;
    debug!(bytes = html.len(), "read body");
    check_access(Page { source: url, html })
}

/// Read a page previously saved from a browser.
#[instrument(level = "info")]
pub async fn load_page_file(path: &Path) -> ScrapeResult<Page> {
    let html = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ScrapeError::io(path, e))?;
    info!(bytes = html.len(), "loaded saved page");
    check_access(Page {
        source: path.display().to_string(),
        html,
    })
}
