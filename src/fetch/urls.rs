// src/fetch/urls.rs

use chrono::NaiveDate;
use reqwest::{Client, Request};
use serde::Serialize;
use url::Url;

use crate::config::ScraperConfig;
use crate::date::format_delivery_date;
use crate::error::ScrapeResult;

/// Query string of the market-results page. Field order is parameter order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MarketQuery<'a> {
    pub modality: &'a str,
    pub sub_modality: &'a str,
    pub data_mode: &'a str,
    pub delivery_date: String,
    pub market_area: &'a str,
    pub product: &'a str,
}

impl<'a> MarketQuery<'a> {
    pub fn new(config: &'a ScraperConfig, delivery_date: NaiveDate) -> Self {
        Self {
            modality: &config.modality,
            sub_modality: &config.sub_modality,
            data_mode: &config.data_mode,
            delivery_date: format_delivery_date(delivery_date),
            market_area: &config.market_area,
            product: &config.product,
        }
    }
}

/// Build the GET request for one delivery date's results page.
pub fn market_results_request(
    client: &Client,
    config: &ScraperConfig,
    delivery_date: NaiveDate,
) -> ScrapeResult<Request> {
    let base = Url::parse(&config.base_url)?;
    let request = client
        .get(base)
        .query(&MarketQuery::new(config, delivery_date))
        .build()?;
    Ok(request)
}
