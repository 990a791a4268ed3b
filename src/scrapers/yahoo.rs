use crate::models::price::PriceTable;
use crate::errors::{Result, HistoryError, handle_request_error};
use crate::scrapers::base::PriceScraper;
use crate::config::Config;
use crate::util::csv_utils;
use async_trait::async_trait;
use reqwest::Client;
use log::{debug, info};

/// Whole-history query: epoch start, far-future end, daily bars.
const HISTORY_QUERY: [(&str, &str); 4] = [
    ("period1", "0"),
    ("period2", "9999999999"),
    ("interval", "1d"),
    ("events", "history"),
];

/// Yahoo Finance CSV download scraper
pub struct YahooScraper {
    client: Client,
    base_url: String,
}

impl YahooScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(handle_request_error)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn history_url(&self, ticker: &str) -> String {
        format!("{}/v7/finance/download/{}", self.base_url, ticker)
    }
}

#[async_trait]
impl PriceScraper for YahooScraper {
    fn source_code(&self) -> &'static str {
        "YAHOO"
    }

    async fn fetch_price_history(&self, ticker: &str) -> Result<PriceTable> {
        let url = self.history_url(ticker);
        info!("Fetching price history for {} from {}", ticker, url);

        let response = self.client
            .get(&url)
            .query(&HISTORY_QUERY)
            .send()
            .await
            .map_err(handle_request_error)?
            .error_for_status()
            .map_err(handle_request_error)?;

        let text = response.text().await.map_err(handle_request_error)?;
        let text = text.trim();
        debug!("Received {} bytes for {}", text.len(), ticker);

        if text.is_empty() {
            return Err(HistoryError::Parsing(format!("empty response body for {}", ticker)));
        }

        let table = csv_utils::read_table_from_str(text)?;
        info!("Fetched {} rows for {}", table.len(), ticker);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_url_embeds_ticker() {
        let config = Config::new().with_base_url("http://localhost:9000/");
        let scraper = YahooScraper::new(&config).unwrap();
        assert_eq!(
            scraper.history_url("BRK-B"),
            "http://localhost:9000/v7/finance/download/BRK-B"
        );
        assert_eq!(scraper.source_code(), "YAHOO");
    }
}
