use crate::models::price::PriceTable;
use crate::errors::Result;
use async_trait::async_trait;

/// Base trait for price history scrapers
#[async_trait]
pub trait PriceScraper {
    /// Short name of the data source, for logs
    fn source_code(&self) -> &'static str;

    /// Fetch the full daily history for a ticker in one request
    async fn fetch_price_history(&self, ticker: &str) -> Result<PriceTable>;
}
