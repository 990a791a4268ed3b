use crate::scrapers::base::PriceScraper;
use crate::errors::Result;
use crate::config::Config;
use crate::services::merger;
use crate::store::{PriceStore, SaveStatus};
use log::info;
use std::path::Path;
use std::sync::Arc;

/// 数据服务，处理数据的获取、合并和存储
pub struct DataService {
    config: Config,
    scraper: Arc<dyn PriceScraper + Send + Sync>,
}

impl DataService {
    pub fn new(config: Config, scraper: Arc<dyn PriceScraper + Send + Sync>) -> Self {
        Self { config, scraper }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Update `<data_dir>/<TICKER>.csv`.
    pub async fn update_ticker(&self, ticker: &str) -> Result<SaveStatus> {
        let filename = Config::filename_for(ticker);
        self.download(ticker, self.config.data_path(), &filename).await
    }

    /// Fetch a ticker's history and fold it into `folder/filename`.
    ///
    /// Nothing is written unless the fetch and parse both succeed and at least
    /// one fetched row is newer than what's stored.
    pub async fn download(&self, ticker: &str, folder: &Path, filename: &str) -> Result<SaveStatus> {
        info!("Processing {} via {}", ticker, self.scraper.source_code());

        let store = PriceStore::new(folder, filename);
        let existing = store.load_existing()?;

        let fetched = self.scraper.fetch_price_history(ticker).await?;
        let outcome = merger::merge(fetched, existing);

        store.save(&outcome)
    }
}
