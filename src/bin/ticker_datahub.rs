use ticker_datahub::config::Config;
use ticker_datahub::errors::HistoryError;
use ticker_datahub::scrapers::yahoo::YahooScraper;
use ticker_datahub::services::data_service::DataService;

use anyhow::Context;
use clap::{App, Arg};
use log::{error, info};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    let matches = App::new("ticker_datahub")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Download daily price history for a ticker and update its CSV file")
        .arg(
            Arg::with_name("ticker")
                .value_name("TICKER")
                .help("Stock ticker to download (ex. AAPL)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Folder holding <TICKER>.csv files")
                .takes_value(true)
                .default_value("data"),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("HTTP request timeout in seconds")
                .takes_value(true)
                .default_value("30"),
        )
        .get_matches();

    let ticker = matches.value_of("ticker").unwrap_or_default();
    let data_dir = matches.value_of("data-dir").unwrap_or("data");
    let timeout_secs = matches.value_of("timeout")
        .unwrap_or("30")
        .parse::<u64>()
        .context("--timeout must be a whole number of seconds")?;

    let config = Config::new()
        .with_data_dir(data_dir)
        .with_timeout_secs(timeout_secs);

    std::fs::create_dir_all(config.data_path())
        .with_context(|| format!("failed to create {}", config.data_dir))?;

    let scraper = YahooScraper::new(&config)?;
    let service = DataService::new(config, Arc::new(scraper));

    match service.update_ticker(ticker).await {
        Ok(status) => println!("{}", status),
        Err(e @ (HistoryError::Download(_) | HistoryError::Request(_) | HistoryError::Parsing(_))) => {
            error!("{} failed: {}", ticker, e);
            println!("{}", e);
        }
        Err(e) => return Err(e).with_context(|| format!("failed to update {}", ticker)),
    }

    info!("Done with {}", ticker);
    Ok(())
}
