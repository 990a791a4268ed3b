use std::error::Error;
use std::path::PathBuf;
use ticker_datahub::store::PriceStore;
use ticker_datahub::config::Config;

// 打印某个股票CSV文件中的最新交易日期
fn main() -> Result<(), Box<dyn Error>> {
    let ticker = std::env::args()
        .nth(1)
        .ok_or("usage: latest_date <TICKER> [DATA_DIR]")?;
    let data_dir = std::env::args().nth(2).unwrap_or_else(|| "data".to_string());

    let path = PathBuf::from(&data_dir).join(Config::filename_for(&ticker));
    if !path.exists() {
        return Err(format!("{} not found, run 'cargo run -- {}' first", path.display(), ticker).into());
    }

    let store = PriceStore::new(&data_dir, &Config::filename_for(&ticker));
    let table = store.load_existing()?;

    match table.latest_date() {
        Some(date) => println!("{}: {} rows, latest {}", ticker, table.len(), date),
        None => println!("{}: no rows", ticker),
    }

    Ok(())
}
