use chrono::{DateTime, NaiveDate, NaiveDateTime};
use crate::errors::{Result, HistoryError};

/// On-disk date layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// 日期转换工具
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    for fmt in [DATE_FORMAT, "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    Err(HistoryError::Parsing(format!("Invalid date: {:?}", raw)))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// CSV 读写工具
pub mod csv_utils {
    use super::*;
    use crate::models::price::{PriceRow, PriceTable, DATE_COLUMN};
    use csv::{ReaderBuilder, WriterBuilder};
    use log::{debug, info};
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;

    /// Parse a CSV document with a `Date` column into a table.
    ///
    /// Input with no header at all is an empty table; a header without a
    /// `Date` column, ragged rows or unreadable dates are parse errors.
    pub fn read_table<R: Read>(reader: R) -> Result<PriceTable> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Ok(PriceTable::empty());
        }

        let date_idx = headers
            .iter()
            .position(|h| h.trim() == DATE_COLUMN)
            .ok_or_else(|| HistoryError::Parsing(format!(
                "missing {} column in header {:?}", DATE_COLUMN, headers
            )))?;

        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx)
            .map(|(_, h)| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let date = parse_date(&record[date_idx])?;
            let fields = record
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != date_idx)
                .map(|(_, v)| v.to_string())
                .collect();
            rows.push(PriceRow::new(date, fields));
        }

        debug!("Parsed {} rows with columns {:?}", rows.len(), columns);
        Ok(PriceTable::new(columns, rows))
    }

    pub fn read_table_from_str(text: &str) -> Result<PriceTable> {
        read_table(text.as_bytes())
    }

    // 从CSV文件读取价格数据
    pub fn read_table_from_csv(path: &Path) -> Result<PriceTable> {
        let file = File::open(path)?;
        read_table(file)
    }

    /// Overwrite `path` with the whole table, header first.
    pub fn save_table_to_csv(table: &PriceTable, path: &Path) -> Result<()> {
        info!("Saving {} rows to {}", table.len(), path.display());

        let mut wtr = WriterBuilder::new().from_path(path)?;
        wtr.write_record(table.header())?;
        for row in &table.rows {
            let date = format_date(&row.date);
            wtr.write_record(
                std::iter::once(date.as_str()).chain(row.fields.iter().map(String::as_str)),
            )?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::csv_utils::*;
    use super::*;

    #[test]
    fn parse_date_accepts_common_layouts() {
        let want = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(parse_date("2024-01-02").unwrap(), want);
        assert_eq!(parse_date(" 2024/01/02 ").unwrap(), want);
        assert_eq!(parse_date("2024-01-02 00:00:00").unwrap(), want);
        assert_eq!(parse_date("2024-01-02T00:00:00Z").unwrap(), want);
        assert!(matches!(parse_date("Jan 2"), Err(HistoryError::Parsing(_))));
    }

    #[test]
    fn read_table_splits_out_date_column() {
        let text = "Date,Open,Close\n2024-01-02,1.5,1.6\n2024-01-03,1.7,1.8\n";
        let table = read_table_from_str(text).unwrap();
        assert_eq!(table.columns, vec!["Open", "Close"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].fields, vec!["1.7", "1.8"]);
        assert_eq!(table.rows[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn date_column_need_not_be_first() {
        let text = "Open,Date\n1.5,2024-01-02\n";
        let table = read_table_from_str(text).unwrap();
        assert_eq!(table.columns, vec!["Open"]);
        assert_eq!(table.rows[0].fields, vec!["1.5"]);
    }

    #[test]
    fn empty_input_is_empty_table() {
        assert!(read_table_from_str("").unwrap().is_empty());
        let header_only = read_table_from_str("Date,Open\n").unwrap();
        assert!(header_only.is_empty());
        assert_eq!(header_only.columns, vec!["Open"]);
    }

    #[test]
    fn missing_date_column_is_parse_error() {
        let err = read_table_from_str("Day,Open\n2024-01-02,1\n").unwrap_err();
        assert!(matches!(err, HistoryError::Parsing(_)));
    }

    #[test]
    fn ragged_row_is_parse_error() {
        let err = read_table_from_str("Date,Open\n2024-01-02,1,2\n").unwrap_err();
        assert!(matches!(err, HistoryError::Parsing(_)));
    }

    #[test]
    fn save_writes_header_and_normalized_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AAPL.csv");
        let table = read_table_from_str("Date,Close\n2024-01-02 00:00:00,185.64\n").unwrap();
        save_table_to_csv(&table, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Date,Close\n2024-01-02,185.64\n");
        assert_eq!(read_table_from_csv(&path).unwrap(), table);
    }
}
