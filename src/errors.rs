use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    /// Transport failure: connect, timeout, non-2xx status, body read.
    #[error("Failed to download CSV. Error: {0}")]
    Download(String),

    /// Any other failure while issuing the request.
    #[error("An error occurred during the request. Error: {0}")]
    Request(String),

    #[error("An error occurred while parsing the CSV. Error: {0}")]
    Parsing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HistoryError {
    /// True for both request kinds; a download failure is a kind of request failure.
    pub fn is_request_error(&self) -> bool {
        matches!(self, HistoryError::Download(_) | HistoryError::Request(_))
    }
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Sort a transport-layer failure into the download/request split.
pub fn handle_request_error(err: reqwest::Error) -> HistoryError {
    if err.is_builder() {
        HistoryError::Request(err.to_string())
    } else {
        HistoryError::Download(err.to_string())
    }
}

pub fn handle_parsing_error<E: Display>(err: E) -> HistoryError {
    HistoryError::Parsing(err.to_string())
}

impl From<reqwest::Error> for HistoryError {
    fn from(err: reqwest::Error) -> Self {
        handle_request_error(err)
    }
}

impl From<csv::Error> for HistoryError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return handle_parsing_error(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => HistoryError::Io(io),
            other => HistoryError::Parsing(format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_failure_is_request_error() {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let classified = handle_request_error(err);
        assert!(matches!(classified, HistoryError::Request(_)));
        assert!(classified.is_request_error());
    }

    #[test]
    fn download_counts_as_request_error() {
        let err = HistoryError::Download("connection refused".into());
        assert!(err.is_request_error());
        assert!(!HistoryError::Parsing("bad row".into()).is_request_error());
    }

    #[test]
    fn messages_carry_original_description() {
        let err = handle_parsing_error("found record with 3 fields, but the previous record has 7 fields");
        assert_eq!(
            err.to_string(),
            "An error occurred while parsing the CSV. Error: found record with 3 fields, but the previous record has 7 fields"
        );
        let err = HistoryError::Download("HTTP status client error (404 Not Found)".into());
        assert!(err.to_string().starts_with("Failed to download CSV. Error: "));
    }

    #[test]
    fn csv_record_error_maps_to_parsing() {
        let data = "Date,Open\n2024-01-01,1.0,extra\n";
        let mut rdr = csv::ReaderBuilder::new().from_reader(data.as_bytes());
        let err = rdr.records().find_map(|r| r.err()).unwrap();
        assert!(matches!(HistoryError::from(err), HistoryError::Parsing(_)));
    }
}
