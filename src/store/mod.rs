use log::info;

use crate::models::price::PriceTable;
use crate::errors::Result;
use crate::services::merger::MergeOutcome;
use crate::util::csv_utils;
use std::fmt;
use std::path::{Path, PathBuf};

/// What the writer did with a merge result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Unchanged { filename: String },
    Saved { filename: String, path: PathBuf, added: usize },
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::Unchanged { filename } => write!(
                f,
                "No new entries found for {}. CSV file remains unchanged.",
                filename
            ),
            SaveStatus::Saved { filename, path, added } => write!(
                f,
                "New entries added for {} ({} rows). CSV file saved as {}",
                filename,
                added,
                path.display()
            ),
        }
    }
}

/// CSV file holding one ticker's history.
pub struct PriceStore {
    path: PathBuf,
}

impl PriceStore {
    pub fn new(folder: impl AsRef<Path>, filename: &str) -> Self {
        Self {
            path: folder.as_ref().join(filename),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Stored table, or an empty one when nothing has been saved yet.
    pub fn load_existing(&self) -> Result<PriceTable> {
        if self.path.exists() {
            info!("Loading existing data from {}", self.path.display());
            let table = csv_utils::read_table_from_csv(&self.path)?;
            info!("Loaded {} rows, latest {:?}", table.len(), table.latest_date());
            Ok(table)
        } else {
            info!("No existing data at {}, starting fresh", self.path.display());
            Ok(PriceTable::empty())
        }
    }

    /// Rewrite the file with the merged table, or leave it alone if nothing was added.
    pub fn save(&self, outcome: &MergeOutcome) -> Result<SaveStatus> {
        let filename = self.filename();
        if outcome.is_empty {
            let status = SaveStatus::Unchanged { filename };
            info!("{}", status);
            return Ok(status);
        }

        csv_utils::save_table_to_csv(&outcome.table, &self.path)?;
        let status = SaveStatus::Saved {
            filename,
            path: self.path.clone(),
            added: outcome.added,
        };
        info!("{}", status);
        Ok(status)
    }
}
