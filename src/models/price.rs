use chrono::NaiveDate;

/// Name of the key column in every price table.
pub const DATE_COLUMN: &str = "Date";

/// One trading day. Everything besides the date is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub fields: Vec<String>,
}

impl PriceRow {
    pub fn new(date: NaiveDate, fields: Vec<String>) -> Self {
        Self { date, fields }
    }

    /// Re-lay the row's fields from `from` column order onto `to`.
    /// Columns the row doesn't have come out as empty cells.
    pub fn project(self, from: &[String], to: &[String]) -> Self {
        if from == to {
            return self;
        }
        let fields = to
            .iter()
            .map(|name| {
                from.iter()
                    .position(|c| c == name)
                    .and_then(|i| self.fields.get(i).cloned())
                    .unwrap_or_default()
            })
            .collect();
        Self { date: self.date, fields }
    }
}

/// Daily price history for one ticker.
///
/// `columns` names the non-date columns in file order; each row's `fields`
/// line up with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    pub columns: Vec<String>,
    pub rows: Vec<PriceRow>,
}

impl PriceTable {
    pub fn new(columns: Vec<String>, rows: Vec<PriceRow>) -> Self {
        Self { columns, rows }
    }

    /// The "no prior data" table.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Most recent date in the table, if any.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|r| r.date).max()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Full header as written to disk.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(DATE_COLUMN)
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }
}
