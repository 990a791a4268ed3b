use crate::models::price::{PriceRow, PriceTable};
use chrono::NaiveDate;
use log::debug;

/// Result of folding a fetch into the stored history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub table: PriceTable,
    /// Number of fetched rows admitted past the watermark.
    pub added: usize,
    /// Nothing newer than the stored history; the store must not be rewritten.
    pub is_empty: bool,
}

/// Latest stored date, or the minimum date when nothing is stored yet.
pub fn watermark(existing: &PriceTable) -> NaiveDate {
    existing.latest_date().unwrap_or(NaiveDate::MIN)
}

/// Keep every item of `existing`, admit items of `incoming` whose key is
/// strictly after `watermark`, and order the result newest first.
///
/// The sort is stable, so items sharing a key keep their relative order
/// (admitted items ahead of existing ones).
pub fn merge_by_key<T, K, F>(existing: Vec<T>, incoming: Vec<T>, key_of: F, watermark: &K) -> (Vec<T>, usize)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut merged: Vec<T> = incoming
        .into_iter()
        .filter(|item| key_of(item) > *watermark)
        .collect();
    let added = merged.len();
    if added == 0 {
        return (existing, 0);
    }
    merged.extend(existing);
    merged.sort_by(|a, b| key_of(b).cmp(&key_of(a)));
    (merged, added)
}

/// Merge a freshly fetched table into the existing one.
///
/// Fetched rows dated on or before the latest stored date are dropped even if
/// their values differ; stored rows are never rewritten.
pub fn merge(new: PriceTable, existing: PriceTable) -> MergeOutcome {
    let mark = watermark(&existing);
    debug!("Merging {} fetched rows over {} stored rows, watermark {}", new.len(), existing.len(), mark);

    if !new.rows.iter().any(|row| row.date > mark) {
        // 无新数据，保持原表不变
        return MergeOutcome {
            table: existing,
            added: 0,
            is_empty: true,
        };
    }

    let columns = union_columns(&new.columns, &existing.columns);
    let fresh: Vec<PriceRow> = new
        .rows
        .into_iter()
        .map(|row| row.project(&new.columns, &columns))
        .collect();
    let stored: Vec<PriceRow> = existing
        .rows
        .into_iter()
        .map(|row| row.project(&existing.columns, &columns))
        .collect();

    let (rows, added) = merge_by_key(stored, fresh, |row: &PriceRow| row.date, &mark);
    MergeOutcome {
        table: PriceTable::new(columns, rows),
        added,
        is_empty: false,
    }
}

// New table's columns first, then any the stored table has on top.
fn union_columns(first: &[String], second: &[String]) -> Vec<String> {
    let mut columns = first.to_vec();
    for name in second {
        if !columns.contains(name) {
            columns.push(name.clone());
        }
    }
    columns
}
