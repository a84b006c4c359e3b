use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::process::raw_table::RawTable;
use crate::process::utils::normalize_column_name;

pub const YEAR_COLUMN: &str = "year";

/// A data row keyed by its (still raw) year label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRow {
    pub year: String,
    /// Aligned with `LoadedTable::columns`.
    pub fields: Vec<String>,
}

/// Complete rows under normalized column names, `year` pulled out as key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedTable {
    pub columns: Vec<String>,
    pub rows: Vec<LoadedRow>,
    /// Rows discarded for missing or surplus fields.
    pub dropped: usize,
}

impl LoadedTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn value<'a>(&self, row: &'a LoadedRow, column: &str) -> Option<&'a str> {
        row.fields.get(self.column_index(column)?).map(String::as_str)
    }
}

/// Turn scraped rows into a table. Rows that do not have exactly one
/// non-empty value per header (cancelled years, merged cells) are dropped.
#[tracing::instrument(level = "info", skip(raw), fields(rows = raw.rows.len()))]
pub fn load_table(raw: &RawTable) -> Result<LoadedTable> {
    let headers: Vec<String> = raw.headers.iter().map(|h| normalize_column_name(h)).collect();
    let year_idx = headers
        .iter()
        .position(|h| h == YEAR_COLUMN)
        .ok_or_else(|| anyhow!("table header has no `{}` column: {:?}", YEAR_COLUMN, headers))?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != year_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut rows = Vec::with_capacity(raw.rows.len());
    let mut dropped = 0;

    for (idx, fields) in raw.rows.iter().enumerate() {
        if fields.len() > headers.len() {
            warn!(row = idx, fields = fields.len(), "row has more fields than the header; dropping");
            dropped += 1;
            continue;
        }
        if fields.len() < headers.len() || fields.iter().any(|f| f.is_empty()) {
            debug!(row = idx, first = ?fields.first(), "incomplete row; dropping");
            dropped += 1;
            continue;
        }

        let mut fields = fields.clone();
        let year = fields.remove(year_idx);
        rows.push(LoadedRow { year, fields });
    }

    info!(kept = rows.len(), dropped, "loaded rows");
    Ok(LoadedTable {
        columns,
        rows,
        dropped,
    })
}
