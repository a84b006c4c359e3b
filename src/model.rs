// src/model.rs

use chrono::Duration;
use std::collections::BTreeMap;

/// Outcome of parsing a margin or overall-time cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationCell {
    Parsed(Duration),
    /// A recognised non-time value, e.g. a points classification.
    NotTime(String),
    /// Looked like a time but did not parse.
    Malformed(String),
}

impl DurationCell {
    pub fn duration(&self) -> Option<Duration> {
        match self {
            DurationCell::Parsed(d) => Some(*d),
            _ => None,
        }
    }

    /// Elapsed seconds as a float, missing exactly when the duration is.
    pub fn total_seconds(&self) -> Option<f64> {
        self.duration()
            .map(|d| d.num_milliseconds() as f64 / 1000.0)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, DurationCell::Malformed(_))
    }
}

/// One cleaned row of the winners table.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceResult {
    pub year: i32,
    pub controversial: bool,
    pub distance_km: i64,
    pub stage_wins: i64,
    pub stages_in_lead: i64,
    pub margin: DurationCell,
    pub overall_time: DurationCell,
    /// Untouched source columns, aligned with `ResultTable::passthrough_columns`.
    pub passthrough: Vec<String>,
}

impl RaceResult {
    pub fn margin_sec(&self) -> Option<f64> {
        self.margin.total_seconds()
    }

    pub fn overall_time_sec(&self) -> Option<f64> {
        self.overall_time.total_seconds()
    }
}

/// The final table, keyed by year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub passthrough_columns: Vec<String>,
    pub rows: BTreeMap<i32, RaceResult>,
}

impl ResultTable {
    pub fn new(passthrough_columns: Vec<String>) -> Self {
        Self {
            passthrough_columns,
            rows: BTreeMap::new(),
        }
    }

    pub fn get(&self, year: i32) -> Option<&RaceResult> {
        self.rows.get(&year)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = &RaceResult> {
        self.rows.values()
    }

    /// Value of a passthrough column for one row.
    pub fn passthrough_value<'a>(&self, row: &'a RaceResult, column: &str) -> Option<&'a str> {
        let idx = self.passthrough_columns.iter().position(|c| c == column)?;
        row.passthrough.get(idx).map(String::as_str)
    }
}

/// `H:MM:SS`, hours unbounded.
pub fn format_duration(d: Duration) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
