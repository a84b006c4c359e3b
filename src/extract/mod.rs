// src/extract/mod.rs

use anyhow::{anyhow, bail, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::process::raw_table::RawTable;
use crate::process::utils::{clean_field, normalize_column_name};

/// Header labels the results table must carry, whichever way it is selected.
pub const REQUIRED_HEADERS: &[&str] = &["year", "distance", "time/points", "margin"];

/// Historical position of the results table among the page's wikitables.
pub const LEGACY_TABLE_INDEX: usize = 1;

/// How to pick the results table out of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelector {
    /// First `table.wikitable` whose header row contains every label.
    HeaderSignature(Vec<String>),
    /// N-th `table.wikitable` (0-based). Still checked against `REQUIRED_HEADERS`.
    Position(usize),
}

impl Default for TableSelector {
    fn default() -> Self {
        TableSelector::HeaderSignature(REQUIRED_HEADERS.iter().map(|s| s.to_string()).collect())
    }
}

/// Split a row's text on line breaks into cleaned, non-empty fields.
pub fn split_row_text(row: ElementRef<'_>) -> Vec<String> {
    let text: String = row.text().collect();
    text.split('\n')
        .map(clean_field)
        .filter(|f| !f.is_empty())
        .collect()
}

fn header_matches<S: AsRef<str>>(header: &[String], signature: &[S]) -> bool {
    let cols: Vec<String> = header.iter().map(|h| normalize_column_name(h)).collect();
    signature
        .iter()
        .all(|want| cols.contains(&normalize_column_name(want.as_ref())))
}

/// Parse `html`, pick one wikitable and return its rows, the first as header.
#[tracing::instrument(level = "info", skip(html), fields(bytes = html.len()))]
pub fn extract_table(html: &str, selector: &TableSelector) -> Result<RawTable> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table.wikitable").expect("wikitable selector should parse");
    let row_sel = Selector::parse("tr").expect("row selector should parse");

    let tables: Vec<Vec<Vec<String>>> = document
        .select(&table_sel)
        .map(|table| table.select(&row_sel).map(split_row_text).collect())
        .collect();
    let found = tables.len();
    debug!(found, "wikitables on page");

    let (index, mut rows) = match selector {
        TableSelector::HeaderSignature(signature) => tables
            .into_iter()
            .enumerate()
            .find(|(_, rows)| rows.first().is_some_and(|h| header_matches(h, signature)))
            .ok_or_else(|| {
                anyhow!(
                    "none of the {} wikitables has headers {:?}",
                    found,
                    signature
                )
            })?,
        TableSelector::Position(idx) => {
            let rows = tables.into_iter().nth(*idx).ok_or_else(|| {
                anyhow!("page has {} wikitables, wanted index {}", found, idx)
            })?;
            match rows.first() {
                Some(h) if header_matches(h, REQUIRED_HEADERS) => {}
                Some(h) => bail!(
                    "wikitable {} has headers {:?}, expected {:?}",
                    idx,
                    h,
                    REQUIRED_HEADERS
                ),
                None => bail!("wikitable {} has no rows", idx),
            }
            (*idx, rows)
        }
    };

    let headers = rows.remove(0);
    info!(index, columns = headers.len(), rows = rows.len(), "extracted table");
    Ok(RawTable { headers, rows })
}
