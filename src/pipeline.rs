// src/pipeline.rs

use anyhow::Result;
use reqwest::Client;
use tracing::info;

use crate::{
    config::Config,
    extract, fetch,
    model::ResultTable,
    output,
    process::{self, MarginCorrections, NormalizeReport},
};

/// Everything one run produced.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub table: ResultTable,
    pub report: NormalizeReport,
    /// Incomplete rows dropped by the loader.
    pub dropped: usize,
}

/// Fetch → extract → load → normalize, then write whichever outputs `config`
/// asks for.
pub async fn run(client: &Client, config: &Config) -> Result<ScrapeOutcome> {
    let corrections = match &config.corrections_path {
        Some(path) => MarginCorrections::load(path)?,
        None => MarginCorrections::builtin(),
    };

    let html = fetch::fetch_html(client, &config.url).await?;

    let raw = extract::extract_table(&html, &config.table)?;
    if let Some(path) = &config.raw_csv {
        output::csv::write_raw_csv(path, &raw)?;
    }

    let loaded = process::load_table(&raw)?;
    let (table, report) = process::normalize_table(&loaded, &corrections)?;

    if let Some(path) = &config.csv {
        output::csv::write_results_csv(path, &table)?;
    }
    if let Some(path) = &config.parquet {
        output::parquet::write_parquet(path, &table)?;
    }

    info!(
        years = table.len(),
        dropped = loaded.dropped,
        rejected = report.rejected.len(),
        malformed_margins = report.malformed_margins.len(),
        malformed_times = report.malformed_times.len(),
        corrected = report.corrected.len(),
        "scrape complete"
    );
    Ok(ScrapeOutcome {
        table,
        report,
        dropped: loaded.dropped,
    })
}
