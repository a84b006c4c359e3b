use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{fs, io::Write, path::Path};
use tracing::info;

use super::{create_parent, TYPED_COLUMNS};
use crate::model::{format_duration, DurationCell, ResultTable};
use crate::process::RawTable;

/// Scraped rows as-is, header first. Rows keep their own length.
pub fn write_raw<W: Write>(writer: W, raw: &RawTable) -> Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&raw.headers)?;
    for row in &raw.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_raw_csv<P: AsRef<Path>>(path: P, raw: &RawTable) -> Result<()> {
    let path = path.as_ref();
    create_parent(path)?;
    let file = fs::File::create(path).with_context(|| format!("creating {:?}", path))?;
    write_raw(file, raw).with_context(|| format!("writing raw rows to {:?}", path))?;
    info!(path = %path.display(), rows = raw.rows.len(), "wrote raw CSV");
    Ok(())
}

fn duration_field(cell: &DurationCell) -> String {
    cell.duration().map(format_duration).unwrap_or_default()
}

fn seconds_field(secs: Option<f64>) -> String {
    secs.map(|s| format!("{:.1}", s)).unwrap_or_default()
}

/// Final table, one line per year; missing values are empty fields.
pub fn write_results<W: Write>(writer: W, table: &ResultTable) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);

    let mut header = vec!["year".to_string()];
    header.extend(table.passthrough_columns.iter().cloned());
    header.extend(TYPED_COLUMNS.iter().map(|c| c.to_string()));
    wtr.write_record(&header)?;

    for row in table.iter() {
        let mut record = vec![row.year.to_string()];
        record.extend(row.passthrough.iter().cloned());
        record.extend([
            row.distance_km.to_string(),
            row.stage_wins.to_string(),
            row.stages_in_lead.to_string(),
            row.controversial.to_string(),
            duration_field(&row.margin),
            duration_field(&row.overall_time),
            seconds_field(row.overall_time_sec()),
            seconds_field(row.margin_sec()),
        ]);
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_results_csv<P: AsRef<Path>>(path: P, table: &ResultTable) -> Result<()> {
    let path = path.as_ref();
    create_parent(path)?;
    let file = fs::File::create(path).with_context(|| format!("creating {:?}", path))?;
    write_results(file, table).with_context(|| format!("writing results to {:?}", path))?;
    info!(path = %path.display(), rows = table.len(), "wrote results CSV");
    Ok(())
}
