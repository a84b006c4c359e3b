use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, BooleanArray, DurationSecondArray, Float64Array, Int64Array, StringArray},
    datatypes::{DataType, Field, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{fs::File, path::Path, sync::Arc};
use tracing::info;

use super::{create_parent, TYPED_COLUMNS};
use crate::model::{DurationCell, RaceResult, ResultTable};

/// Arrow schema for `table`: `year`, passthrough strings, then typed columns.
pub fn results_schema(table: &ResultTable) -> Schema {
    let mut fields = vec![Field::new("year", DataType::Int64, false)];
    fields.extend(
        table
            .passthrough_columns
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, false)),
    );
    // (type, nullable) per entry of TYPED_COLUMNS, same order
    let typed = [
        (DataType::Int64, false),
        (DataType::Int64, false),
        (DataType::Int64, false),
        (DataType::Boolean, false),
        (DataType::Duration(TimeUnit::Second), true),
        (DataType::Duration(TimeUnit::Second), true),
        (DataType::Float64, true),
        (DataType::Float64, true),
    ];
    debug_assert_eq!(typed.len(), TYPED_COLUMNS.len());
    fields.extend(
        TYPED_COLUMNS
            .iter()
            .zip(typed)
            .map(|(name, (ty, nullable))| Field::new(*name, ty, nullable)),
    );
    Schema::new(fields)
}

fn duration_array(table: &ResultTable, cell: impl Fn(&RaceResult) -> &DurationCell) -> ArrayRef {
    Arc::new(DurationSecondArray::from(
        table
            .iter()
            .map(|r| cell(r).duration().map(|d| d.num_seconds()))
            .collect::<Vec<_>>(),
    ))
}

/// Whole table as one record batch.
pub fn to_record_batch(table: &ResultTable) -> Result<RecordBatch> {
    let schema = Arc::new(results_schema(table));

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    columns.push(Arc::new(Int64Array::from_iter_values(
        table.iter().map(|r| r.year as i64),
    )));
    for idx in 0..table.passthrough_columns.len() {
        columns.push(Arc::new(StringArray::from_iter_values(
            table.iter().map(|r| r.passthrough[idx].as_str()),
        )));
    }
    columns.push(Arc::new(Int64Array::from_iter_values(table.iter().map(|r| r.distance_km))));
    columns.push(Arc::new(Int64Array::from_iter_values(table.iter().map(|r| r.stage_wins))));
    columns.push(Arc::new(Int64Array::from_iter_values(
        table.iter().map(|r| r.stages_in_lead),
    )));
    columns.push(Arc::new(BooleanArray::from(
        table.iter().map(|r| r.controversial).collect::<Vec<_>>(),
    )));
    columns.push(duration_array(table, |r| &r.margin));
    columns.push(duration_array(table, |r| &r.overall_time));
    columns.push(Arc::new(Float64Array::from(
        table.iter().map(|r| r.overall_time_sec()).collect::<Vec<_>>(),
    )));
    columns.push(Arc::new(Float64Array::from(
        table.iter().map(|r| r.margin_sec()).collect::<Vec<_>>(),
    )));

    RecordBatch::try_new(schema, columns).context("building results record batch")
}

/// SNAPPY-compressed Parquet file holding the whole table.
pub fn write_parquet<P: AsRef<Path>>(path: P, table: &ResultTable) -> Result<()> {
    let path = path.as_ref();
    create_parent(path)?;

    let batch = to_record_batch(table)?;
    let file = File::create(path).with_context(|| format!("creating results file {:?}", path))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating Arrow writer for results")?;
    writer.write(&batch).context("writing results batch")?;
    writer.close().context("closing results writer")?;

    info!(path = %path.display(), rows = batch.num_rows(), "wrote results Parquet");
    Ok(())
}
