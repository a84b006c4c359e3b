// src/output/mod.rs

use anyhow::{Context, Result};
use std::{fs, path::Path};

pub mod csv;
pub mod parquet;

/// Typed columns written after `year` and the passthrough columns.
pub const TYPED_COLUMNS: &[&str] = &[
    "distance_km",
    "stage_wins",
    "stages_in_lead",
    "controversial",
    "margin",
    "overall_time",
    "overall_time_sec",
    "margin_sec",
];

/// Create the directory `path` will be written into, if it has one.
pub(crate) fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    Ok(())
}
