// src/config.rs

use anyhow::{Context, Result};
use std::{env, path::PathBuf, time::Duration};

use crate::extract::TableSelector;

/// Article listing every general classification winner.
pub const DEFAULT_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_Tour_de_France_general_classification_winners";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_URL: &str = "TDF_URL";
pub const ENV_TABLE_INDEX: &str = "TDF_TABLE_INDEX";
pub const ENV_TIMEOUT_SECS: &str = "TDF_TIMEOUT_SECS";
pub const ENV_CORRECTIONS: &str = "TDF_CORRECTIONS";
pub const ENV_RAW_CSV: &str = "TDF_RAW_CSV";
pub const ENV_CSV: &str = "TDF_CSV";
pub const ENV_PARQUET: &str = "TDF_PARQUET";

/// Run settings. Every field has a compile-time default; environment
/// variables only override.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub url: String,
    pub table: TableSelector,
    pub timeout: Duration,
    /// YAML file of extra year-keyed margin corrections.
    pub corrections_path: Option<PathBuf>,
    /// Dump of the scraped rows before any cleaning.
    pub raw_csv: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub parquet: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            table: TableSelector::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            corrections_path: None,
            raw_csv: None,
            csv: None,
            parquet: None,
        }
    }
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key → value lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Config::default();

        if let Some(url) = get(ENV_URL) {
            cfg.url = url;
        }
        if let Some(idx) = get(ENV_TABLE_INDEX) {
            let idx: usize = idx
                .trim()
                .parse()
                .with_context(|| format!("{} must be a table index, got {:?}", ENV_TABLE_INDEX, idx))?;
            cfg.table = TableSelector::Position(idx);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().with_context(|| {
                format!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT_SECS, secs)
            })?;
            cfg.timeout = Duration::from_secs(secs);
        }
        cfg.corrections_path = get(ENV_CORRECTIONS).map(PathBuf::from);
        cfg.raw_csv = get(ENV_RAW_CSV).map(PathBuf::from);
        cfg.csv = get(ENV_CSV).map(PathBuf::from);
        cfg.parquet = get(ENV_PARQUET).map(PathBuf::from);

        Ok(cfg)
    }
}
