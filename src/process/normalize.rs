use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info, warn};

use crate::model::{DurationCell, RaceResult, ResultTable};
use crate::process::corrections::MarginCorrections;
use crate::process::duration::{parse_margin, parse_overall_time};
use crate::process::load::{LoadedRow, LoadedTable};

/// Footnote on the year label marking a stripped title.
pub const CONTROVERSY_MARKER: &str = "[B]";

/// Distance cells are read from their first five characters (`"3,349km"`
/// → `"3,349"`), which holds for every four-digit distance.
pub const DISTANCE_SLICE_WIDTH: usize = 5;

// source column names after normalization
pub const DISTANCE_COLUMN: &str = "distance";
pub const STAGE_WINS_COLUMN: &str = "stage_wins";
pub const STAGES_IN_LEAD_COLUMN: &str = "stages_in_lead";
pub const MARGIN_COLUMN: &str = "margin";
pub const TIME_POINTS_COLUMN: &str = "time/points";

/// What the normalizer dropped or could not parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// `(year label, reason)` for every rejected row.
    pub rejected: Vec<(String, String)>,
    /// Years whose margin looked like a time but did not parse.
    pub malformed_margins: Vec<i32>,
    /// Years whose overall time looked like a time but did not parse.
    pub malformed_times: Vec<i32>,
    /// Years whose margin was replaced from the corrections table.
    pub corrected: Vec<i32>,
}

/// `"1999[B]"` → `(1999, true)`; `"1903"` → `(1903, false)`. Other trailing
/// footnotes are dropped without setting the flag.
pub fn parse_year_key(label: &str) -> Result<(i32, bool)> {
    let label = label.trim();
    let controversial = label.ends_with(CONTROVERSY_MARKER);
    let digits: String = if controversial {
        label.chars().take(4).collect()
    } else {
        strip_footnotes(label).to_string()
    };

    let year: i32 = digits
        .trim()
        .parse()
        .with_context(|| format!("year {:?} is not an integer", label))?;
    if year <= 0 {
        bail!("year {:?} is not positive", label);
    }
    Ok((year, controversial))
}

fn strip_footnotes(label: &str) -> &str {
    let mut s = label.trim_end();
    while s.ends_with(']') {
        match s.rfind('[') {
            Some(i) => s = s[..i].trim_end(),
            None => break,
        }
    }
    s
}

/// First `DISTANCE_SLICE_WIDTH` characters, commas removed, as an integer.
/// A number running past the slice is an error rather than a truncation.
pub fn parse_distance_km(raw: &str) -> Result<i64> {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(DISTANCE_SLICE_WIDTH).collect();
    if let Some(next) = chars.next() {
        if next.is_ascii_digit() || next == ',' {
            bail!(
                "distance {:?} does not fit in {} characters",
                raw,
                DISTANCE_SLICE_WIDTH
            );
        }
    }
    head.replace(',', "")
        .parse::<i64>()
        .with_context(|| format!("distance {:?} is not an integer", raw))
}

pub fn parse_count(raw: &str, column: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("{} {:?} is not an integer", column, raw))
}

struct ColumnMap {
    distance: usize,
    stage_wins: usize,
    stages_in_lead: usize,
    margin: usize,
    time_points: usize,
    passthrough: Vec<usize>,
}

impl ColumnMap {
    fn resolve(table: &LoadedTable) -> Result<Self> {
        let find = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| anyhow!("results table has no `{}` column: {:?}", name, table.columns))
        };
        let distance = find(DISTANCE_COLUMN)?;
        let stage_wins = find(STAGE_WINS_COLUMN)?;
        let stages_in_lead = find(STAGES_IN_LEAD_COLUMN)?;
        let margin = find(MARGIN_COLUMN)?;
        let time_points = find(TIME_POINTS_COLUMN)?;

        let typed = [distance, stage_wins, stages_in_lead, margin, time_points];
        let passthrough = (0..table.columns.len())
            .filter(|i| !typed.contains(i))
            .collect();

        Ok(Self {
            distance,
            stage_wins,
            stages_in_lead,
            margin,
            time_points,
            passthrough,
        })
    }
}

fn normalize_row(
    row: &LoadedRow,
    cols: &ColumnMap,
    corrections: &MarginCorrections,
    report: &mut NormalizeReport,
) -> Result<RaceResult> {
    let (year, controversial) = parse_year_key(&row.year)?;
    let distance_km = parse_distance_km(&row.fields[cols.distance])?;
    let stage_wins = parse_count(&row.fields[cols.stage_wins], STAGE_WINS_COLUMN)?;
    let stages_in_lead = parse_count(&row.fields[cols.stages_in_lead], STAGES_IN_LEAD_COLUMN)?;

    let raw_margin = match corrections.get(year) {
        Some(fixed) => {
            debug!(year, from = %row.fields[cols.margin], to = fixed, "correcting margin");
            report.corrected.push(year);
            fixed
        }
        None => row.fields[cols.margin].as_str(),
    };
    let margin = parse_margin(raw_margin);
    if let DurationCell::Malformed(raw) = &margin {
        warn!(year, raw = %raw, "malformed margin");
        report.malformed_margins.push(year);
    }

    let overall_time = parse_overall_time(&row.fields[cols.time_points]);
    if let DurationCell::Malformed(raw) = &overall_time {
        warn!(year, raw = %raw, "malformed overall time");
        report.malformed_times.push(year);
    }

    Ok(RaceResult {
        year,
        controversial,
        distance_km,
        stage_wins,
        stages_in_lead,
        margin,
        overall_time,
        passthrough: cols.passthrough.iter().map(|&i| row.fields[i].clone()).collect(),
    })
}

/// Derive the typed columns for every row. Fails only when a required
/// column is absent; rows that cannot be typed are rejected and reported.
#[tracing::instrument(level = "info", skip_all, fields(rows = table.rows.len()))]
pub fn normalize_table(
    table: &LoadedTable,
    corrections: &MarginCorrections,
) -> Result<(ResultTable, NormalizeReport)> {
    let cols = ColumnMap::resolve(table)?;
    let passthrough_columns = cols
        .passthrough
        .iter()
        .map(|&i| table.columns[i].clone())
        .collect();

    let mut out = ResultTable::new(passthrough_columns);
    let mut report = NormalizeReport::default();

    for row in &table.rows {
        match normalize_row(row, &cols, corrections, &mut report) {
            Ok(result) if out.rows.contains_key(&result.year) => {
                warn!(year = result.year, "duplicate year; rejecting row");
                report
                    .rejected
                    .push((row.year.clone(), format!("duplicate year {}", result.year)));
            }
            Ok(result) => {
                out.rows.insert(result.year, result);
            }
            Err(e) => {
                warn!(year = %row.year, error = %e, "rejecting row");
                report.rejected.push((row.year.clone(), format!("{:#}", e)));
            }
        }
    }

    info!(
        kept = out.len(),
        rejected = report.rejected.len(),
        malformed_margins = report.malformed_margins.len(),
        malformed_times = report.malformed_times.len(),
        "normalized table"
    );
    Ok((out, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{load_table, RawTable};

    const HEADERS: &[&str] = &[
        "Year",
        "Cyclist",
        "Distance",
        "Time/Points",
        "Margin",
        "Stage wins",
        "Stages in lead",
    ];

    fn table(rows: &[&[&str]]) -> LoadedTable {
        load_table(&RawTable {
            headers: HEADERS.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_year_key() {
        assert_eq!(parse_year_key("1903").unwrap(), (1903, false));
        assert_eq!(parse_year_key("1999[B]").unwrap(), (1999, true));
        assert_eq!(parse_year_key("2005[B]").unwrap(), (2005, true));
        assert_eq!(parse_year_key("1904[A]").unwrap(), (1904, false));
        assert!(parse_year_key("No race").is_err());
        assert!(parse_year_key("0").is_err());
    }

    #[test]
    fn test_distance() {
        assert_eq!(parse_distance_km("3,349km").unwrap(), 3349);
        assert_eq!(parse_distance_km("2,428km (1,509mi)").unwrap(), 2428);
        assert_eq!(parse_distance_km("5,745").unwrap(), 5745);
        assert!(parse_distance_km("10,000km").is_err());
        assert!(parse_distance_km("n/a").is_err());
    }

    #[test]
    fn test_counts() {
        assert_eq!(parse_count("6", STAGE_WINS_COLUMN).unwrap(), 6);
        assert!(parse_count("six", STAGE_WINS_COLUMN).is_err());
    }

    #[test]
    fn test_normalize_rows() {
        let loaded = table(&[
            &["1903", "Maurice Garin", "2,428km", "94h 33' 14\"", "+ 2h 59' 21\"", "3", "6"],
            &["1905", "Louis Trousselier", "2,994km", "35 points", "+ 26 points", "5", "10"],
            &["1929", "Maurice De Waele", "5,286km", "186h 39' 15\"", "+ 44'23\"", "1", "16"],
            &["2000[B]", "Lance Armstrong", "3,662km", "92h 33' 08\"", "+ 6' 02\"", "1", "12"],
        ]);
        let (out, report) = normalize_table(&loaded, &MarginCorrections::builtin()).unwrap();

        assert_eq!(out.len(), 4);
        assert_eq!(out.passthrough_columns, vec!["cyclist"]);
        assert!(report.rejected.is_empty());
        assert_eq!(report.corrected, vec![1929]);

        let garin = out.get(1903).unwrap();
        assert_eq!(garin.distance_km, 2428);
        assert_eq!(garin.stage_wins, 3);
        assert_eq!(garin.stages_in_lead, 6);
        assert!(!garin.controversial);
        assert_eq!(garin.margin_sec(), Some(10761.0));
        assert_eq!(garin.overall_time_sec(), Some(340394.0));
        assert_eq!(out.passthrough_value(garin, "cyclist"), Some("Maurice Garin"));

        let points = out.get(1905).unwrap();
        assert_eq!(points.margin, DurationCell::NotTime("+ 26 points".into()));
        assert_eq!(points.margin_sec(), None);
        assert_eq!(points.overall_time_sec(), None);

        assert_eq!(out.get(1929).unwrap().margin_sec(), Some(2663.0));

        let stripped = out.get(2000).unwrap();
        assert!(stripped.controversial);
        assert_eq!(stripped.margin_sec(), Some(362.0));
    }

    #[test]
    fn test_without_correction_margin_is_malformed() {
        let loaded = table(&[&[
            "1929",
            "Maurice De Waele",
            "5,286km",
            "186h 39' 15\"",
            "+ 44'23\"",
            "1",
            "16",
        ]]);
        let (out, report) = normalize_table(&loaded, &MarginCorrections::default()).unwrap();
        assert!(out.get(1929).unwrap().margin.is_malformed());
        assert_eq!(report.malformed_margins, vec![1929]);
    }

    #[test]
    fn test_bad_rows_rejected() {
        let loaded = table(&[
            &["1903", "Maurice Garin", "2,428km", "94h 33' 14\"", "+ 2h 59' 21\"", "3", "6"],
            &["1903", "Someone Else", "2,428km", "94h 33' 14\"", "+ 1\"", "0", "0"],
            &["2030", "Future Rider", "10,000km", "200h 00' 00\"", "+ 1\"", "2", "2"],
            &["2031", "Future Rider", "3,000km", "90h 00' 00\"", "+ 1\"", "two", "2"],
        ]);
        let (out, report) = normalize_table(&loaded, &MarginCorrections::default()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.get(1903).unwrap().stage_wins, 3);
        let rejected: Vec<&str> = report.rejected.iter().map(|(y, _)| y.as_str()).collect();
        assert_eq!(rejected, vec!["1903", "2030", "2031"]);
        assert!(report.rejected[1].1.contains("does not fit"));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let loaded = load_table(&RawTable {
            headers: vec!["Year".into(), "Cyclist".into()],
            rows: vec![vec!["1903".into(), "Maurice Garin".into()]],
        })
        .unwrap();
        assert!(normalize_table(&loaded, &MarginCorrections::default()).is_err());
    }
}
