use chrono::Duration;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::DurationCell;
use crate::process::utils::normalize_primes;

// Margin layouts, tried in the order listed in `parse_margin`.
static MARGIN_HMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\+\s+(\d{1,2})h\s+(\d{1,2})'\s+(\d{1,2})"$"#).expect("margin h/m/s regex")
});
static MARGIN_SPACED_MS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\+\s+(\d{1,2})\s+'(\d{1,2})"$"#).expect("margin spaced m/s regex")
});
static MARGIN_MS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\+\s+(\d{1,2})'\s+(\d{1,2})"$"#).expect("margin m/s regex")
});
static MARGIN_S: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\+\s+(\d{1,2})"$"#).expect("margin s regex"));

static OVERALL_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?P<hour>\w+)h\s+(?P<minute>\w+)'\s(?P<second>\w+)""#)
        .expect("overall time regex")
});

/// hours/minutes/seconds → duration; fields must fit a wall clock (23:59:59).
fn clock_duration(h: i64, m: i64, s: i64) -> Option<Duration> {
    if !(0..=23).contains(&h) || !(0..=59).contains(&m) || !(0..=59).contains(&s) {
        return None;
    }
    Duration::try_seconds(h * 3600 + m * 60 + s)
}

fn group(caps: &Captures<'_>, i: usize) -> Option<i64> {
    caps.get(i)?.as_str().parse().ok()
}

/// Parse a winning-gap cell such as `+ 44' 23"` or `+ 2h 59' 21"`.
///
/// The first marker found picks the layout: `h` → `+ Hh M' S"`, ` '` →
/// `+ M 'S"`, `'` → `+ M' S"`, `"` → `+ S"`. A value with none of them is
/// not a time (points years). A picked layout that does not match is
/// malformed.
pub fn parse_margin(raw: &str) -> DurationCell {
    let s = normalize_primes(raw.trim());

    let parsed = if s.contains('h') {
        MARGIN_HMS
            .captures(&s)
            .and_then(|c| clock_duration(group(&c, 1)?, group(&c, 2)?, group(&c, 3)?))
    } else if s.contains(" '") {
        MARGIN_SPACED_MS
            .captures(&s)
            .and_then(|c| clock_duration(0, group(&c, 1)?, group(&c, 2)?))
    } else if s.contains('\'') {
        MARGIN_MS
            .captures(&s)
            .and_then(|c| clock_duration(0, group(&c, 1)?, group(&c, 2)?))
    } else if s.contains('"') {
        MARGIN_S
            .captures(&s)
            .and_then(|c| clock_duration(0, 0, group(&c, 1)?))
    } else {
        return DurationCell::NotTime(raw.to_string());
    };

    match parsed {
        Some(d) => DurationCell::Parsed(d),
        None => DurationCell::Malformed(raw.to_string()),
    }
}

/// Parse a total race time such as `91h 54' 20"`. Hours are unbounded.
pub fn parse_overall_time(raw: &str) -> DurationCell {
    let s = normalize_primes(raw.trim());

    let Some(caps) = OVERALL_TIME.captures(&s) else {
        return if s.contains(['\'', '"']) {
            DurationCell::Malformed(raw.to_string())
        } else {
            DurationCell::NotTime(raw.to_string())
        };
    };

    let total = (|| {
        let h: i64 = caps["hour"].parse().ok()?;
        let m: i64 = caps["minute"].parse().ok()?;
        let sec: i64 = caps["second"].parse().ok()?;
        h.checked_mul(3600)?.checked_add(m.checked_mul(60)?)?.checked_add(sec)
    })();

    match total.and_then(Duration::try_seconds) {
        Some(d) => DurationCell::Parsed(d),
        None => DurationCell::Malformed(raw.to_string()),
    }
}
