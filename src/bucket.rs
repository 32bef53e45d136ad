//! Sparse-to-dense bucketing of aggregate rows.
//!
//! The backend only returns rows for periods that actually had data, and it is
//! not consistent about how it spells a period (`"7"` vs `"07"`, `"2025-10-1"`
//! vs `"01"`). [`normalize`] maps every row onto a fixed slot of the display
//! mode and emits the complete range, zero-filling whatever was missing.
//!
//! ```
//! use drive_viz::bucket::normalize;
//! use drive_viz::models::{AggregatePoint, Mode, ReferenceDate};
//!
//! let rows = vec![AggregatePoint::new("5", 9.8)];
//! let series = normalize(&rows, Mode::Day, ReferenceDate::from_ymd(2025, 10, 1).unwrap());
//! assert_eq!(series.len(), 24);
//! assert_eq!(series[5].label, "05:00");
//! assert_eq!(series[5].value, 9.8);
//! ```

use crate::models::{AggregatePoint, Bucket, Mode, NormalizedSeries, ReferenceDate};
use ahash::AHashMap;
use regex::Regex;
use std::sync::LazyLock;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const HOURS_PER_DAY: u32 = 24;
const MONTHS_PER_YEAR: u32 = 12;

static TRAILING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})$").expect("valid trailing-digit regex"));

/// One attempt at pulling a day-of-month out of a raw period string.
type DayParser = fn(&str) -> Option<i64>;

/// Tried in order; the first parser that yields an integer decides the key.
const DAY_PARSERS: [DayParser; 3] = [day_from_dash_component, day_from_suffix, day_from_whole];

/// Expand sparse aggregate rows into the full bucket range of `mode`.
///
/// - `Day`: 24 buckets labeled `"00:00"`..`"23:00"`
/// - `Month`: one bucket per day of `reference`'s month, labeled `"1"`..`"N"`
/// - `Year`: 12 buckets labeled `"Jan"`..`"Dec"`
///
/// Rows whose period cannot be mapped to a slot are dropped. When two rows map to
/// the same slot the later one wins.
pub fn normalize(
    points: &[AggregatePoint],
    mode: Mode,
    reference: ReferenceDate,
) -> NormalizedSeries {
    let mut lookup: AHashMap<u32, f64> = AHashMap::with_capacity(points.len());
    for p in points {
        match bucket_key(&p.period, mode) {
            Some(key) => {
                lookup.insert(key, p.avg_fuel);
            }
            None => log::debug!("dropping {mode} row with unusable period {:?}", p.period),
        }
    }

    bucket_range(mode, reference)
        .map(|key| Bucket {
            label: bucket_label(key, mode),
            value: lookup.get(&key).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Number of buckets `normalize` emits for this mode and reference date.
pub fn bucket_count(mode: Mode, reference: ReferenceDate) -> usize {
    match mode {
        Mode::Day => HOURS_PER_DAY as usize,
        Mode::Month => reference.days_in_month() as usize,
        Mode::Year => MONTHS_PER_YEAR as usize,
    }
}

/// Canonical keys in display order: hours 0..24, days 1..=N, months 1..=12.
fn bucket_range(mode: Mode, reference: ReferenceDate) -> std::ops::Range<u32> {
    match mode {
        Mode::Day => 0..HOURS_PER_DAY,
        Mode::Month => 1..reference.days_in_month() + 1,
        Mode::Year => 1..MONTHS_PER_YEAR + 1,
    }
}

fn bucket_label(key: u32, mode: Mode) -> String {
    match mode {
        Mode::Day => format!("{key:02}:00"),
        Mode::Month => key.to_string(),
        Mode::Year => MONTH_ABBREVIATIONS[(key - 1) as usize].to_string(),
    }
}

/// Map a raw period string to its slot key, or `None` if it fits no slot.
pub fn bucket_key(period: &str, mode: Mode) -> Option<u32> {
    match mode {
        Mode::Day => hour_key(period),
        Mode::Month => day_key(period),
        Mode::Year => month_key(period),
    }
}

/// Left-pad to two characters with `'0'`, then keep the first two.
fn hour_key(period: &str) -> Option<u32> {
    let padded = format!("{period:0>2}");
    let head: String = padded.chars().take(2).collect();
    if !head.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    head.parse::<u32>().ok().filter(|h| *h < HOURS_PER_DAY)
}

fn day_key(period: &str) -> Option<u32> {
    let s = period.trim();
    let day = DAY_PARSERS.iter().find_map(|parse| parse(s))?;
    (1..=31).contains(&day).then_some(day as u32)
}

/// `"YYYY-MM"`: month from the last two characters.
fn month_key(period: &str) -> Option<u32> {
    let chars: Vec<char> = period.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(2)..].iter().collect();
    let month = leading_int(&tail)?;
    (1..=MONTHS_PER_YEAR as i64)
        .contains(&month)
        .then_some(month as u32)
}

fn day_from_dash_component(s: &str) -> Option<i64> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() >= 3 {
        leading_int(parts[2])
    } else {
        None
    }
}

fn day_from_suffix(s: &str) -> Option<i64> {
    TRAILING_DIGITS
        .captures(s)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

fn day_from_whole(s: &str) -> Option<i64> {
    leading_int(s)
}

/// Integer prefix of `s` after leading whitespace and an optional sign
/// (`"15T08:00"` -> 15, `"-3"` -> -3, `"x1"` -> None).
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse::<i64>().ok().map(|v| sign * v)
}
