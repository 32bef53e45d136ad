use crate::models::{AggregatePoint, Bucket, EngineMetrics};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Prefix cells that spreadsheet programs would evaluate as formulas.
fn sanitize_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{s}"),
        _ => s.to_string(),
    }
}

/// Save a normalized series as CSV with a `label,value` header.
pub fn save_series_csv<P: AsRef<Path>>(series: &[Bucket], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("label", "value"))?;
    for b in series {
        wtr.serialize((sanitize_cell(&b.label), b.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a normalized series as a pretty JSON array of `{label, value}`.
pub fn save_series_json<P: AsRef<Path>>(series: &[Bucket], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(series)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Read a telemetry CSV export (`Vehicle,Date,Time,RPM,...`) or one already using
/// the API's snake_case column names.
pub fn load_metrics_csv<P: AsRef<Path>>(path: P) -> Result<Vec<EngineMetrics>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<EngineMetrics>().enumerate() {
        // Header is line 1, so data row `i` sits on line `i + 2`.
        let row = rec.with_context(|| format!("{} line {}", path.display(), i + 2))?;
        out.push(row);
    }
    log::debug!("read {} telemetry rows from {}", out.len(), path.display());
    Ok(out)
}

/// Read aggregate rows previously saved from `/metrics/{vehicle}/aggregates`.
pub fn load_aggregates_json<P: AsRef<Path>>(path: P) -> Result<Vec<AggregatePoint>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse aggregates from {}", path.display()))
}
