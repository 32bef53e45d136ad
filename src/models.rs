use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display granularity of the fuel chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// 24 hourly buckets of one day.
    Day,
    /// One bucket per day of the reference month.
    Month,
    /// 12 monthly buckets of the reference year.
    Year,
}

impl Mode {
    pub fn to_query_param(&self) -> &'static str {
        match self {
            Mode::Day => "Day",
            Mode::Month => "Month",
            Mode::Year => "Year",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_query_param())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "d" => Ok(Mode::Day),
            "month" | "m" => Ok(Mode::Month),
            "year" | "y" => Ok(Mode::Year),
            other => Err(format!("unknown mode '{other}', expected Day, Month or Year")),
        }
    }
}

/// Calendar date that selects which day/month/year the chart covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReferenceDate(NaiveDate);

impl ReferenceDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in local time.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse `YYYY-MM-DD`, `YYYY-MM` (first of month) or `YYYY` (January 1st).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self(d));
        }
        let mut parts = s.split('-');
        let year = parts.next()?.parse::<i32>().ok()?;
        let month = match parts.next() {
            Some(m) => m.parse::<u32>().ok()?,
            None => 1,
        };
        if parts.next().is_some() {
            return None;
        }
        Self::from_ymd(year, month, 1)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Number of days in the month containing this date (28..=31).
    pub fn days_in_month(&self) -> u32 {
        let (y, m) = (self.0.year(), self.0.month());
        let first = NaiveDate::from_ymd_opt(y, m, 1);
        let next = if m == 12 {
            NaiveDate::from_ymd_opt(y + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(y, m + 1, 1)
        };
        match (first, next) {
            (Some(a), Some(b)) => (b - a).num_days() as u32,
            // Only reachable at chrono's maximum representable year.
            _ => 31,
        }
    }

    pub fn to_query_param(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_param())
    }
}

/// One aggregated fuel value as returned by `/metrics/{vehicle}/aggregates`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatePoint {
    /// Hour (`"7"`, `"07"`), date (`"2025-10-15"`) or month (`"2025-03"`) depending on mode.
    /// Some backends send hours as JSON numbers; accept both.
    #[serde(deserialize_with = "de_period")]
    pub period: String,
    #[serde(deserialize_with = "de_f64_or_null")]
    pub avg_fuel: f64,
}

impl AggregatePoint {
    pub fn new(period: impl Into<String>, avg_fuel: f64) -> Self {
        Self {
            period: period.into(),
            avg_fuel,
        }
    }
}

/// Serde helper: accept a period as a string, an integer, a float or null.
fn de_period<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct PeriodVisitor;

    impl<'de> Visitor<'de> for PeriodVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a string or number identifying a period")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(PeriodVisitor)
}

fn de_f64_or_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// One raw telemetry record.
///
/// Field aliases match the column headers of the telemetry CSV export, so the
/// same struct reads API JSON and CSV files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineMetrics {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "Vehicle")]
    pub vehicle: String,
    #[serde(alias = "Date")]
    pub date: String,
    #[serde(alias = "Time")]
    pub time: String,
    #[serde(default, alias = "RPM")]
    pub rpm: Option<f64>,
    #[serde(default, alias = "Speed")]
    pub speed: Option<f64>,
    #[serde(default, alias = "TPS/APP")]
    pub tps_app: Option<f64>,
    #[serde(default, alias = "Brake")]
    pub brake: Option<f64>,
    #[serde(default, alias = "Steering")]
    pub steering: Option<f64>,
    #[serde(default, alias = "Coolant Temp (°C)")]
    pub coolant_temp_c: Option<f64>,
    #[serde(default, alias = "Fuel Consumption (L/100km)")]
    pub fuel_l_per_100km: Option<f64>,
    #[serde(default, alias = "Running Hour")]
    pub running_hour: Option<f64>,
    #[serde(default, alias = "ODO (km)")]
    pub odo_km: Option<f64>,
}

/// Response of `POST /upload-csv`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResult {
    pub rows_inserted: u64,
}

/// One fixed slot of a normalized series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub value: f64,
}

/// Complete, gap-free series in canonical bucket order.
pub type NormalizedSeries = Vec<Bucket>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_date_accepts_short_forms() {
        let d = ReferenceDate::parse("2025-10").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2025, 10, 1));
        let y = ReferenceDate::parse("2024").unwrap();
        assert_eq!((y.year(), y.month(), y.day()), (2024, 1, 1));
        assert!(ReferenceDate::parse("2024-13").is_none());
        assert!(ReferenceDate::parse("nope").is_none());
    }

    #[test]
    fn days_in_month_handles_december_and_leap_years() {
        assert_eq!(ReferenceDate::from_ymd(2024, 12, 5).unwrap().days_in_month(), 31);
        assert_eq!(ReferenceDate::from_ymd(2024, 2, 1).unwrap().days_in_month(), 29);
        assert_eq!(ReferenceDate::from_ymd(2100, 2, 1).unwrap().days_in_month(), 28);
        assert_eq!(ReferenceDate::from_ymd(2025, 4, 30).unwrap().days_in_month(), 30);
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("MONTH".parse::<Mode>().unwrap(), Mode::Month);
        assert_eq!("day".parse::<Mode>().unwrap(), Mode::Day);
        assert!("week".parse::<Mode>().is_err());
    }
}
