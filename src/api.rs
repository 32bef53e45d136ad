//! Synchronous client for the **driving-behavior backend API**.
//!
//! Endpoints:
//! - `GET /vehicles` → vehicle identifiers
//! - `GET /metrics/{vehicle}?date=&mode=` → raw telemetry rows
//! - `GET /metrics/{vehicle}/aggregates?date=&mode=` → `{period, avg_fuel}` rows
//! - `POST /upload-csv` → bulk import of a telemetry CSV
//!
//! ### Notes
//! - GET requests retry on 5xx/transport errors with a short backoff; uploads never retry.
//! - A 404 from `/metrics/{vehicle}` means "no rows" and is returned as an empty list.
//!
//! Typical usage:
//! ```no_run
//! # use drive_viz::{Client, Mode, ReferenceDate};
//! let client = Client::default();
//! let date = ReferenceDate::parse("2025-10-01").unwrap();
//! let rows = client.aggregates("ABC-123", Mode::Month, date)?;
//! let series = drive_viz::bucket::normalize(&rows, Mode::Month, date);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::{AggregatePoint, EngineMetrics, Mode, ReferenceDate, UploadResult};
use crate::storage;
use anyhow::{Context, Result, anyhow, bail};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::blocking::Response;
use reqwest::blocking::multipart::Form;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;

const RETRY_BACKOFF_MS: [u64; 3] = [100, 300, 700];

/// Base URL used when neither `--api` nor `DRIVE_VIZ_API_BASE` is given.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE).expect("reqwest client build")
    }
}

// Vehicle ids are registration plates; keep the usual unreserved marks readable.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn enc_segment(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string()
}

impl Client {
    /// Build a client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(60)) // uploads can be large
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("drive_viz/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// List known vehicle identifiers.
    pub fn vehicles(&self) -> Result<Vec<String>> {
        let url = format!("{}/vehicles", self.base_url);
        self.get_json(&url)
    }

    /// Raw telemetry rows for `vehicle`. Returns an empty list when the API has none.
    pub fn metrics(
        &self,
        vehicle: &str,
        mode: Mode,
        date: ReferenceDate,
    ) -> Result<Vec<EngineMetrics>> {
        let url = format!(
            "{}/metrics/{}?{}",
            self.base_url,
            enc_segment(vehicle),
            query(mode, date)
        );
        let resp = self.get(&url).with_context(|| format!("GET {}", url))?;
        if resp.status() == StatusCode::NOT_FOUND {
            log::info!("no metrics for vehicle {vehicle}");
            return Ok(Vec::new());
        }
        decode(resp).with_context(|| format!("GET {}", url))
    }

    /// Average fuel consumption per period for `vehicle`.
    pub fn aggregates(
        &self,
        vehicle: &str,
        mode: Mode,
        date: ReferenceDate,
    ) -> Result<Vec<AggregatePoint>> {
        let url = format!(
            "{}/metrics/{}/aggregates?{}",
            self.base_url,
            enc_segment(vehicle),
            query(mode, date)
        );
        self.get_json(&url)
    }

    /// Upload a telemetry CSV for bulk import.
    ///
    /// The file is parsed locally first so obviously broken files never reach the server.
    pub fn upload_csv<P: AsRef<Path>>(&self, path: P) -> Result<UploadResult> {
        let path = path.as_ref();
        let rows = storage::load_metrics_csv(path)?;
        if rows.is_empty() {
            bail!("{} contains no data rows", path.display());
        }
        log::info!("uploading {} rows from {}", rows.len(), path.display());

        let url = format!("{}/upload-csv", self.base_url);
        let form = Form::new()
            .file("file", path)
            .with_context(|| format!("read {}", path.display()))?;
        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .with_context(|| format!("POST {}", url))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            bail!("upload failed with HTTP {}: {}", status, body.trim());
        }
        resp.json().context("decode upload response")
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.get(url).with_context(|| format!("GET {}", url))?;
        decode(resp).with_context(|| format!("GET {}", url))
    }

    /// GET with a small retry for transient failures (5xx / network errors).
    fn get(&self, url: &str) -> Result<Response> {
        let mut last_err = anyhow!("no attempt made");
        for (attempt, backoff_ms) in RETRY_BACKOFF_MS.iter().enumerate() {
            log::debug!("GET {url}");
            match self.http.get(url).send() {
                Ok(r) if r.status().is_server_error() => {
                    log::warn!("GET {url} returned HTTP {}", r.status());
                    last_err = anyhow!("HTTP {}", r.status());
                }
                Ok(r) => return Ok(r),
                Err(e) => {
                    log::warn!("GET {url} failed: {e}");
                    last_err = e.into();
                }
            }
            if attempt + 1 < RETRY_BACKOFF_MS.len() {
                std::thread::sleep(Duration::from_millis(*backoff_ms));
            }
        }
        bail!("network error: {last_err:#}");
    }
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    if !resp.status().is_success() {
        bail!("request failed with HTTP {}", resp.status());
    }
    resp.json().context("decode json")
}

fn query(mode: Mode, date: ReferenceDate) -> String {
    format!("date={}&mode={}", date.to_query_param(), mode.to_query_param())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_segments_are_percent_encoded() {
        assert_eq!(enc_segment("ABC-123"), "ABC-123");
        assert_eq!(enc_segment(" 1กข 234 "), "1%E0%B8%81%E0%B8%82%20234");
        assert_eq!(enc_segment("a/b"), "a%2Fb");
    }

    #[test]
    fn query_uses_iso_date_and_mode_name() {
        let d = ReferenceDate::from_ymd(2025, 3, 7).unwrap();
        assert_eq!(query(Mode::Year, d), "date=2025-03-07&mode=Year");
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let c = Client::new("http://example.test/api/").unwrap();
        assert_eq!(c.base_url, "http://example.test/api");
    }
}
