//! Live API tests. Run against a running backend with:
//! `DRIVE_VIZ_API_BASE=http://localhost:8000 cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use drive_viz::bucket::{bucket_count, normalize};
use drive_viz::{Client, Mode, ReferenceDate};

fn client() -> Client {
    let base = std::env::var("DRIVE_VIZ_API_BASE")
        .unwrap_or_else(|_| drive_viz::api::DEFAULT_API_BASE.to_string());
    Client::new(&base).unwrap()
}

#[test]
fn aggregates_normalize_to_full_month() {
    let cli = client();
    let vehicles = cli.vehicles().unwrap();
    let Some(vehicle) = vehicles.first() else {
        return;
    };
    let date = ReferenceDate::today();
    let rows = cli.aggregates(vehicle, Mode::Month, date).unwrap();
    let series = normalize(&rows, Mode::Month, date);
    assert_eq!(series.len(), bucket_count(Mode::Month, date));
}

#[test]
fn unknown_vehicle_has_no_metrics() {
    let rows = client()
        .metrics("no-such-vehicle-xyz", Mode::Day, ReferenceDate::today())
        .unwrap();
    assert!(rows.is_empty());
}
