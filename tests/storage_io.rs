use drive_viz::models::Bucket;
use drive_viz::storage;
use std::fs;
use tempfile::tempdir;

fn sample(n: usize) -> Vec<Bucket> {
    (0..n)
        .map(|i| Bucket {
            label: format!("{i:02}:00"),
            value: 7.0 + i as f64,
        })
        .collect()
}

#[test]
fn save_series_csv_and_json() {
    let rows = sample(3);
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("series.csv");
    storage::save_series_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("label,value"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());
    assert!(csv_txt.contains("01:00,8.0"));

    let json_path = dir.path().join("series.json");
    storage::save_series_json(&rows, &json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), rows.len());
    assert_eq!(arr[2]["label"], "02:00");
    assert_eq!(arr[2]["value"], 9.0);
}

// Labels come from upstream period strings; keep spreadsheet apps from
// evaluating them as formulas when the export is opened.
#[test]
fn csv_labels_are_prefixed_to_avoid_formulas() {
    let rows = vec![
        Bucket {
            label: "=HYPERLINK(\"http://evil\")".into(),
            value: 1.0,
        },
        Bucket {
            label: "Mar".into(),
            value: 2.0,
        },
    ];
    let dir = tempdir().unwrap();
    let path = dir.path().join("inj.csv");
    storage::save_series_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let labels: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert!(labels[0].starts_with('\''), "not prefixed: {}", labels[0]);
    assert!(labels[0].contains("=HYPERLINK"));
    assert_eq!(labels[1], "Mar");
}

#[test]
fn telemetry_csv_uses_export_headers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("telemetry.csv");
    fs::write(
        &path,
        "Vehicle,Date,Time,RPM,Speed,TPS/APP,Brake,Steering,Coolant Temp (°C),Fuel Consumption (L/100km),Running Hour,ODO (km)\n\
         ABC-123,2025-10-15,08:00:00,1800,60,22.5,0,-15,85,10.9,1500.5,120000\n\
         ABC-123,2025-10-15,08:00:01,,61,,3.5,4,,11.1,,\n",
    )
    .unwrap();

    let rows = storage::load_metrics_csv(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].vehicle, "ABC-123");
    assert_eq!(rows[0].rpm, Some(1800.0));
    assert_eq!(rows[0].steering, Some(-15.0));
    assert_eq!(rows[0].coolant_temp_c, Some(85.0));
    assert_eq!(rows[0].fuel_l_per_100km, Some(10.9));
    assert_eq!(rows[0].odo_km, Some(120000.0));
    assert_eq!(rows[1].rpm, None);
    assert_eq!(rows[1].brake, Some(3.5));
    assert_eq!(rows[1].running_hour, None);
}

#[test]
fn telemetry_csv_reports_bad_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(
        &path,
        "vehicle,date,time,rpm\nA,2025-01-01,00:00,900\nA,2025-01-01,00:01,fast\n",
    )
    .unwrap();
    let err = storage::load_metrics_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("line 3"), "{err:#}");
}

#[test]
fn aggregates_json_round_trips_from_api_shape() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("agg.json");
    fs::write(&path, r#"[{"period":"2025-10-01","avg_fuel":10.2},{"period":3,"avg_fuel":8}]"#)
        .unwrap();
    let rows = storage::load_aggregates_json(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].period, "3");
}
