use drive_viz::bucket::{bucket_count, normalize};
use drive_viz::models::{AggregatePoint, Mode, ReferenceDate};

fn date(y: i32, m: u32, d: u32) -> ReferenceDate {
    ReferenceDate::from_ymd(y, m, d).unwrap()
}

#[test]
fn lengths_are_fixed_per_mode() {
    let rows = vec![
        AggregatePoint::new("3", 1.0),
        AggregatePoint::new("garbage", 2.0),
        AggregatePoint::new("2025-10-15", 3.0),
    ];
    let d = date(2025, 10, 15);
    assert_eq!(normalize(&rows, Mode::Day, d).len(), 24);
    assert_eq!(normalize(&rows, Mode::Month, d).len(), 31);
    assert_eq!(normalize(&rows, Mode::Year, d).len(), 12);
    assert_eq!(bucket_count(Mode::Month, date(2025, 4, 1)), 30);
}

#[test]
fn empty_input_is_all_zero() {
    for mode in [Mode::Day, Mode::Month, Mode::Year] {
        let d = date(2025, 6, 1);
        let series = normalize(&[], mode, d);
        assert_eq!(series.len(), bucket_count(mode, d));
        assert!(series.iter().all(|b| b.value == 0.0));
    }
}

#[test]
fn day_mode_pads_single_digit_hours() {
    let rows = vec![AggregatePoint::new("5", 8.25), AggregatePoint::new("17", 11.0)];
    let series = normalize(&rows, Mode::Day, date(2025, 10, 1));
    assert_eq!(series[0].label, "00:00");
    assert_eq!(series[23].label, "23:00");
    assert_eq!(series[5].label, "05:00");
    assert_eq!(series[5].value, 8.25);
    assert_eq!(series[17].value, 11.0);
    assert_eq!(series.iter().filter(|b| b.value != 0.0).count(), 2);
}

#[test]
fn month_mode_fills_only_matching_day() {
    let rows = vec![AggregatePoint::new("2025-10-15", 9.5)];
    let series = normalize(&rows, Mode::Month, date(2025, 10, 1));
    assert_eq!(series.len(), 31);
    assert_eq!(series[14].label, "15");
    assert_eq!(series[14].value, 9.5);
    for (i, b) in series.iter().enumerate() {
        assert_eq!(b.label, (i + 1).to_string());
        if i != 14 {
            assert_eq!(b.value, 0.0, "day {} should be empty", i + 1);
        }
    }
}

#[test]
fn month_mode_follows_calendar_length() {
    assert_eq!(normalize(&[], Mode::Month, date(2024, 2, 10)).len(), 29);
    assert_eq!(normalize(&[], Mode::Month, date(2025, 2, 10)).len(), 28);
}

#[test]
fn month_mode_drops_days_past_month_end() {
    // Day 31 parses fine but February has no slot for it.
    let rows = vec![AggregatePoint::new("31", 4.0), AggregatePoint::new("2", 6.0)];
    let series = normalize(&rows, Mode::Month, date(2025, 2, 1));
    assert_eq!(series.len(), 28);
    assert_eq!(series[1].value, 6.0);
    assert_eq!(series.iter().map(|b| b.value).sum::<f64>(), 6.0);
}

#[test]
fn year_mode_uses_month_abbreviations() {
    let rows = vec![
        AggregatePoint::new("2025-03", 12.0),
        AggregatePoint::new("abc", 99.0),
    ];
    let series = normalize(&rows, Mode::Year, date(2025, 1, 1));
    let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
    );
    assert_eq!(series[2].value, 12.0);
    assert_eq!(series.iter().map(|b| b.value).sum::<f64>(), 12.0);
}

#[test]
fn numeric_periods_from_json_are_bucketed() {
    let rows: Vec<AggregatePoint> =
        serde_json::from_str(r#"[{"period": 7, "avg_fuel": 10.5}, {"period": "08", "avg_fuel": 9}]"#)
            .unwrap();
    let series = normalize(&rows, Mode::Day, date(2025, 1, 1));
    assert_eq!(series[7].value, 10.5);
    assert_eq!(series[8].value, 9.0);
}
