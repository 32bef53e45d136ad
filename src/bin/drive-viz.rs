use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use drive_viz::api::DEFAULT_API_BASE;
use drive_viz::layout::{BarConfig, RadarConfig};
use drive_viz::viz::{NO_DATA_TEXT, RenderOptions};
use drive_viz::{Client, Mode, ReferenceDate};
use drive_viz::{bucket, stats, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "drive-viz",
    version,
    about = "Fetch, normalize & chart vehicle driving-behavior telemetry"
)]
struct Cli {
    /// Base URL of the telemetry API.
    #[arg(long, global = true, env = "DRIVE_VIZ_API_BASE", default_value = DEFAULT_API_BASE)]
    api: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List vehicles known to the API.
    Vehicles,
    /// Fuel consumption bar chart for one day, month or year.
    Bar(BarArgs),
    /// Driving-behavior radar chart (RPM, speed, throttle, brake, steering).
    Radar(RadarArgs),
    /// Upload a telemetry CSV to the API.
    Upload(UploadArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct Period {
    /// Display mode: Day (hourly), Month (daily) or Year (monthly).
    #[arg(short, long, default_value = "Day")]
    mode: Mode,
    /// Reference date (YYYY-MM-DD, YYYY-MM or YYYY). Defaults to today.
    #[arg(short, long, value_parser = parse_date)]
    date: Option<ReferenceDate>,
}

#[derive(Args, Debug)]
struct BarArgs {
    /// Vehicle identifier (registration).
    #[arg(short, long, required_unless_present = "input")]
    vehicle: Option<String>,
    #[command(flatten)]
    period: Period,
    /// Read aggregate rows from a JSON file instead of the API.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Write the chart to this path (.svg).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Chart height in pixels.
    #[arg(long, default_value_t = 300.0)]
    height: f64,
    /// Minimum chart width in pixels; wider series grow past it.
    #[arg(long, default_value_t = 800.0)]
    min_width: f64,
    /// Horizontal pixels reserved per bucket.
    #[arg(long, default_value_t = 60.0)]
    slot_width: f64,
    /// Y-axis unit title.
    #[arg(long, default_value = "L/100km")]
    unit: String,
    /// Locale for number labels (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Save the normalized series (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print the normalized series to stdout.
    #[arg(long, default_value_t = false)]
    print: bool,
    /// Print summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct RadarArgs {
    /// Vehicle identifier (registration).
    #[arg(short, long, required_unless_present = "csv")]
    vehicle: Option<String>,
    #[command(flatten)]
    period: Period,
    /// Compute from a local telemetry CSV instead of the API.
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write the chart to this path (.svg).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Side length of the square chart in pixels.
    #[arg(long, default_value_t = 280.0)]
    size: f64,
}

#[derive(Args, Debug)]
struct UploadArgs {
    /// Telemetry CSV file.
    file: PathBuf,
}

fn parse_date(s: &str) -> Result<ReferenceDate, String> {
    ReferenceDate::parse(s).ok_or_else(|| format!("invalid date '{s}', expected YYYY-MM-DD, YYYY-MM or YYYY"))
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Vehicles => cmd_vehicles(&cli.api),
        Command::Bar(args) => cmd_bar(&cli.api, args),
        Command::Radar(args) => cmd_radar(&cli.api, args),
        Command::Upload(args) => cmd_upload(&cli.api, args),
    }
}

fn cmd_vehicles(api: &str) -> Result<()> {
    let client = Client::new(api)?;
    for v in client.vehicles()? {
        println!("{v}");
    }
    Ok(())
}

fn cmd_bar(api: &str, args: BarArgs) -> Result<()> {
    let mode = args.period.mode;
    let date = args.period.date.unwrap_or_else(ReferenceDate::today);

    let rows = match (&args.input, &args.vehicle) {
        (Some(path), _) => storage::load_aggregates_json(path)?,
        (None, Some(vehicle)) => Client::new(api)?.aggregates(vehicle, mode, date)?,
        (None, None) => anyhow::bail!("either --vehicle or --input is required"),
    };
    if rows.is_empty() {
        log::warn!("no aggregate rows for {mode} {date}; chart will be all zeros");
    }
    let series = bucket::normalize(&rows, mode, date);

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_series_csv(&series, path)?,
            "json" => storage::save_series_json(&series, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} buckets to {}", series.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let config = BarConfig {
            height: args.height,
            min_width: args.min_width,
            pixels_per_slot: args.slot_width,
            unit_label: args.unit.clone(),
            ..BarConfig::default()
        };
        let opts = RenderOptions {
            locale: args.locale.clone(),
            ..RenderOptions::default()
        };
        viz::plot_bar_chart(&series, plot_path, &config, &opts)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    if args.print {
        for b in &series {
            println!("{}\t{}", b.label, fmt_opt(Some(b.value)));
        }
    }

    if args.stats {
        let s = stats::series_summary(&series);
        println!(
            "{} {}  buckets={} filled={}  min={} max={} mean={} median={} peak={}",
            mode,
            date,
            s.count,
            s.filled,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median),
            s.peak_label.as_deref().unwrap_or("NA")
        );
    }

    Ok(())
}

fn cmd_radar(api: &str, args: RadarArgs) -> Result<()> {
    let mode = args.period.mode;
    let date = args.period.date.unwrap_or_else(ReferenceDate::today);

    let metrics = match (&args.csv, &args.vehicle) {
        (Some(path), _) => storage::load_metrics_csv(path)?,
        (None, Some(vehicle)) => Client::new(api)?.metrics(vehicle, mode, date)?,
        (None, None) => anyhow::bail!("either --vehicle or --csv is required"),
    };
    let input = stats::radar_input(&metrics);

    for (label, val) in input.labels.iter().zip(input.vals.iter()) {
        println!("{label}\t{}", fmt_opt(Some(*val)));
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let config = RadarConfig {
            size: args.size,
            ..RadarConfig::default()
        };
        let opts = RenderOptions {
            overlay: metrics.is_empty().then(|| NO_DATA_TEXT.to_string()),
            ..RenderOptions::default()
        };
        viz::plot_radar_chart(&input, plot_path, &config, &opts)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }
    Ok(())
}

fn cmd_upload(api: &str, args: UploadArgs) -> Result<()> {
    let client = Client::new(api)?;
    let res = client.upload_csv(&args.file)?;
    println!("Uploaded {} rows", res.rows_inserted);
    Ok(())
}
