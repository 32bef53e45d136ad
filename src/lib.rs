//! drive_viz
//!
//! A small Rust library for charting vehicle driving-behavior telemetry served by
//! the dashboard backend. Pairs with the `drive-viz` CLI.
//!
//! ### Features
//! - Fetch vehicles, raw telemetry and fuel aggregates; upload telemetry CSVs
//! - Normalize sparse `{period, avg_fuel}` rows into complete hour/day/month series
//! - Compute bar and radar chart geometry without overlapping labels
//! - Render both charts to SVG, export series as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use drive_viz::{Client, Mode, ReferenceDate};
//!
//! let client = Client::default();
//! let date = ReferenceDate::parse("2025-10-15").unwrap();
//! let rows = client.aggregates("ABC-123", Mode::Day, date)?;
//! let series = drive_viz::bucket::normalize(&rows, Mode::Day, date);
//! drive_viz::viz::plot_bar_chart(
//!     &series,
//!     "fuel.svg",
//!     &drive_viz::layout::BarConfig::default(),
//!     &drive_viz::viz::RenderOptions::default(),
//! )?;
//! let metrics = client.metrics("ABC-123", Mode::Day, date)?;
//! let radar = drive_viz::stats::radar_input(&metrics);
//! println!("{:?}", radar.vals);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod bucket;
pub mod error;
pub mod layout;
pub mod models;
pub mod stats;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use error::LayoutError;
pub use models::{AggregatePoint, Bucket, EngineMetrics, Mode, NormalizedSeries, ReferenceDate};
