//! FILENAME: core/dashboard-engine/src/lib.rs
//! Dashboard subsystem for the sales analysis charts.
//!
//! This crate turns a loaded record set plus one dashboard selection into the
//! derived tables every chart consumes. It depends on `engine` for the record
//! model and the filter/aggregate pipeline. Rendering is someone else's job:
//! the output here is data, serializable for whatever draws it.
//!
//! Layers:
//! - `definition`: Serializable selection state (what the user chose)
//! - `engine`: Chart dataset builders (HOW we calculate)
//! - `view`: The assembled dashboard output (WHAT we display)

pub mod definition;
pub mod engine;
pub mod view;

pub use definition::{DashboardSelection, Metric};
pub use engine::{
    build_dashboard, monthly_trend, scatter_points, summary_totals, top_products, widget_options,
};
pub use view::{DashboardView, ScatterPoint, SummaryTotals, WidgetOptions};
