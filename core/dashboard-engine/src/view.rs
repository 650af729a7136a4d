//! FILENAME: core/dashboard-engine/src/view.rs
//! Dashboard View - the assembled output handed to the rendering layer.
//!
//! Every field is one chart's dataset (or the option lists the widget layer
//! needs). The view is a plain value: serializable, no rendering concerns.

use chrono::NaiveDate;
use engine::DerivedTable;
use serde::{Deserialize, Serialize};

/// The two summary tiles at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub sales: f64,
    pub profit: f64,
}

/// One point of the discount/sales scatter chart. The only chart fed by raw
/// filtered records instead of an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub discount: f64,
    pub sales: f64,
    /// Scatter series key (point color).
    pub category: String,
}

/// Option lists for the dashboard controls, derived from the record set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetOptions {
    pub categories: Vec<String>,
    pub segments: Vec<String>,
    pub countries: Vec<String>,
    pub years: Vec<i32>,
    /// Min/max order date for the date-range slider. None when no records.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

/// The complete dashboard: every chart's derived data for one selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub totals: SummaryTotals,
    pub scatter_points: Vec<ScatterPoint>,
    pub sales_by_category: DerivedTable,
    pub top_products: DerivedTable,
    pub monthly_trend: DerivedTable,
    pub profit_by_market_segment: DerivedTable,
    pub sales_by_ship_mode: DerivedTable,
    pub sales_by_region: DerivedTable,
    pub profit_by_category: DerivedTable,
    pub options: WidgetOptions,
}
