//! FILENAME: core/dashboard-engine/src/engine.rs
//! Dashboard Engine - builds every chart dataset from one selection.
//!
//! Algorithm, per selection change:
//! 1. Derive the sidebar predicate set and filter the record set once
//! 2. Build each chart's derived table from the shared filtered subset
//! 3. Compute the summary totals from the year predicate over the full set
//! 4. Assemble the DashboardView together with the widget option lists

use engine::{
    aggregate, aggregate_monthly, apply_filters, top_n, AggregationType, GroupField, Measure,
    OrderRecord, RecordSet,
};

use crate::definition::{DashboardSelection, Metric};
use crate::view::{DashboardView, ScatterPoint, SummaryTotals, WidgetOptions};

/// Runs the full pipeline for one selection and returns the dashboard.
pub fn build_dashboard(records: &RecordSet, selection: &DashboardSelection) -> DashboardView {
    let filtered = apply_filters(records.records(), &selection.sidebar_predicates());

    DashboardView {
        totals: summary_totals(records, selection),
        scatter_points: scatter_points(&filtered),
        sales_by_category: aggregate(
            &filtered,
            &[GroupField::Category],
            Measure::Sales,
            AggregationType::Sum,
        ),
        top_products: top_products(&filtered, selection.top_metric, selection.top_count),
        monthly_trend: monthly_trend(&filtered, selection.metric),
        profit_by_market_segment: aggregate(
            &filtered,
            &[GroupField::Market, GroupField::Segment],
            Measure::Profit,
            AggregationType::Sum,
        ),
        sales_by_ship_mode: aggregate(
            &filtered,
            &[GroupField::ShipMode],
            Measure::Sales,
            AggregationType::Sum,
        ),
        sales_by_region: aggregate(
            &filtered,
            &[GroupField::Region],
            Measure::Sales,
            AggregationType::Sum,
        ),
        profit_by_category: aggregate(
            &filtered,
            &[GroupField::Category],
            Measure::Profit,
            AggregationType::Sum,
        ),
        options: widget_options(records),
    }
}

/// Total sales and profit for the summary tiles.
///
/// Scoped by the year dropdown only: the sidebar predicates deliberately do
/// not apply here, so the tiles always show the whole year's figures.
pub fn summary_totals(records: &RecordSet, selection: &DashboardSelection) -> SummaryTotals {
    let filtered = apply_filters(records.records(), &selection.totals_predicates());

    filtered.iter().fold(SummaryTotals::default(), |acc, r| {
        SummaryTotals {
            sales: acc.sales + r.sales,
            profit: acc.profit + r.profit,
        }
    })
}

/// Per-record points for the discount/sales scatter chart.
pub fn scatter_points(filtered: &[&OrderRecord]) -> Vec<ScatterPoint> {
    filtered
        .iter()
        .map(|r| ScatterPoint {
            discount: r.discount,
            sales: r.sales,
            category: r.category.clone(),
        })
        .collect()
}

/// The top `count` products ranked by the selected metric.
pub fn top_products(filtered: &[&OrderRecord], metric: Metric, count: usize) -> engine::DerivedTable {
    let by_product = aggregate(
        filtered,
        &[GroupField::ProductName],
        metric.measure(),
        AggregationType::Sum,
    );
    top_n(&by_product, count)
}

/// The selected metric summed per month, in chronological order.
pub fn monthly_trend(filtered: &[&OrderRecord], metric: Metric) -> engine::DerivedTable {
    aggregate_monthly(filtered, metric.measure(), AggregationType::Sum).sorted_by_key()
}

/// Option lists for every dashboard control.
pub fn widget_options(records: &RecordSet) -> WidgetOptions {
    WidgetOptions {
        categories: records.distinct_values(GroupField::Category),
        segments: records.distinct_values(GroupField::Segment),
        countries: records.distinct_values(GroupField::Country),
        years: records.distinct_years(),
        date_bounds: records.date_bounds(),
    }
}
