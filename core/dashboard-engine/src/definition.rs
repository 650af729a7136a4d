//! FILENAME: core/dashboard-engine/src/definition.rs
//! Dashboard Selection - The serializable state of every dashboard control.
//!
//! This is the explicit replacement for implicit widget-to-filter binding:
//! the widget layer fills in a `DashboardSelection`, and the calculation
//! layer derives predicate sets from it. A `None` means the "All" choice.

use chrono::NaiveDate;
use engine::{GroupField, Measure, PredicateSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// METRIC
// ============================================================================

/// The user-selectable chart metric (Sales vs Profit dropdowns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Sales,
    Profit,
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Sales
    }
}

impl Metric {
    pub fn measure(&self) -> Measure {
        match self {
            Metric::Sales => Measure::Sales,
            Metric::Profit => Measure::Profit,
        }
    }
}

// ============================================================================
// SELECTION STATE
// ============================================================================

fn default_top_count() -> usize {
    5
}

/// One snapshot of every dashboard control. Immutable user intent; a new
/// snapshot arrives with each widget change and triggers a full recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSelection {
    /// Sidebar dropdowns. `None` is the "All" choice.
    pub category: Option<String>,
    pub segment: Option<String>,
    pub country: Option<String>,

    /// Year dropdown. Scopes the summary totals only, matching the original
    /// dashboard where the year control sits next to the totals tiles and
    /// ignores the sidebar.
    pub year: Option<i32>,

    /// Date-range slider, bounds inclusive.
    pub date_range: Option<(NaiveDate, NaiveDate)>,

    /// Metric for the trend chart.
    #[serde(default)]
    pub metric: Metric,

    /// Metric for the top-N ranking.
    #[serde(default)]
    pub top_metric: Metric,

    /// How many rows the top-N ranking keeps.
    #[serde(default = "default_top_count")]
    pub top_count: usize,
}

impl Default for DashboardSelection {
    fn default() -> Self {
        DashboardSelection {
            category: None,
            segment: None,
            country: None,
            year: None,
            date_range: None,
            metric: Metric::default(),
            top_metric: Metric::default(),
            top_count: default_top_count(),
        }
    }
}

impl DashboardSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicates driven by the sidebar controls and the date slider.
    pub fn sidebar_predicates(&self) -> PredicateSet {
        let mut predicates = PredicateSet::new();
        predicates.select(GroupField::Category, self.category.clone());
        predicates.select(GroupField::Segment, self.segment.clone());
        predicates.select(GroupField::Country, self.country.clone());
        if let Some((start, end)) = self.date_range {
            predicates = predicates.with_date_range(start, end);
        }
        predicates
    }

    /// Predicates for the summary totals: the year dropdown alone.
    pub fn totals_predicates(&self) -> PredicateSet {
        match self.year {
            Some(year) => PredicateSet::new().with_year(year),
            None => PredicateSet::new(),
        }
    }
}
