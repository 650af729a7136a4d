//! FILENAME: core/engine/src/filter.rs
//! Predicate sets - the explicit representation of active dashboard filters.
//!
//! A `PredicateSet` is built from user input by the widget layer and passed
//! to `apply_filters`. A field that carries no entry is unconstrained (the
//! "All" dropdown choice is modeled as an absent key, not a sentinel value).
//! All active predicates combine with logical AND.

use chrono::{Datelike, NaiveDate};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::record::{GroupField, OrderRecord};

// ============================================================================
// PREDICATE SET
// ============================================================================

/// The combination of active filters for one dashboard interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredicateSet {
    /// Exact-match equality constraints, keyed by field.
    equals: FxHashMap<GroupField, String>,

    /// Restrict to orders placed in this calendar year.
    year: Option<i32>,

    /// Restrict to orders within this date range, bounds inclusive.
    date_range: Option<(NaiveDate, NaiveDate)>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality constraint on a field.
    pub fn with_equals(mut self, field: GroupField, value: impl Into<String>) -> Self {
        self.equals.insert(field, value.into());
        self
    }

    /// Sets or clears a field constraint from a dropdown selection.
    /// `None` corresponds to the "All" choice and removes the constraint.
    pub fn select(&mut self, field: GroupField, value: Option<String>) {
        match value {
            Some(v) => {
                self.equals.insert(field, v);
            }
            None => {
                self.equals.remove(&field);
            }
        }
    }

    /// Restricts to a single order year (inclusive calendar-year bounds).
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Restricts to an inclusive date range.
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    /// True when no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.equals.is_empty() && self.year.is_none() && self.date_range.is_none()
    }

    /// Tests a single record against every active predicate.
    pub fn matches(&self, record: &OrderRecord) -> bool {
        for (field, expected) in &self.equals {
            if field.value_of(record) != expected.as_str() {
                return false;
            }
        }

        if let Some(year) = self.year {
            if record.order_date.year() != year {
                return false;
            }
        }

        if let Some((start, end)) = self.date_range {
            if record.order_date < start || record.order_date > end {
                return false;
            }
        }

        true
    }
}

// ============================================================================
// FILTER APPLICATION
// ============================================================================

/// Returns the subset of records matching every active predicate.
///
/// Pure with respect to the source: the record set is only borrowed, and the
/// empty predicate set returns all records unchanged (in order).
pub fn apply_filters<'a>(
    records: &'a [OrderRecord],
    predicates: &PredicateSet,
) -> Vec<&'a OrderRecord> {
    records.iter().filter(|r| predicates.matches(r)).collect()
}
