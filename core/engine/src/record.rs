//! FILENAME: core/engine/src/record.rs
//! Order record model - the immutable source data for the pipeline.
//!
//! A `RecordSet` is an explicitly constructed value with the lifecycle of a
//! session: built once by the loader, then only read. All downstream
//! computation (filtering, aggregation) borrows from it and never mutates it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// ORDER RECORD
// ============================================================================

/// One retail order line item, as loaded from the source spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Row identifier from the source file.
    pub row_id: u32,

    /// Date the order was placed.
    pub order_date: NaiveDate,

    pub category: String,
    pub segment: String,
    pub country: String,
    pub region: String,
    pub market: String,
    pub ship_mode: String,
    pub product_name: String,

    /// Sale amount in currency units.
    pub sales: f64,

    /// Profit in currency units. May be negative.
    pub profit: f64,

    /// Discount as a fraction (0.0 - 1.0).
    pub discount: f64,
}

// ============================================================================
// FIELD AND MEASURE ENUMS
// ============================================================================

/// A categorical field of an order record that can be grouped or filtered on.
///
/// Keeping this a closed enum means an unknown group key is a compile error,
/// not something the pipeline has to detect at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupField {
    Category,
    Segment,
    Country,
    Region,
    Market,
    ShipMode,
    ProductName,
}

impl GroupField {
    /// Returns the record's value for this field.
    pub fn value_of<'a>(&self, record: &'a OrderRecord) -> &'a str {
        match self {
            GroupField::Category => &record.category,
            GroupField::Segment => &record.segment,
            GroupField::Country => &record.country,
            GroupField::Region => &record.region,
            GroupField::Market => &record.market,
            GroupField::ShipMode => &record.ship_mode,
            GroupField::ProductName => &record.product_name,
        }
    }
}

/// A numeric measure of an order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    Sales,
    Profit,
    Discount,
}

impl Measure {
    /// Returns the record's value for this measure.
    pub fn value_of(&self, record: &OrderRecord) -> f64 {
        match self {
            Measure::Sales => record.sales,
            Measure::Profit => record.profit,
            Measure::Discount => record.discount,
        }
    }
}

/// Supported reduction operators for a derived table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationType {
    Sum,
    Count,
}

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::Sum
    }
}

// ============================================================================
// RECORD SET
// ============================================================================

/// The loaded order records. Immutable after construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    records: Vec<OrderRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<OrderRecord>) -> Self {
        RecordSet { records }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values of a field, in first-appearance order.
    /// Used to populate dropdown widgets.
    pub fn distinct_values(&self, field: GroupField) -> Vec<String> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut values = Vec::new();
        for record in &self.records {
            let value = field.value_of(record);
            if seen.insert(value) {
                values.push(value.to_string());
            }
        }
        values
    }

    /// Distinct order years, in first-appearance order.
    /// Used to populate the year dropdown.
    pub fn distinct_years(&self) -> Vec<i32> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut years = Vec::new();
        for record in &self.records {
            let year = record.order_date.year();
            if seen.insert(year) {
                years.push(year);
            }
        }
        years
    }

    /// Earliest and latest order date, for date-range slider bounds.
    /// Returns None on an empty record set.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.order_date;
        let bounds = self.records.iter().fold((first, first), |(min, max), r| {
            (min.min(r.order_date), max.max(r.order_date))
        });
        Some(bounds)
    }
}
