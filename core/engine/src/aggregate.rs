//! FILENAME: core/engine/src/aggregate.rs
//! Aggregation pipeline - turns filtered records into chart-ready tables.
//!
//! A derived table is a small ordered sequence of (key, value) rows produced
//! by grouping records on one or more fields and reducing a measure with sum
//! or count. Rows appear in first-appearance (group) order; `top_n` is the
//! only operation that re-orders them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::record::{AggregationType, GroupField, Measure, OrderRecord};

// ============================================================================
// DERIVED TABLE
// ============================================================================

/// Key values for one group. Dashboards group by at most two fields, so the
/// inline capacity avoids per-row allocations in the common case.
pub type GroupKey = SmallVec<[String; 2]>;

/// One row of a derived table: a group key and its reduced measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    pub keys: GroupKey,
    pub value: f64,
}

impl DerivedRow {
    /// The first (often only) key component.
    pub fn key(&self) -> &str {
        self.keys.first().map(String::as_str).unwrap_or("")
    }
}

/// Grouped/aggregated output consumed by a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedTable {
    rows: Vec<DerivedRow>,
}

impl DerivedTable {
    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the value column over all rows.
    pub fn value_total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    /// Looks up the value for an exact key combination.
    pub fn get(&self, keys: &[&str]) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.keys.len() == keys.len() && r.keys.iter().zip(keys).all(|(a, b)| a == b))
            .map(|r| r.value)
    }

    /// Returns a copy with rows sorted ascending by key.
    /// Month buckets are "YYYY-MM" strings, so this is chronological for them.
    pub fn sorted_by_key(&self) -> DerivedTable {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| a.keys.cmp(&b.keys));
        DerivedTable { rows }
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Groups records by the given fields and reduces the measure with `op`.
///
/// One output row per distinct key combination, in first-appearance order.
/// Empty input yields an empty table.
pub fn aggregate(
    records: &[&OrderRecord],
    group_fields: &[GroupField],
    measure: Measure,
    op: AggregationType,
) -> DerivedTable {
    aggregate_by_key(records, measure, op, |record| {
        group_fields
            .iter()
            .map(|f| f.value_of(record).to_string())
            .collect()
    })
}

/// Groups records by containing month ("YYYY-MM") and reduces the measure.
///
/// Months with no matching records are omitted, not zero-filled. Rows are in
/// first-appearance order like any other aggregate; callers that want a time
/// series apply `sorted_by_key`.
pub fn aggregate_monthly(
    records: &[&OrderRecord],
    measure: Measure,
    op: AggregationType,
) -> DerivedTable {
    aggregate_by_key(records, measure, op, |record| {
        let mut keys = GroupKey::new();
        keys.push(month_key(record.order_date));
        keys
    })
}

/// The month bucket label for a date: the date truncated to its month.
pub fn month_key(date: chrono::NaiveDate) -> String {
    use chrono::Datelike;
    format!("{:04}-{:02}", date.year(), date.month())
}

fn aggregate_by_key<F>(
    records: &[&OrderRecord],
    measure: Measure,
    op: AggregationType,
    key_of: F,
) -> DerivedTable
where
    F: Fn(&OrderRecord) -> GroupKey,
{
    let mut index: FxHashMap<GroupKey, usize> = FxHashMap::default();
    let mut rows: Vec<DerivedRow> = Vec::new();

    for record in records {
        let contribution = match op {
            AggregationType::Sum => measure.value_of(record),
            AggregationType::Count => 1.0,
        };

        let keys = key_of(record);
        match index.get(&keys) {
            Some(&row_idx) => rows[row_idx].value += contribution,
            None => {
                index.insert(keys.clone(), rows.len());
                rows.push(DerivedRow {
                    keys,
                    value: contribution,
                });
            }
        }
    }

    DerivedTable { rows }
}

// ============================================================================
// TOP-N
// ============================================================================

/// Truncates a derived table to its N largest values.
///
/// Sorts descending by value and keeps the first `n` rows. The sort is
/// stable, so ties keep their original group order, and the operation is
/// idempotent.
pub fn top_n(table: &DerivedTable, n: usize) -> DerivedTable {
    let mut rows = table.rows.clone();
    rows.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    rows.truncate(n);
    DerivedTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(category: &str, product: &str, date: NaiveDate, sales: f64, profit: f64) -> OrderRecord {
        OrderRecord {
            row_id: 0,
            order_date: date,
            category: category.to_string(),
            segment: "Consumer".to_string(),
            country: "Sweden".to_string(),
            region: "North".to_string(),
            market: "EU".to_string(),
            ship_mode: "Standard".to_string(),
            product_name: product.to_string(),
            sales,
            profit,
            discount: 0.0,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Vec<OrderRecord> {
        vec![
            record("Technology", "Phone", d(2023, 1, 15), 100.0, 20.0),
            record("Furniture", "Desk", d(2023, 1, 20), 50.0, -5.0),
            record("Technology", "Laptop", d(2023, 2, 3), 30.0, 8.0),
        ]
    }

    fn refs(records: &[OrderRecord]) -> Vec<&OrderRecord> {
        records.iter().collect()
    }

    #[test]
    fn sum_by_category_matches_worked_example() {
        let records = sample();
        let table = aggregate(
            &refs(&records),
            &[GroupField::Category],
            Measure::Sales,
            AggregationType::Sum,
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&["Technology"]), Some(130.0));
        assert_eq!(table.get(&["Furniture"]), Some(50.0));
        // First-appearance order, not sorted.
        assert_eq!(table.rows()[0].key(), "Technology");
    }

    #[test]
    fn sum_is_conserved_across_grouping() {
        let records = sample();
        let filtered = refs(&records);
        let table = aggregate(
            &filtered,
            &[GroupField::Category],
            Measure::Sales,
            AggregationType::Sum,
        );

        let direct: f64 = filtered.iter().map(|r| r.sales).sum();
        assert_eq!(table.value_total(), direct);
    }

    #[test]
    fn count_op_counts_records_per_group() {
        let records = sample();
        let table = aggregate(
            &refs(&records),
            &[GroupField::Category],
            Measure::Sales,
            AggregationType::Count,
        );

        assert_eq!(table.get(&["Technology"]), Some(2.0));
        assert_eq!(table.get(&["Furniture"]), Some(1.0));
    }

    #[test]
    fn profit_sums_may_be_negative() {
        let records = sample();
        let table = aggregate(
            &refs(&records),
            &[GroupField::Category],
            Measure::Profit,
            AggregationType::Sum,
        );

        assert_eq!(table.get(&["Furniture"]), Some(-5.0));
    }

    #[test]
    fn two_key_grouping_produces_one_row_per_combination() {
        let records = vec![
            record("Technology", "Phone", d(2023, 1, 1), 10.0, 1.0),
            record("Technology", "Phone", d(2023, 1, 2), 15.0, 1.0),
            record("Technology", "Desk", d(2023, 1, 3), 20.0, 1.0),
        ];
        let table = aggregate(
            &refs(&records),
            &[GroupField::Category, GroupField::ProductName],
            Measure::Sales,
            AggregationType::Sum,
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&["Technology", "Phone"]), Some(25.0));
        assert_eq!(table.get(&["Technology", "Desk"]), Some(20.0));
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = aggregate(&[], &[GroupField::Category], Measure::Sales, AggregationType::Sum);
        assert!(table.is_empty());
        assert_eq!(table.value_total(), 0.0);
    }

    #[test]
    fn monthly_buckets_collapse_same_month() {
        let records = sample();
        let table = aggregate_monthly(&refs(&records), Measure::Sales, AggregationType::Sum);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&["2023-01"]), Some(150.0));
        assert_eq!(table.get(&["2023-02"]), Some(30.0));
    }

    #[test]
    fn monthly_buckets_omit_empty_months() {
        let records = vec![
            record("Technology", "Phone", d(2023, 1, 10), 10.0, 1.0),
            record("Technology", "Phone", d(2023, 4, 10), 20.0, 1.0),
        ];
        let table = aggregate_monthly(&refs(&records), Measure::Sales, AggregationType::Sum);

        // No 2023-02 / 2023-03 rows.
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&["2023-02"]), None);
    }

    #[test]
    fn sorted_by_key_orders_month_buckets_chronologically() {
        let records = vec![
            record("Technology", "Phone", d(2023, 11, 1), 1.0, 0.0),
            record("Technology", "Phone", d(2023, 2, 1), 2.0, 0.0),
            record("Technology", "Phone", d(2022, 12, 1), 3.0, 0.0),
        ];
        let table = aggregate_monthly(&refs(&records), Measure::Sales, AggregationType::Sum)
            .sorted_by_key();

        let keys: Vec<&str> = table.rows().iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["2022-12", "2023-02", "2023-11"]);
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let records = vec![
            record("A", "P1", d(2023, 1, 1), 10.0, 0.0),
            record("B", "P2", d(2023, 1, 1), 30.0, 0.0),
            record("C", "P3", d(2023, 1, 1), 20.0, 0.0),
        ];
        let table = aggregate(
            &refs(&records),
            &[GroupField::Category],
            Measure::Sales,
            AggregationType::Sum,
        );
        let top = top_n(&table, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top.rows()[0].key(), "B");
        assert_eq!(top.rows()[1].key(), "C");
    }

    #[test]
    fn top_n_is_idempotent_and_stable_on_ties() {
        let records = vec![
            record("A", "P1", d(2023, 1, 1), 20.0, 0.0),
            record("B", "P2", d(2023, 1, 1), 20.0, 0.0),
            record("C", "P3", d(2023, 1, 1), 5.0, 0.0),
        ];
        let table = aggregate(
            &refs(&records),
            &[GroupField::Category],
            Measure::Sales,
            AggregationType::Sum,
        );

        let top = top_n(&table, 2);
        // Tie between A and B keeps original group order.
        assert_eq!(top.rows()[0].key(), "A");
        assert_eq!(top.rows()[1].key(), "B");
        assert_eq!(top_n(&top, 2), top);
    }

    #[test]
    fn top_n_larger_than_table_returns_all_rows_sorted() {
        let records = sample();
        let table = aggregate(
            &refs(&records),
            &[GroupField::Category],
            Measure::Sales,
            AggregationType::Sum,
        );
        let top = top_n(&table, 10);

        assert_eq!(top.len(), table.len());
        assert_eq!(top.rows()[0].key(), "Technology");
    }
}
