//! FILENAME: tests/common/mod.rs
//! Shared fixture data for the dashboard integration tests.

use chrono::NaiveDate;
use engine::{OrderRecord, RecordSet};

pub struct OrdersFixture;

impl OrdersFixture {
    /// (row_id, date, category, segment, country, region, market, ship mode,
    /// product, sales, profit, discount)
    #[allow(clippy::type_complexity)]
    pub fn data() -> Vec<(u32, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, f64, f64, f64)> {
        vec![
            (1, "2022-01-10", "Technology", "Consumer", "Sweden", "North", "EU", "Standard Class", "Phone", 200.0, 40.0, 0.0),
            (2, "2022-03-05", "Furniture", "Corporate", "Norway", "North", "EU", "First Class", "Desk", 120.0, -10.0, 0.2),
            (3, "2022-03-18", "Technology", "Corporate", "Sweden", "North", "EU", "Second Class", "Laptop", 300.0, 60.0, 0.1),
            (4, "2023-01-15", "Technology", "Consumer", "Denmark", "South", "EU", "Standard Class", "Phone", 150.0, 30.0, 0.0),
            (5, "2023-01-20", "Office Supplies", "Home Office", "Sweden", "North", "EU", "Standard Class", "Stapler", 20.0, 5.0, 0.0),
            (6, "2023-04-02", "Furniture", "Consumer", "Denmark", "South", "APAC", "First Class", "Chair", 80.0, 8.0, 0.3),
            (7, "2023-04-12", "Technology", "Consumer", "Sweden", "North", "APAC", "Same Day", "Laptop", 500.0, 100.0, 0.0),
            (8, "2023-06-30", "Office Supplies", "Corporate", "Norway", "North", "EU", "Standard Class", "Binder", 10.0, 2.0, 0.5),
        ]
    }

    pub fn records() -> RecordSet {
        let records = Self::data()
            .into_iter()
            .map(
                |(row_id, date, category, segment, country, region, market, ship_mode, product, sales, profit, discount)| {
                    OrderRecord {
                        row_id,
                        order_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                        category: category.to_string(),
                        segment: segment.to_string(),
                        country: country.to_string(),
                        region: region.to_string(),
                        market: market.to_string(),
                        ship_mode: ship_mode.to_string(),
                        product_name: product.to_string(),
                        sales,
                        profit,
                        discount,
                    }
                },
            )
            .collect();
        RecordSet::new(records)
    }
}
