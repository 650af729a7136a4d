// FILENAME: core/persistence/src/xlsx_reader.rs

use crate::PersistenceError;
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use engine::{OrderRecord, RecordSet};
use std::path::Path;

// ============================================================================
// EXPECTED COLUMNS
// ============================================================================

const COL_ORDER_DATE: &str = "Order Date";
const COL_CATEGORY: &str = "Category";
const COL_SEGMENT: &str = "Segment";
const COL_COUNTRY: &str = "Country";
const COL_REGION: &str = "Region";
const COL_MARKET: &str = "Market";
const COL_SHIP_MODE: &str = "Ship Mode";
const COL_PRODUCT_NAME: &str = "Product Name";
const COL_SALES: &str = "Sales";
const COL_PROFIT: &str = "Profit";
const COL_DISCOUNT: &str = "Discount";
const COL_ROW_ID: &str = "Row ID";

/// Resolved column positions for the fixed order-file layout.
struct ColumnMap {
    order_date: usize,
    category: usize,
    segment: usize,
    country: usize,
    region: usize,
    market: usize,
    ship_mode: usize,
    product_name: usize,
    sales: usize,
    profit: usize,
    discount: usize,
    row_id: usize,
}

impl ColumnMap {
    /// Resolves each expected column by header name (case-sensitive,
    /// whitespace-trimmed). A missing header aborts the load.
    fn resolve(header: &[Data]) -> Result<ColumnMap, PersistenceError> {
        let find = |name: &'static str| -> Result<usize, PersistenceError> {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
                .ok_or_else(|| PersistenceError::MissingColumn(name.to_string()))
        };

        Ok(ColumnMap {
            order_date: find(COL_ORDER_DATE)?,
            category: find(COL_CATEGORY)?,
            segment: find(COL_SEGMENT)?,
            country: find(COL_COUNTRY)?,
            region: find(COL_REGION)?,
            market: find(COL_MARKET)?,
            ship_mode: find(COL_SHIP_MODE)?,
            product_name: find(COL_PRODUCT_NAME)?,
            sales: find(COL_SALES)?,
            profit: find(COL_PROFIT)?,
            discount: find(COL_DISCOUNT)?,
            row_id: find(COL_ROW_ID)?,
        })
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Loads the order records from the first worksheet of an XLSX file.
pub fn load_orders(path: &Path) -> Result<RecordSet, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let first_sheet = sheet_names.first().ok_or_else(|| {
        PersistenceError::InvalidFormat("Workbook contains no sheets".to_string())
    })?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| {
        PersistenceError::InvalidFormat(format!("Sheet \"{}\" is empty", first_sheet))
    })?;
    let columns = ColumnMap::resolve(header)?;

    let mut records = Vec::new();

    for (i, row) in rows.enumerate() {
        // 1-based spreadsheet row number, accounting for the header row.
        let row_num = (i + 2) as u32;

        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            log::debug!("skipping blank row {}", row_num);
            continue;
        }

        records.push(parse_record(row, &columns, row_num)?);
    }

    log::debug!("loaded {} order records from {:?}", records.len(), path);
    Ok(RecordSet::new(records))
}

fn parse_record(
    row: &[Data],
    columns: &ColumnMap,
    row_num: u32,
) -> Result<OrderRecord, PersistenceError> {
    Ok(OrderRecord {
        row_id: number_cell(row, columns.row_id, COL_ROW_ID, row_num)? as u32,
        order_date: date_cell(row, columns.order_date, row_num)?,
        category: text_cell(row, columns.category),
        segment: text_cell(row, columns.segment),
        country: text_cell(row, columns.country),
        region: text_cell(row, columns.region),
        market: text_cell(row, columns.market),
        ship_mode: text_cell(row, columns.ship_mode),
        product_name: text_cell(row, columns.product_name),
        sales: number_cell(row, columns.sales, COL_SALES, row_num)?,
        profit: number_cell(row, columns.profit, COL_PROFIT, row_num)?,
        discount: number_cell(row, columns.discount, COL_DISCOUNT, row_num)?,
    })
}

// ============================================================================
// CELL CONVERSION
// ============================================================================

fn text_cell(row: &[Data], idx: usize) -> String {
    match row.get(idx) {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn number_cell(
    row: &[Data],
    idx: usize,
    column: &'static str,
    row_num: u32,
) -> Result<f64, PersistenceError> {
    match row.get(idx) {
        Some(Data::Float(f)) => Ok(*f),
        Some(Data::Int(i)) => Ok(*i as f64),
        Some(Data::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            PersistenceError::InvalidCell {
                row: row_num,
                column,
                detail: format!("expected a number, got \"{}\"", s),
            }
        }),
        Some(Data::Empty) | None => Ok(0.0),
        Some(other) => Err(PersistenceError::InvalidCell {
            row: row_num,
            column,
            detail: format!("expected a number, got {:?}", other),
        }),
    }
}

fn date_cell(row: &[Data], idx: usize, row_num: u32) -> Result<NaiveDate, PersistenceError> {
    let invalid = |detail: String| PersistenceError::InvalidCell {
        row: row_num,
        column: COL_ORDER_DATE,
        detail,
    };

    match row.get(idx) {
        Some(Data::DateTime(dt)) => serial_to_date(dt.as_f64())
            .ok_or_else(|| invalid(format!("serial date {} out of range", dt.as_f64()))),
        Some(Data::Float(f)) => {
            serial_to_date(*f).ok_or_else(|| invalid(format!("serial date {} out of range", f)))
        }
        Some(Data::Int(i)) => serial_to_date(*i as f64)
            .ok_or_else(|| invalid(format!("serial date {} out of range", i))),
        Some(Data::DateTimeIso(s)) | Some(Data::String(s)) => {
            parse_date_text(s.trim()).ok_or_else(|| invalid(format!("unparseable date \"{}\"", s)))
        }
        other => Err(invalid(format!("expected a date, got {:?}", other))),
    }
}

/// Converts an Excel serial date (days since 1899-12-30) to a calendar date.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    // ISO datetime first ("2023-01-15T00:00:00"), then the date layouts
    // seen in superstore exports.
    if let Some((date_part, _)) = text.split_once('T') {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            return Some(date);
        }
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(parse_date_text("2023-01-15"), Some(expected));
        assert_eq!(parse_date_text("01/15/2023"), Some(expected));
        assert_eq!(parse_date_text("2023-01-15T00:00:00"), Some(expected));
        assert_eq!(parse_date_text("not a date"), None);
    }

    #[test]
    fn serial_dates_use_the_excel_epoch() {
        // 45000 days after 1899-12-30.
        assert_eq!(
            serial_to_date(45000.0),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
        assert_eq!(serial_to_date(1.0), NaiveDate::from_ymd_opt(1899, 12, 31));
    }
}
