use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::{DataError, DataResult};
use super::model::{
    COL_PRICE, COL_SALES, COL_SALES_DATE, COL_UNITS_ORDERED, RawSalesRow, SalesDataset,
    SalesRecord,
};

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Interpret a textual sale date. Month-first for slash-separated dates.
pub fn parse_sale_date(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// ---------------------------------------------------------------------------
// prepare
// ---------------------------------------------------------------------------

/// Turn raw rows into an analysis-ready [`SalesDataset`].
///
/// 1. every `sale_date` is parsed and every numeric field must be finite;
///    the first failure aborts with [`DataError::Parse`] and no partial
///    dataset is produced
/// 2. rows with `units_ordered == 0` are dropped
/// 3. `avg_price_per_unit = sales / units_ordered` for the survivors
pub fn prepare(raw_rows: &[RawSalesRow]) -> DataResult<SalesDataset> {
    let parsed: Vec<(NaiveDateTime, &RawSalesRow)> = raw_rows
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            check_finite(raw, row)?;
            parse_sale_date(&raw.sale_date)
                .map(|date| (date, raw))
                .ok_or_else(|| DataError::Parse {
                    row,
                    column: COL_SALES_DATE,
                    value: raw.sale_date.clone(),
                })
        })
        .collect::<DataResult<_>>()?;

    let records: Vec<SalesRecord> = parsed
        .into_iter()
        .filter(|(_, raw)| raw.units_ordered != 0.0)
        .map(|(sale_date, raw)| SalesRecord {
            sale_date,
            price: raw.price,
            units_ordered: raw.units_ordered,
            sales: raw.sales,
            avg_price_per_unit: raw.sales / raw.units_ordered,
        })
        .collect();

    let dropped = raw_rows.len() - records.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} rows with zero units ordered");
    }

    Ok(SalesDataset::from_records(records))
}

fn check_finite(raw: &RawSalesRow, row: usize) -> DataResult<()> {
    for (column, value) in [
        (COL_PRICE, raw.price),
        (COL_UNITS_ORDERED, raw.units_ordered),
        (COL_SALES, raw.sales),
    ] {
        if !value.is_finite() {
            return Err(DataError::Parse {
                row,
                column,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_rows() -> Vec<RawSalesRow> {
        vec![
            RawSalesRow::new("2023-01-01", 10.0, 0.0, 0.0),
            RawSalesRow::new("2023-01-02", 20.0, 2.0, 50.0),
            RawSalesRow::new("2023-01-03", 5.0, 5.0, 20.0),
        ]
    }

    #[test]
    fn scenario_drops_zero_unit_row_and_derives_average() {
        let ds = prepare(&scenario_rows()).unwrap();
        assert_eq!(ds.len(), 2);

        let r = ds.records();
        assert_eq!(r[0].sale_date.date(), NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(r[0].avg_price_per_unit, 25.0);
        assert_eq!(r[1].sale_date.date(), NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(r[1].avg_price_per_unit, 4.0);
    }

    #[test]
    fn excludes_exactly_the_zero_unit_rows() {
        let rows = vec![
            RawSalesRow::new("2023-02-01", 1.0, 0.0, 0.0),
            RawSalesRow::new("2023-02-02", 2.0, 3.0, 5.0),
            RawSalesRow::new("2023-02-03", 3.0, 0.0, 7.0),
            RawSalesRow::new("2023-02-04", 4.0, -2.0, -8.0),
            RawSalesRow::new("2023-02-05", 5.0, 1.0, 5.0),
        ];
        let ds = prepare(&rows).unwrap();

        let kept: Vec<f64> = ds.records().iter().map(|r| r.price).collect();
        assert_eq!(kept, vec![2.0, 4.0, 5.0]);
        assert!(ds.records().iter().all(|r| r.units_ordered != 0.0));
    }

    #[test]
    fn average_matches_sales_over_units() {
        let rows = vec![
            RawSalesRow::new("2023-03-01", 9.99, 3.0, 28.5),
            RawSalesRow::new("2023-03-02", 1.25, 7.0, 8.0),
            RawSalesRow::new("2023-03-03", 40.0, 11.0, 399.0),
        ];
        let ds = prepare(&rows).unwrap();
        for (rec, raw) in ds.records().iter().zip(&rows) {
            assert!((rec.avg_price_per_unit - raw.sales / raw.units_ordered).abs() < 1e-12);
        }
    }

    #[test]
    fn bad_date_aborts_with_row_index() {
        let mut rows = scenario_rows();
        rows.push(RawSalesRow::new("not a date", 1.0, 1.0, 1.0));

        let err = prepare(&rows).unwrap_err();
        assert_eq!(
            err,
            DataError::Parse {
                row: 3,
                column: COL_SALES_DATE,
                value: "not a date".to_string(),
            }
        );
    }

    #[test]
    fn bad_date_on_zero_unit_row_still_fails() {
        let rows = vec![RawSalesRow::new("31/31/2023", 1.0, 0.0, 0.0)];
        assert!(matches!(prepare(&rows), Err(DataError::Parse { row: 0, .. })));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        for (units, sales) in [(f64::NAN, 50.0), (f64::INFINITY, 20.0), (2.0, f64::NEG_INFINITY)] {
            let rows = vec![
                RawSalesRow::new("2023-01-02", 20.0, 2.0, 50.0),
                RawSalesRow::new("2023-01-03", 5.0, units, sales),
            ];
            assert!(
                matches!(prepare(&rows), Err(DataError::Parse { row: 1, .. })),
                "units={units} sales={sales}"
            );
        }
    }

    #[test]
    fn empty_input_gives_empty_dataset() {
        let ds = prepare(&[]).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn parses_supported_date_shapes() {
        let expect = NaiveDate::from_ymd_opt(2023, 4, 5).unwrap();
        for text in [
            "2023-04-05",
            "2023-04-05 13:45:00",
            "2023-04-05 13:45",
            "2023-04-05T13:45:00",
            "2023-04-05T13:45:00Z",
            "04/05/2023",
            "04/05/2023 13:45",
            " 2023-04-05 ",
        ] {
            let parsed = parse_sale_date(text).unwrap_or_else(|| panic!("failed on {text}"));
            assert_eq!(parsed.date(), expect, "{text}");
        }
        assert!(parse_sale_date("").is_none());
        assert!(parse_sale_date("2023-13-01").is_none());
    }
}
