use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use chrono::{DateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataError;
use super::model::{
    COL_PRICE, COL_SALES, COL_SALES_DATE, COL_UNITS_ORDERED, REQUIRED_COLUMNS, RawSalesRow,
    SalesDataset,
};
use super::prepare::prepare;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and prepare a sales dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `salesdate`, `price`, `unitsordered`, `sales`
/// * `.json`    – `[{ "salesdate": "...", "price": ..., ... }, ...]`
/// * `.parquet` – same column names; dates as text, date or timestamp
pub fn load_file(path: &Path) -> Result<SalesDataset> {
    let raw = load_raw(path)?;
    let dataset = prepare(&raw).with_context(|| format!("preparing {}", path.display()))?;
    log::info!(
        "Loaded {} rows from {}, {} kept after cleaning",
        raw.len(),
        path.display(),
        dataset.len()
    );
    Ok(dataset)
}

/// Read the raw rows without any cleaning.
pub fn load_raw(path: &Path) -> Result<Vec<RawSalesRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Numeric cells must be finite; `NaN` and `inf` are rejected like blanks.
fn parse_number(text: &str, row: usize, column: &'static str) -> Result<f64, DataError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError::Parse {
            row,
            column,
            value: text.to_string(),
        })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. Extra columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<RawSalesRow>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let mut idx = [0usize; 4];
    for (slot, name) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(DataError::MissingColumn(name))?;
    }
    let [date_idx, price_idx, units_idx, sales_idx] = idx;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        rows.push(RawSalesRow::new(
            field(date_idx),
            parse_number(field(price_idx), row_no, COL_PRICE)?,
            parse_number(field(units_idx), row_no, COL_UNITS_ORDERED)?,
            parse_number(field(sales_idx), row_no, COL_SALES)?,
        ));
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
/// `salesdate` is either date text or epoch milliseconds, the latter being
/// what pandas writes for datetime columns by default.
///
/// ```json
/// [
///   { "salesdate": "2023-01-02", "price": 20.0, "unitsordered": 2, "sales": 50.0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawSalesRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawSalesRow> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(RawSalesRow {
                sale_date: json_date(obj, i)?,
                price: json_number(obj, i, COL_PRICE)?,
                units_ordered: json_number(obj, i, COL_UNITS_ORDERED)?,
                sales: json_number(obj, i, COL_SALES)?,
            })
        })
        .collect()
}

fn json_date(obj: &Map<String, JsonValue>, row: usize) -> Result<String, DataError> {
    match obj.get(COL_SALES_DATE) {
        None => Err(DataError::MissingColumn(COL_SALES_DATE)),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339())
            .ok_or_else(|| DataError::Parse {
                row,
                column: COL_SALES_DATE,
                value: n.to_string(),
            }),
        Some(other) => Err(DataError::Parse {
            row,
            column: COL_SALES_DATE,
            value: other.to_string(),
        }),
    }
}

fn json_number(obj: &Map<String, JsonValue>, row: usize, column: &'static str) -> Result<f64, DataError> {
    match obj.get(column) {
        None => Err(DataError::MissingColumn(column)),
        Some(JsonValue::Number(n)) => n.as_f64().ok_or_else(|| DataError::Parse {
            row,
            column,
            value: n.to_string(),
        }),
        Some(JsonValue::String(s)) => parse_number(s, row, column),
        Some(other) => Err(DataError::Parse {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of sales rows.
///
/// `salesdate` may be Utf8, Date32/Date64 or Timestamp; the numeric columns
/// may be any integer or float width. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawSalesRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let offset = rows.len();

        let column = |name: &'static str| -> Result<ArrayRef> {
            let i = schema
                .index_of(name)
                .map_err(|_| DataError::MissingColumn(name))?;
            Ok(batch.column(i).clone())
        };

        let dates = cast(&column(COL_SALES_DATE)?, &DataType::Utf8)
            .context("converting 'salesdate' to text")?;
        let dates = dates.as_string::<i32>();
        let price = float_column(&column(COL_PRICE)?, COL_PRICE)?;
        let units = float_column(&column(COL_UNITS_ORDERED)?, COL_UNITS_ORDERED)?;
        let sales = float_column(&column(COL_SALES)?, COL_SALES)?;

        for row in 0..batch.num_rows() {
            let at = offset + row;
            if dates.is_null(row) {
                bail!(DataError::Parse {
                    row: at,
                    column: COL_SALES_DATE,
                    value: "<null>".to_string(),
                });
            }
            rows.push(RawSalesRow {
                sale_date: dates.value(row).to_string(),
                price: float_at(&price, row, at, COL_PRICE)?,
                units_ordered: float_at(&units, row, at, COL_UNITS_ORDERED)?,
                sales: float_at(&sales, row, at, COL_SALES)?,
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

fn float_column(col: &ArrayRef, name: &str) -> Result<ArrayRef> {
    if !col.data_type().is_numeric() {
        bail!("Column '{name}' has type {:?}, expected a number", col.data_type());
    }
    cast(col, &DataType::Float64).with_context(|| format!("converting '{name}' to float"))
}

fn float_at(col: &ArrayRef, row: usize, at: usize, column: &'static str) -> Result<f64, DataError> {
    if col.is_null(row) {
        return Err(DataError::Parse {
            row: at,
            column,
            value: "<null>".to_string(),
        });
    }
    let value = col.as_primitive::<Float64Type>().value(row);
    if !value.is_finite() {
        return Err(DataError::Parse {
            row: at,
            column,
            value: value.to_string(),
        });
    }
    Ok(value)
}
