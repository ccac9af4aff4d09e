use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_SALES_DATE: &str = "salesdate";
pub const COL_PRICE: &str = "price";
pub const COL_UNITS_ORDERED: &str = "unitsordered";
pub const COL_SALES: &str = "sales";

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_SALES_DATE, COL_PRICE, COL_UNITS_ORDERED, COL_SALES];

// ---------------------------------------------------------------------------
// RawSalesRow – one row as read from disk, before normalisation
// ---------------------------------------------------------------------------

/// A source row with the date still in textual form.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSalesRow {
    pub sale_date: String,
    pub price: f64,
    pub units_ordered: f64,
    pub sales: f64,
}

impl RawSalesRow {
    pub fn new(sale_date: impl Into<String>, price: f64, units_ordered: f64, sales: f64) -> Self {
        Self {
            sale_date: sale_date.into(),
            price,
            units_ordered,
            sales,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one cleaned row of the dataset
// ---------------------------------------------------------------------------

/// A prepared sales row. `units_ordered` is never zero and
/// `avg_price_per_unit` is always `sales / units_ordered`.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub sale_date: NaiveDateTime,
    /// Unit list price.
    pub price: f64,
    pub units_ordered: f64,
    /// Total revenue for the row.
    pub sales: f64,
    /// Derived: `sales / units_ordered`.
    pub avg_price_per_unit: f64,
}

impl SalesRecord {
    /// Read one numeric column of this record.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Price => self.price,
            Metric::UnitsOrdered => self.units_ordered,
            Metric::Sales => self.sales,
            Metric::AvgPricePerUnit => self.avg_price_per_unit,
        }
    }
}

// ---------------------------------------------------------------------------
// Metric – the numeric columns handed to the charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Price,
    UnitsOrdered,
    Sales,
    AvgPricePerUnit,
}

impl Metric {
    /// Column order of the correlation matrix.
    pub const ALL: [Metric; 4] = [
        Metric::Price,
        Metric::UnitsOrdered,
        Metric::Sales,
        Metric::AvgPricePerUnit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::UnitsOrdered => "unitsordered",
            Metric::Sales => "sales",
            Metric::AvgPricePerUnit => "avg_price_per_unit",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete prepared dataset
// ---------------------------------------------------------------------------

/// The cleaned, in-memory collection of sales records.
///
/// Built once by [`super::prepare::prepare`] and read-only afterwards;
/// filtering produces a new dataset rather than mutating this one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

impl SalesDataset {
    pub(crate) fn from_records(records: Vec<SalesRecord>) -> Self {
        SalesDataset { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of one numeric column, in record order.
    pub fn column(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| r.metric(metric)).collect()
    }

    /// Sub-dataset made of the records at `indices`.
    pub fn select(&self, indices: &[usize]) -> SalesDataset {
        SalesDataset {
            records: indices
                .iter()
                .filter_map(|&i| self.records.get(i).cloned())
                .collect(),
        }
    }
}
