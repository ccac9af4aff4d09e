use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Serialize)]
struct SaleRow {
    #[serde(rename = "salesdate")]
    date: String,
    price: f64,
    #[serde(rename = "unitsordered")]
    units: i64,
    sales: f64,
}

/// One synthetic order. Larger orders get a volume discount so the
/// inverse units/avg-price trend shows up in the dashboard.
fn generate_sale(date: NaiveDate, rng: &mut SimpleRng) -> SaleRow {
    let price = (rng.gauss(2.6, 0.55).exp() * 100.0).round() / 100.0;

    // ~2% cancelled orders carry zero units and are dropped on load.
    if rng.next_f64() < 0.02 {
        return SaleRow {
            date: date.format("%Y-%m-%d").to_string(),
            price,
            units: 0,
            sales: 0.0,
        };
    }

    let units = 1 + rng.gauss(1.4, 0.8).exp().floor() as i64;
    let discount = 1.0 / (1.0 + 0.035 * (units - 1) as f64);
    let noise = 1.0 + rng.gauss(0.0, 0.04);
    let sales = (price * units as f64 * discount * noise * 100.0).round() / 100.0;

    SaleRow {
        date: date.format("%Y-%m-%d").to_string(),
        price,
        units,
        sales,
    }
}

fn write_csv(path: &str, rows: &[SaleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for r in rows {
        writer.serialize(r)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[SaleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("salesdate", DataType::Utf8, false),
        Field::new("price", DataType::Float64, false),
        Field::new("unitsordered", DataType::Int64, false),
        Field::new("sales", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.date.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.price))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.units))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.sales))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).context("start date")?;

    let mut rows = Vec::new();
    for offset in 0..365 {
        let date = start + Duration::days(offset);
        let orders = 1 + rng.below(6);
        for _ in 0..orders {
            rows.push(generate_sale(date, &mut rng));
        }
    }

    write_csv("sample_retail.csv", &rows)?;
    write_parquet("sample_retail.parquet", &rows)?;

    println!(
        "Wrote {} sales ({} with zero units) to sample_retail.csv and sample_retail.parquet",
        rows.len(),
        rows.iter().filter(|r| r.units == 0).count()
    );
    Ok(())
}
