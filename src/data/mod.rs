/// Data layer: core types, loading, preparation and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawSalesRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  prepare  │  parse dates, drop zero-unit rows, derive avg price
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalesDataset │  Vec<SalesRecord>, read-only
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive date range → filtered indices / dataset
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod prepare;
