/// Data layer: core types, loading, and descriptive statistics.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse first sheet → Dataset | LoadError
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  ordered named columns of CellValue
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ describe  │  info, describe, null counts, chart inputs
///   └──────────┘
/// ```

pub mod describe;
pub mod loader;
pub mod model;
