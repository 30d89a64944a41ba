/// Data layer: table types, loading, and metric summaries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  named columns ── numeric_pair → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  normalized metric bars for a highlighted row
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod summary;
