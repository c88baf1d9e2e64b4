/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read cells → clean → RecordTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordTable │  fixed columns + ordered metabolite columns
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  type-strain predicate → derived RecordTable
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
