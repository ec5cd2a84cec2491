/// Data layer: raw rows, normalization, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  coerce fields, resolve categories → NormalizedRecord
///   └───────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalaryDataset │  Vec<NormalizedRecord>, category index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply category selections → filtered indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
