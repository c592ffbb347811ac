/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmployeeDataset   (memoized by `cache`)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ EmployeeDataset │  Vec<EmployeeRecord>, distinct values, rating bounds
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  department / status / rating predicates → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  counts, means, value counts → Summary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
